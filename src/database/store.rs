//! Contrato del almacenamiento de inventario
//!
//! Las dos colecciones (alat y servis) se leen y se reescriben siempre juntas:
//! no existe un camino de actualización parcial.

use crate::models::{ServiceRecord, Tool};
use crate::utils::errors::AppResult;

/// Contenido completo del almacenamiento en un momento dado
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySnapshot {
    pub tools: Vec<Tool>,
    pub services: Vec<ServiceRecord>,
}

impl InventorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.services.is_empty()
    }
}

/// Frontera de persistencia inyectada en los repositorios
pub trait InventoryStore: Send + Sync {
    /// Leer ambas colecciones. Si no hay almacenamiento se inicializa vacío.
    /// Falla con `StorageCorrupt` si los datos no tienen la forma esperada.
    fn load(&self) -> AppResult<InventorySnapshot>;

    /// Reemplazar por completo el almacenamiento con ambas colecciones
    fn save(&self, tools: &[Tool], services: &[ServiceRecord]) -> AppResult<()>;
}

/// Lectura tolerante: si el almacenamiento no se puede leer se devuelve una
/// instantánea vacía y se registra el error.
pub fn load_or_empty(store: &dyn InventoryStore) -> InventorySnapshot {
    match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(
                "⚠️ No se pudo leer el inventario ({}), usando colecciones vacías: {}",
                e.code(),
                e
            );
            InventorySnapshot::default()
        }
    }
}
