//! InMemoryStore - almacenamiento en memoria para tests y desarrollo.

use std::sync::{Arc, RwLock};

use super::store::{InventorySnapshot, InventoryStore};
use crate::models::{ServiceRecord, Tool};
use crate::utils::errors::{AppError, AppResult};

/// Almacenamiento en memoria. Los clones comparten el mismo contenido.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    snapshot: Arc<RwLock<InventorySnapshot>>,
}

impl InMemoryStore {
    /// Crear un almacenamiento vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear un almacenamiento con contenido inicial
    pub fn with_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }
}

impl InventoryStore for InMemoryStore {
    fn load(&self) -> AppResult<InventorySnapshot> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| AppError::StorageCorrupt("lock poisoned".into()))?;
        Ok(snapshot.clone())
    }

    fn save(&self, tools: &[Tool], services: &[ServiceRecord]) -> AppResult<()> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| AppError::StorageCorrupt("lock poisoned".into()))?;
        *snapshot = InventorySnapshot {
            tools: tools.to_vec(),
            services: services.to_vec(),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToolCondition;

    fn tool(id: &str) -> Tool {
        Tool {
            id: id.to_string(),
            name: format!("Alat {}", id),
            condition: ToolCondition::Good,
            purchase_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_empty_store_loads_empty() {
        let store = InMemoryStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_everything() {
        let store = InMemoryStore::new();
        store.save(&[tool("ALT01"), tool("ALT02")], &[]).unwrap();
        store.save(&[tool("ALT03")], &[]).unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.tools.len(), 1);
        assert_eq!(snapshot.tools[0].id, "ALT03");
    }

    #[test]
    fn test_clone_shares_storage() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        store.save(&[tool("ALT01")], &[]).unwrap();
        assert_eq!(clone.load().unwrap().tools.len(), 1);
    }
}
