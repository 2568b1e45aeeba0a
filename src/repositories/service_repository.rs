use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::database::{load_or_empty, InventoryStore};
use crate::models::{NewServiceRecord, ServiceHistoryEntry, ServiceRecord};
use crate::utils::errors::AppResult;
use crate::utils::ids::SERVICE_ID_SCHEME;
use crate::utils::validation::normalize_notes;

/// Registro append-only de servicios por alat.
///
/// No se verifica que `tool_id` exista: con un ID obsoleto se pueden crear
/// registros huérfanos.
#[derive(Clone)]
pub struct ServiceRepository {
    store: Arc<dyn InventoryStore>,
}

impl ServiceRepository {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Todos los servicios, en orden de almacenamiento
    pub fn list(&self) -> Vec<ServiceRecord> {
        load_or_empty(self.store.as_ref()).services
    }

    /// Historial de un alat, en orden de almacenamiento y sin límite
    pub fn list_by_tool(&self, tool_id: &str) -> Vec<ServiceRecord> {
        self.list()
            .into_iter()
            .filter(|service| service.tool_id == tool_id)
            .collect()
    }

    /// Siguiente ID de servicio según la última fila almacenada
    pub fn generate_id(&self) -> String {
        let services = self.list();
        next_service_id(&services)
    }

    /// Registrar un servicio y devolver su ID
    pub fn add(&self, new_service: NewServiceRecord) -> AppResult<String> {
        new_service.validate()?;

        let mut snapshot = self.store.load()?;
        let id = next_service_id(&snapshot.services);

        info!(
            "🔧 Servis {} registrado para alat {} ({}, Rp {})",
            id, new_service.tool_id, new_service.service_type, new_service.cost
        );
        snapshot.services.push(ServiceRecord {
            id: id.clone(),
            tool_id: new_service.tool_id,
            date: new_service.date,
            service_type: new_service.service_type,
            cost: new_service.cost,
            notes: normalize_notes(new_service.notes),
        });
        self.store.save(&snapshot.tools, &snapshot.services)?;

        Ok(id)
    }

    /// Los últimos `n` servicios registrados, el más reciente al final
    pub fn recent(&self, n: usize) -> Vec<ServiceRecord> {
        let mut services = self.list();
        let skip = services.len().saturating_sub(n);
        services.drain(..skip);
        services
    }

    /// Historial completo con el nombre de cada alat (`-` si ya no existe)
    pub fn history_with_tool_names(&self) -> Vec<ServiceHistoryEntry> {
        let snapshot = load_or_empty(self.store.as_ref());
        let names: HashMap<&str, &str> = snapshot
            .tools
            .iter()
            .map(|tool| (tool.id.as_str(), tool.name.as_str()))
            .collect();

        snapshot
            .services
            .iter()
            .map(|record| ServiceHistoryEntry {
                tool_name: names
                    .get(record.tool_id.as_str())
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                record: record.clone(),
            })
            .collect()
    }
}

fn next_service_id(services: &[ServiceRecord]) -> String {
    SERVICE_ID_SCHEME.next_id(services.last().map(|s| s.id.as_str()), services.len())
}
