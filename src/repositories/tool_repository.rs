use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::database::{load_or_empty, InventoryStore};
use crate::models::{NewTool, Tool, ToolCondition, ToolFilters, ToolUpdate};
use crate::utils::errors::AppResult;
use crate::utils::ids::TOOL_ID_SCHEME;
use crate::utils::validation::normalize_notes;

/// CRUD de alat sobre el almacenamiento de inventario.
///
/// Las lecturas toleran un almacenamiento ilegible (colección vacía); las
/// escrituras recargan, mutan en memoria y reescriben ambas colecciones.
#[derive(Clone)]
pub struct ToolRepository {
    store: Arc<dyn InventoryStore>,
}

impl ToolRepository {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Todos los alat, en orden de almacenamiento
    pub fn list(&self) -> Vec<Tool> {
        load_or_empty(self.store.as_ref()).tools
    }

    /// Buscar un alat por ID. La ausencia no es un error.
    pub fn get(&self, id: &str) -> Option<Tool> {
        self.list().into_iter().find(|tool| tool.id == id)
    }

    /// Siguiente ID de alat según la última fila almacenada
    pub fn generate_id(&self) -> String {
        let tools = self.list();
        next_tool_id(&tools)
    }

    /// Registrar un nuevo alat y devolver su ID
    pub fn add(&self, new_tool: NewTool) -> AppResult<String> {
        new_tool.validate()?;

        let mut snapshot = self.store.load()?;
        let id = next_tool_id(&snapshot.tools);

        snapshot.tools.push(Tool {
            id: id.clone(),
            name: new_tool.name.trim().to_string(),
            condition: new_tool.condition,
            purchase_date: new_tool.purchase_date,
            notes: normalize_notes(new_tool.notes),
        });
        self.store.save(&snapshot.tools, &snapshot.services)?;

        info!("✅ Alat {} registrado ({})", id, new_tool.condition);
        Ok(id)
    }

    /// Reemplazar los campos mutables de un alat.
    /// Devuelve `false` si no existe ningún alat con ese ID.
    pub fn update(&self, id: &str, update: ToolUpdate) -> AppResult<bool> {
        update.validate()?;

        let mut snapshot = self.store.load()?;
        let Some(tool) = snapshot.tools.iter_mut().find(|tool| tool.id == id) else {
            debug!("🔍 Alat {} no encontrado para actualizar", id);
            return Ok(false);
        };

        tool.name = update.name.trim().to_string();
        tool.condition = update.condition;
        tool.purchase_date = update.purchase_date;
        tool.notes = normalize_notes(update.notes);

        self.store.save(&snapshot.tools, &snapshot.services)?;
        info!("✏️ Alat {} actualizado", id);
        Ok(true)
    }

    /// Cambiar sólo la condición, conservando el resto de campos
    pub fn update_condition(&self, id: &str, condition: ToolCondition) -> AppResult<bool> {
        let Some(current) = self.get(id) else {
            return Ok(false);
        };

        let mut update = ToolUpdate::from(&current);
        update.condition = condition;
        self.update(id, update)
    }

    /// Borrar un alat y, en cascada, todo su historial de servicios.
    /// Borrar un ID inexistente no es un error.
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let mut snapshot = self.store.load()?;

        let tools_before = snapshot.tools.len();
        let services_before = snapshot.services.len();
        snapshot.tools.retain(|tool| tool.id != id);
        snapshot.services.retain(|service| service.tool_id != id);

        self.store.save(&snapshot.tools, &snapshot.services)?;
        info!(
            "🗑️ Alat {} borrado ({} alat, {} servis eliminados)",
            id,
            tools_before - snapshot.tools.len(),
            services_before - snapshot.services.len()
        );
        Ok(())
    }

    /// Filtrar por palabra clave (nombre o ID) y condición
    pub fn filter(&self, filters: &ToolFilters) -> Vec<Tool> {
        let tools = self.list();
        if tools.is_empty() {
            return tools;
        }
        tools.into_iter().filter(|tool| filters.matches(tool)).collect()
    }
}

fn next_tool_id(tools: &[Tool]) -> String {
    TOOL_ID_SCHEME.next_id(tools.last().map(|tool| tool.id.as_str()), tools.len())
}
