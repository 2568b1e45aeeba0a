//! Módulo de almacenamiento
//!
//! Maneja la persistencia del inventario: el contrato `InventoryStore`, el
//! libro .xlsx de producción y el almacenamiento en memoria.

pub mod memory;
pub mod store;
pub mod workbook;

pub use memory::InMemoryStore;
pub use store::{load_or_empty, InventorySnapshot, InventoryStore};
pub use workbook::XlsxStore;
