//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! a las hojas `Alat` y `Servis` del libro de inventario.

pub mod analytics;
pub mod service;
pub mod tool;

pub use analytics::{ConditionBreakdown, DashboardData, InventorySummary};
pub use service::{NewServiceRecord, ServiceHistoryEntry, ServiceRecord, ServiceType};
pub use tool::{ConditionFilter, NewTool, Tool, ToolCondition, ToolFilters, ToolUpdate};
