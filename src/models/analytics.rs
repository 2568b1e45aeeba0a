//! Modelos de Analytics
//!
//! Este módulo contiene los modelos para el resumen del dashboard y el
//! desglose de condiciones usado por el gráfico.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::service::ServiceRecord;
use super::tool::ToolCondition;

/// Resumen para dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InventorySummary {
    pub total: usize,

    // Conteo por condición
    pub good: usize,
    pub minor_damage: usize,
    pub major_damage: usize,

    // Servicios
    pub total_services: usize,
    pub total_cost: Decimal,
}

impl InventorySummary {
    pub fn count_for(&self, condition: ToolCondition) -> usize {
        match condition {
            ToolCondition::Good => self.good,
            ToolCondition::MinorDamage => self.minor_damage,
            ToolCondition::MajorDamage => self.major_damage,
        }
    }
}

/// Conteo por condición, sin condiciones en cero
pub type ConditionBreakdown = BTreeMap<ToolCondition, usize>;

/// Todo lo que muestra la página de dashboard en una sola lectura
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub summary: InventorySummary,
    /// `None` cuando no hay alat registrados
    pub condition_breakdown: Option<ConditionBreakdown>,
    pub recent_services: Vec<ServiceRecord>,
}
