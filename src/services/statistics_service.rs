//! Servicio de estadísticas para el dashboard
//!
//! Agregaciones puras sobre las colecciones actuales. No hay cache: todo se
//! recalcula en cada llamada.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::database::{load_or_empty, InventorySnapshot, InventoryStore};
use crate::models::{
    ConditionBreakdown, DashboardData, InventorySummary, ServiceRecord, Tool, ToolCondition,
};

#[derive(Clone)]
pub struct StatisticsService {
    store: Arc<dyn InventoryStore>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Totales de alat por condición, número de servicios y costo total
    pub fn summary(&self) -> InventorySummary {
        summarize(&load_or_empty(self.store.as_ref()))
    }

    /// Conteo por condición para el gráfico; `None` si no hay alat
    pub fn condition_breakdown(&self) -> Option<ConditionBreakdown> {
        breakdown(&load_or_empty(self.store.as_ref()).tools)
    }

    /// Costo total de servicios, de todos los alat o de uno solo
    pub fn service_cost_total(&self, tool_id: Option<&str>) -> Decimal {
        let services = load_or_empty(self.store.as_ref()).services;
        total_cost(
            services
                .iter()
                .filter(|service| tool_id.map_or(true, |id| service.tool_id == id)),
        )
    }

    /// Datos completos del dashboard con una sola lectura del almacenamiento
    pub fn dashboard(&self, recent_limit: usize) -> DashboardData {
        let snapshot = load_or_empty(self.store.as_ref());
        let skip = snapshot.services.len().saturating_sub(recent_limit);

        let data = DashboardData {
            summary: summarize(&snapshot),
            condition_breakdown: breakdown(&snapshot.tools),
            recent_services: snapshot.services[skip..].to_vec(),
        };
        debug!(
            "📊 Dashboard: {} alat, {} servis, {} recientes",
            data.summary.total,
            data.summary.total_services,
            data.recent_services.len()
        );
        data
    }
}

fn summarize(snapshot: &InventorySnapshot) -> InventorySummary {
    let count = |condition: ToolCondition| {
        snapshot
            .tools
            .iter()
            .filter(|tool| tool.condition == condition)
            .count()
    };

    InventorySummary {
        total: snapshot.tools.len(),
        good: count(ToolCondition::Good),
        minor_damage: count(ToolCondition::MinorDamage),
        major_damage: count(ToolCondition::MajorDamage),
        total_services: snapshot.services.len(),
        total_cost: total_cost(snapshot.services.iter()),
    }
}

fn breakdown(tools: &[Tool]) -> Option<ConditionBreakdown> {
    if tools.is_empty() {
        return None;
    }

    let mut counts = BTreeMap::new();
    for tool in tools {
        *counts.entry(tool.condition).or_insert(0) += 1;
    }
    Some(counts)
}

/// Suma de costos, saturada en `Decimal::MAX` en lugar de desbordar
fn total_cost<'a>(services: impl Iterator<Item = &'a ServiceRecord>) -> Decimal {
    services.fold(Decimal::ZERO, |total, service| {
        total.checked_add(service.cost).unwrap_or_else(|| {
            warn!("⚠️ Costo total desbordado en {}, se satura al máximo", service.id);
            Decimal::MAX
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use crate::models::{NewServiceRecord, NewTool, ServiceType};
    use crate::repositories::{ServiceRepository, ToolRepository};
    use chrono::NaiveDate;

    struct Fixture {
        tools: ToolRepository,
        services: ServiceRepository,
        stats: StatisticsService,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn InventoryStore> = Arc::new(InMemoryStore::new());
        Fixture {
            tools: ToolRepository::new(store.clone()),
            services: ServiceRepository::new(store.clone()),
            stats: StatisticsService::new(store),
        }
    }

    fn service(tool_id: &str, cost: i64) -> NewServiceRecord {
        NewServiceRecord::new(
            tool_id,
            NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
            ServiceType::Repair,
            Decimal::new(cost, 0),
        )
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let f = fixture();
        let summary = f.stats.summary();
        assert_eq!(summary.total, 0);
        for condition in ToolCondition::ALL {
            assert_eq!(summary.count_for(condition), 0);
        }
        assert_eq!(summary.total_services, 0);
        assert_eq!(summary.total_cost, Decimal::ZERO);
        assert!(f.stats.condition_breakdown().is_none());
    }

    #[test]
    fn test_summary_counts_and_costs() {
        let f = fixture();
        f.tools.add(NewTool::new("Kunci Pas 10mm", ToolCondition::Good)).unwrap();
        f.tools.add(NewTool::new("Obeng", ToolCondition::Good)).unwrap();
        f.tools.add(NewTool::new("Tang", ToolCondition::MajorDamage)).unwrap();
        f.services.add(service("ALT01", 50000)).unwrap();
        f.services.add(service("ALT01", 75000)).unwrap();

        let summary = f.stats.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.good, 2);
        assert_eq!(summary.minor_damage, 0);
        assert_eq!(summary.major_damage, 1);
        assert_eq!(summary.total_services, 2);
        assert_eq!(summary.total_cost, Decimal::new(125000, 0));
    }

    #[test]
    fn test_breakdown_omits_zero_counts() {
        let f = fixture();
        f.tools.add(NewTool::new("Obeng", ToolCondition::Good)).unwrap();
        f.tools.add(NewTool::new("Tang", ToolCondition::MinorDamage)).unwrap();
        f.tools.add(NewTool::new("Palu", ToolCondition::MinorDamage)).unwrap();

        let breakdown = f.stats.condition_breakdown().unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get(&ToolCondition::Good), Some(&1));
        assert_eq!(breakdown.get(&ToolCondition::MinorDamage), Some(&2));
        assert!(!breakdown.contains_key(&ToolCondition::MajorDamage));
    }

    #[test]
    fn test_service_cost_total_per_tool() {
        let f = fixture();
        f.services.add(service("ALT01", 50000)).unwrap();
        f.services.add(service("ALT02", 20000)).unwrap();
        f.services.add(service("ALT01", 75000)).unwrap();

        assert_eq!(f.stats.service_cost_total(None), Decimal::new(145000, 0));
        assert_eq!(f.stats.service_cost_total(Some("ALT01")), Decimal::new(125000, 0));
        assert_eq!(f.stats.service_cost_total(Some("ALT09")), Decimal::ZERO);
    }

    #[test]
    fn test_dashboard_limits_recent_services() {
        let f = fixture();
        f.tools.add(NewTool::new("Obeng", ToolCondition::Good)).unwrap();
        for cost in 1..=6 {
            f.services.add(service("ALT01", cost * 1000)).unwrap();
        }

        let dashboard = f.stats.dashboard(5);
        assert_eq!(dashboard.summary.total_services, 6);
        assert_eq!(dashboard.recent_services.len(), 5);
        assert_eq!(dashboard.recent_services[0].id, "SRV002");
        assert_eq!(dashboard.recent_services[4].id, "SRV006");
        assert!(dashboard.condition_breakdown.is_some());
    }

    #[test]
    fn test_total_cost_saturates_instead_of_overflowing() {
        let record = |id: &str| ServiceRecord {
            id: id.to_string(),
            tool_id: "ALT01".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
            service_type: ServiceType::Other,
            cost: Decimal::MAX,
            notes: None,
        };
        let store = InMemoryStore::with_snapshot(InventorySnapshot {
            tools: Vec::new(),
            services: vec![record("SRV001"), record("SRV002")],
        });
        let stats = StatisticsService::new(Arc::new(store));

        let summary = stats.summary();
        assert_eq!(summary.total_services, 2);
        assert_eq!(summary.total_cost, Decimal::MAX);
        assert_eq!(stats.service_cost_total(Some("ALT01")), Decimal::MAX);
    }
}
