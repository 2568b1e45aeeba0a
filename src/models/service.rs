//! Modelo de Servis (registro de mantenimiento)
//!
//! Registros append-only de la hoja `Servis`: se crean, nunca se editan, y sólo
//! desaparecen en cascada cuando se borra el alat dueño.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{normalize_notes, validate_non_negative};

/// Tipo de servicio - se persiste con la etiqueta de la columna `Jenis_Servis`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceType {
    #[serde(rename = "Perbaikan")]
    Repair,
    #[serde(rename = "Perawatan Rutin")]
    RoutineMaintenance,
    #[serde(rename = "Penggantian Komponen")]
    PartReplacement,
    #[serde(rename = "Kalibrasi")]
    Calibration,
    #[serde(rename = "Lainnya")]
    Other,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Repair,
        ServiceType::RoutineMaintenance,
        ServiceType::PartReplacement,
        ServiceType::Calibration,
        ServiceType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Repair => "Perbaikan",
            ServiceType::RoutineMaintenance => "Perawatan Rutin",
            ServiceType::PartReplacement => "Penggantian Komponen",
            ServiceType::Calibration => "Kalibrasi",
            ServiceType::Other => "Lainnya",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "perbaikan" | "repair" => Ok(ServiceType::Repair),
            "perawatan rutin" | "routinemaintenance" => Ok(ServiceType::RoutineMaintenance),
            "penggantian komponen" | "partreplacement" => Ok(ServiceType::PartReplacement),
            "kalibrasi" | "calibration" => Ok(ServiceType::Calibration),
            "lainnya" | "other" => Ok(ServiceType::Other),
            _ => Err(format!("unknown service type '{}'", s.trim())),
        }
    }
}

/// Registro de servicio - una fila de la hoja `Servis`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub id: String,
    pub tool_id: String,
    pub date: NaiveDate,
    pub service_type: ServiceType,
    pub cost: Decimal,
    pub notes: Option<String>,
}

/// Request para registrar un nuevo servicio
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewServiceRecord {
    pub tool_id: String,

    pub date: NaiveDate,

    pub service_type: ServiceType,

    #[validate(custom = "validate_non_negative")]
    pub cost: Decimal,

    pub notes: Option<String>,
}

impl NewServiceRecord {
    pub fn new(
        tool_id: impl Into<String>,
        date: NaiveDate,
        service_type: ServiceType,
        cost: Decimal,
    ) -> Self {
        Self {
            tool_id: tool_id.into(),
            date,
            service_type,
            cost,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_notes(Some(notes.into()));
        self
    }
}

/// Fila del historial completo con el nombre del alat resuelto
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceHistoryEntry {
    pub record: ServiceRecord,
    /// Nombre del alat, `-` si el alat ya no existe
    pub tool_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_labels_roundtrip() {
        for service_type in ServiceType::ALL {
            assert_eq!(service_type.label().parse::<ServiceType>(), Ok(service_type));
        }
        assert_eq!("calibration".parse::<ServiceType>(), Ok(ServiceType::Calibration));
        assert!("Cuci".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let ok = NewServiceRecord::new("ALT01", date, ServiceType::Repair, Decimal::new(50000, 0));
        assert!(ok.validate().is_ok());

        let bad = NewServiceRecord::new("ALT01", date, ServiceType::Repair, Decimal::new(-10, 0));
        assert!(bad.validate().is_err());
    }
}
