//! Modelo de Alat (herramienta del taller)
//!
//! Este módulo contiene el struct Tool, su enum de condición y los requests
//! para las operaciones CRUD. Mapea exactamente a la hoja `Alat` del libro.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{normalize_notes, validate_not_empty};

/// Condición del alat - se persiste con la etiqueta de la columna `Kondisi`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolCondition {
    #[serde(rename = "Baik")]
    Good,
    #[serde(rename = "Rusak Ringan")]
    MinorDamage,
    #[serde(rename = "Rusak Berat")]
    MajorDamage,
}

impl ToolCondition {
    /// Todas las condiciones en el orden de los formularios
    pub const ALL: [ToolCondition; 3] = [
        ToolCondition::Good,
        ToolCondition::MinorDamage,
        ToolCondition::MajorDamage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolCondition::Good => "Baik",
            ToolCondition::MinorDamage => "Rusak Ringan",
            ToolCondition::MajorDamage => "Rusak Berat",
        }
    }
}

impl fmt::Display for ToolCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ToolCondition {
    type Err = String;

    /// Acepta la etiqueta persistida o el nombre de la variante
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "baik" | "good" => Ok(ToolCondition::Good),
            "rusak ringan" | "minordamage" | "minor damage" => Ok(ToolCondition::MinorDamage),
            "rusak berat" | "majordamage" | "major damage" => Ok(ToolCondition::MajorDamage),
            _ => Err(format!("unknown tool condition '{}'", s.trim())),
        }
    }
}

/// Filtro de condición para la lista de alat: `Semua` o una condición exacta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionFilter {
    #[default]
    Any,
    Only(ToolCondition),
}

impl ConditionFilter {
    pub fn matches(&self, condition: ToolCondition) -> bool {
        match self {
            ConditionFilter::Any => true,
            ConditionFilter::Only(expected) => *expected == condition,
        }
    }
}

impl FromStr for ConditionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "semua" | "any" => Ok(ConditionFilter::Any),
            _ => s.parse().map(ConditionFilter::Only),
        }
    }
}

impl From<ToolCondition> for ConditionFilter {
    fn from(condition: ToolCondition) -> Self {
        ConditionFilter::Only(condition)
    }
}

/// Alat principal - una fila de la hoja `Alat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub condition: ToolCondition,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Tool {
    /// Etiqueta "ID - Nombre" usada en los selectores
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }

    /// Búsqueda por palabra clave, sin distinguir mayúsculas, en nombre o ID
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return true;
        }
        let needle = keyword.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.id.to_lowercase().contains(&needle)
    }
}

/// Request para crear un nuevo alat
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTool {
    #[validate(custom = "validate_not_empty")]
    pub name: String,

    pub condition: ToolCondition,

    pub purchase_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

impl NewTool {
    pub fn new(name: impl Into<String>, condition: ToolCondition) -> Self {
        Self {
            name: name.into(),
            condition,
            purchase_date: None,
            notes: None,
        }
    }

    pub fn purchased_on(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_notes(Some(notes.into()));
        self
    }
}

/// Request para reemplazar los campos mutables de un alat existente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToolUpdate {
    #[validate(custom = "validate_not_empty")]
    pub name: String,

    pub condition: ToolCondition,

    pub purchase_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

impl From<NewTool> for ToolUpdate {
    fn from(new_tool: NewTool) -> Self {
        Self {
            name: new_tool.name,
            condition: new_tool.condition,
            purchase_date: new_tool.purchase_date,
            notes: new_tool.notes,
        }
    }
}

impl From<&Tool> for ToolUpdate {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            condition: tool.condition,
            purchase_date: tool.purchase_date,
            notes: tool.notes.clone(),
        }
    }
}

/// Filtros para búsqueda de alat
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolFilters {
    pub keyword: String,
    pub condition: ConditionFilter,
}

impl ToolFilters {
    pub fn new(keyword: impl Into<String>, condition: ConditionFilter) -> Self {
        Self {
            keyword: keyword.into(),
            condition,
        }
    }

    pub fn matches(&self, tool: &Tool) -> bool {
        tool.matches_keyword(&self.keyword) && self.condition.matches(tool.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(id: &str, name: &str, condition: ToolCondition) -> Tool {
        Tool {
            id: id.to_string(),
            name: name.to_string(),
            condition,
            purchase_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_condition_labels_roundtrip() {
        for condition in ToolCondition::ALL {
            assert_eq!(condition.label().parse::<ToolCondition>(), Ok(condition));
        }
        assert_eq!("MinorDamage".parse::<ToolCondition>(), Ok(ToolCondition::MinorDamage));
        assert!("Hilang".parse::<ToolCondition>().is_err());
    }

    #[test]
    fn test_condition_filter_parse() {
        assert_eq!("Semua".parse::<ConditionFilter>(), Ok(ConditionFilter::Any));
        assert_eq!(
            "Rusak Berat".parse::<ConditionFilter>(),
            Ok(ConditionFilter::Only(ToolCondition::MajorDamage))
        );
        assert!(ConditionFilter::Any.matches(ToolCondition::Good));
        assert!(!ConditionFilter::Only(ToolCondition::Good).matches(ToolCondition::MajorDamage));
    }

    #[test]
    fn test_keyword_matches_name_or_id() {
        let t = tool("ALT03", "Kunci Pas 10mm", ToolCondition::Good);
        assert!(t.matches_keyword(""));
        assert!(t.matches_keyword("kunci"));
        assert!(t.matches_keyword("alt0"));
        assert!(!t.matches_keyword("obeng"));
    }

    #[test]
    fn test_new_tool_rejects_blank_name() {
        assert!(NewTool::new("Obeng Plus", ToolCondition::Good).validate().is_ok());
        assert!(NewTool::new("   ", ToolCondition::Good).validate().is_err());
    }

    #[test]
    fn test_display_label() {
        let t = tool("ALT01", "Tang", ToolCondition::Good);
        assert_eq!(t.display_label(), "ALT01 - Tang");
    }
}
