//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto para que la herramienta arranque sin `.env`.

use std::env;
use std::path::PathBuf;

use crate::utils::errors::{AppError, AppResult};

use super::storage::StorageConfig;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub data_dir: PathBuf,
    pub workbook_file: String,
    pub qr_dir: PathBuf,
    pub recent_service_limit: usize,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            data_dir: PathBuf::from("data"),
            workbook_file: "data_peralatan.xlsx".to_string(),
            qr_dir: PathBuf::from("qr"),
            recent_service_limit: 5,
            log_level: "info".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let recent_service_limit = match env::var("RECENT_SERVICE_LIMIT") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "RECENT_SERVICE_LIMIT must be a valid number, got '{}'",
                    raw
                ))
            })?,
            Err(_) => defaults.recent_service_limit,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            workbook_file: env::var("WORKBOOK_FILE").unwrap_or(defaults.workbook_file),
            qr_dir: env::var("QR_DIR").map(PathBuf::from).unwrap_or(defaults.qr_dir),
            recent_service_limit,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Configuración de almacenamiento derivada
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            data_dir: self.data_dir.clone(),
            workbook_file: self.workbook_file.clone(),
            qr_dir: self.qr_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.recent_service_limit, 5);

        let storage = config.storage();
        assert_eq!(storage.workbook_path(), PathBuf::from("data").join("data_peralatan.xlsx"));
        assert_eq!(storage.qr_dir, PathBuf::from("qr"));
    }
}
