//! Configuración de almacenamiento
//!
//! Rutas del libro de inventario y de la carpeta de imágenes QR.

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::errors::AppResult;

/// Configuración del almacenamiento en disco
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub workbook_file: String,
    pub qr_dir: PathBuf,
}

impl StorageConfig {
    /// Configuración con todo bajo un mismo directorio raíz (tests, demos)
    pub fn under(root: &Path) -> Self {
        Self {
            data_dir: root.join("data"),
            workbook_file: "data_peralatan.xlsx".to_string(),
            qr_dir: root.join("qr"),
        }
    }

    /// Ruta completa del libro
    pub fn workbook_path(&self) -> PathBuf {
        self.data_dir.join(&self.workbook_file)
    }

    /// Crear las carpetas de datos y QR si no existen
    pub fn init_folders(&self) -> AppResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.qr_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_folders_creates_both_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StorageConfig::under(tmp.path());

        config.init_folders().unwrap();
        assert!(config.data_dir.is_dir());
        assert!(config.qr_dir.is_dir());

        // Idempotente
        config.init_folders().unwrap();
    }
}
