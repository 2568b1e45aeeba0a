//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema de inventario.
//! Las ausencias esperadas (alat o riwayat servis inexistente) no son errores:
//! se representan con `Option` o colecciones vacías.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage corrupt: {0}")]
    StorageCorrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("QR error: {0}")]
    Qr(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Código corto para logs y para la capa de presentación
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::StorageCorrupt(_) => "STORAGE_CORRUPT",
            AppError::Io(_) => "IO_ERROR",
            AppError::Workbook(_) => "WORKBOOK_ERROR",
            AppError::Qr(_) => "QR_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Mensajes legibles de validación, uno por regla violada
    pub fn validation_messages(&self) -> Vec<String> {
        let AppError::Validation(errors) = self else {
            return Vec::new();
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect();
        messages.sort();
        messages
    }
}

impl From<calamine::XlsxError> for AppError {
    fn from(e: calamine::XlsxError) -> Self {
        AppError::StorageCorrupt(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Workbook(e.to_string())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para reportar una fila ilegible de una hoja
pub fn storage_corrupt_error(sheet: &str, row: usize, reason: &str) -> AppError {
    AppError::StorageCorrupt(format!("sheet '{}' row {}: {}", sheet, row, reason))
}

/// Función helper para errores del codec QR
pub fn qr_error(message: &str) -> AppError {
    AppError::Qr(message.to_string())
}
