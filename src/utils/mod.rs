//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y generación de IDs secuenciales.

pub mod errors;
pub mod ids;
pub mod validation;

pub use errors::{AppError, AppResult};
