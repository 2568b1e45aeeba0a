//! Inventario y bitácora de mantenimiento de herramientas de taller.
//!
//! Alat (herramientas) y servis (mantenimientos) se guardan en un libro .xlsx
//! con dos hojas; cada alat tiene un QR con su ID.

pub mod config;
pub mod database;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
