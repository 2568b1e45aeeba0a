//! Services module
//!
//! Este módulo contiene la lógica de negocio que combina repositorios o
//! integra librerías externas: estadísticas del dashboard, codec QR y
//! búsqueda por escaneo.

pub mod qr_service;
pub mod scan_service;
pub mod statistics_service;

pub use qr_service::{QrCodec, QrImage, QrService};
pub use scan_service::{ScanOutcome, ScanService};
pub use statistics_service::StatisticsService;
