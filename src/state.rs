//! Shared application state
//!
//! Este módulo define el estado compartido que recibe la capa de
//! presentación: repositorios, estadísticas, QR y escaneo, todos sobre el
//! mismo almacenamiento.

use std::sync::Arc;

use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::database::{InventoryStore, XlsxStore};
use crate::repositories::{ServiceRepository, ToolRepository};
use crate::services::{QrCodec, QrService, ScanService, StatisticsService};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub tools: ToolRepository,
    pub services: ServiceRepository,
    pub statistics: StatisticsService,
    pub qr: QrService,
    pub scan: ScanService,
}

impl AppState {
    /// Construir el estado sobre cualquier almacenamiento
    pub fn new(config: EnvironmentConfig, store: Arc<dyn InventoryStore>) -> Self {
        let tools = ToolRepository::new(store.clone());
        let services = ServiceRepository::new(store.clone());
        let statistics = StatisticsService::new(store);
        let qr = QrService::with_codec(QrCodec::default(), config.qr_dir.clone());
        let scan = ScanService::new(*qr.codec(), tools.clone(), services.clone());

        Self {
            config,
            tools,
            services,
            statistics,
            qr,
            scan,
        }
    }

    /// Crear carpetas, inicializar el libro si falta y construir el estado
    pub fn bootstrap(config: EnvironmentConfig) -> AppResult<Self> {
        let store = XlsxStore::open(&config.storage())?;
        if store.init()? {
            info!("📄 Libro de inventario creado en {}", store.path().display());
        }
        Ok(Self::new(config, Arc::new(store)))
    }
}
