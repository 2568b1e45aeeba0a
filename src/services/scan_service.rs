//! Escaneo de QR: imagen -> ID -> alat + historial de servicios

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{ServiceRecord, Tool};
use crate::repositories::{ServiceRepository, ToolRepository};
use crate::services::qr_service::QrCodec;

/// Resultado de escanear una imagen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScanOutcome {
    /// No se pudo leer ningún QR en la imagen
    NotDecoded,
    /// Se leyó un ID pero no corresponde a ningún alat
    UnknownTool(String),
    /// Alat encontrado con su historial
    Found {
        tool: Tool,
        history: Vec<ServiceRecord>,
    },
}

#[derive(Clone)]
pub struct ScanService {
    codec: QrCodec,
    tools: ToolRepository,
    services: ServiceRepository,
}

impl ScanService {
    pub fn new(codec: QrCodec, tools: ToolRepository, services: ServiceRepository) -> Self {
        Self {
            codec,
            tools,
            services,
        }
    }

    /// Decodificar una foto de cámara o un archivo subido y resolver el alat
    pub fn lookup(&self, image_bytes: &[u8]) -> ScanOutcome {
        let Some(tool_id) = self.codec.decode(image_bytes) else {
            return ScanOutcome::NotDecoded;
        };

        match self.tools.get(&tool_id) {
            Some(tool) => {
                info!("📷 QR escaneado: {} - {}", tool.id, tool.name);
                let history = self.services.list_by_tool(&tool.id);
                ScanOutcome::Found { tool, history }
            }
            None => {
                warn!("⚠️ QR escaneado con ID desconocido: {}", tool_id);
                ScanOutcome::UnknownTool(tool_id)
            }
        }
    }
}
