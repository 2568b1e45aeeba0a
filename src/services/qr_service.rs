//! Servicio QR
//!
//! Codifica el ID de un alat como símbolo QR (PNG) y decodifica imágenes
//! escaneadas o subidas de vuelta a texto. El raster se genera con `qrcode`
//! y la detección se delega en `rqrr`.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageBuffer, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use tracing::{debug, info};

use crate::utils::errors::{qr_error, AppResult};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Configuración del codec: tamaño de módulo en píxeles y borde en módulos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrCodec {
    pub module_size: u32,
    pub quiet_zone: u32,
}

impl Default for QrCodec {
    fn default() -> Self {
        Self {
            module_size: 10,
            quiet_zone: 4,
        }
    }
}

/// Imagen QR codificada en PNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub tool_id: String,
    pub png: Vec<u8>,
}

impl QrImage {
    /// Nombre de archivo para descarga o guardado
    pub fn file_name(&self) -> String {
        qr_file_name(&self.tool_id)
    }

    /// `data:` URI para mostrar la imagen inline
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

impl QrCodec {
    /// Generar el PNG del QR para un ID de alat (corrección de errores baja).
    /// Mismo ID y misma configuración producen los mismos bytes.
    pub fn encode(&self, tool_id: &str) -> AppResult<QrImage> {
        if tool_id.is_empty() {
            return Err(qr_error("cannot encode an empty tool id"));
        }

        let code = QrCode::with_error_correction_level(tool_id.as_bytes(), EcLevel::L)
            .map_err(|e| qr_error(&e.to_string()))?;
        let width = code.width() as u32;
        let colors = code.to_colors();

        let module = self.module_size.max(1);
        let quiet = self.quiet_zone;
        let size = (width + 2 * quiet) * module;

        let img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_fn(size, size, |x, y| {
            let (mx, my) = (x / module, y / module);
            if mx < quiet || my < quiet || mx >= quiet + width || my >= quiet + width {
                return LIGHT;
            }
            let idx = ((my - quiet) * width + (mx - quiet)) as usize;
            match colors.get(idx) {
                Some(Color::Dark) => DARK,
                _ => LIGHT,
            }
        });

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| qr_error(&e.to_string()))?;

        debug!("🔲 QR generado para {} ({}x{} px)", tool_id, size, size);
        Ok(QrImage {
            tool_id: tool_id.to_string(),
            png,
        })
    }

    /// Decodificar el primer QR legible de una imagen.
    ///
    /// Imagen vacía, ilegible o sin QR devuelven `None` por igual.
    pub fn decode(&self, image_bytes: &[u8]) -> Option<String> {
        if image_bytes.is_empty() {
            return None;
        }

        let img = match image::load_from_memory(image_bytes) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                debug!("❌ Imagen no legible para decodificar QR: {}", e);
                return None;
            }
        };

        let (w, h) = img.dimensions();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            w as usize,
            h as usize,
            |x, y| img.get_pixel(x as u32, y as u32).0[0],
        );

        let decoded = prepared
            .detect_grids()
            .into_iter()
            .find_map(|grid| grid.decode().ok().map(|(_, content)| content));

        match &decoded {
            Some(text) => debug!("✅ QR decodificado: {}", text),
            None => debug!("🔍 Ningún QR decodificable en la imagen"),
        }
        decoded
    }
}

/// Nombre del archivo QR de un alat
pub fn qr_file_name(tool_id: &str) -> String {
    format!("QR_{}.png", tool_id)
}

/// Codec más la carpeta donde se guardan los PNG
#[derive(Debug, Clone)]
pub struct QrService {
    codec: QrCodec,
    qr_dir: PathBuf,
}

impl QrService {
    pub fn new(qr_dir: impl Into<PathBuf>) -> Self {
        Self::with_codec(QrCodec::default(), qr_dir)
    }

    pub fn with_codec(codec: QrCodec, qr_dir: impl Into<PathBuf>) -> Self {
        Self {
            codec,
            qr_dir: qr_dir.into(),
        }
    }

    pub fn codec(&self) -> &QrCodec {
        &self.codec
    }

    pub fn encode(&self, tool_id: &str) -> AppResult<QrImage> {
        self.codec.encode(tool_id)
    }

    pub fn decode(&self, image_bytes: &[u8]) -> Option<String> {
        self.codec.decode(image_bytes)
    }

    /// Generar y guardar `QR_<id>.png` en la carpeta QR; devuelve la ruta
    pub fn save_to_file(&self, tool_id: &str) -> AppResult<PathBuf> {
        let image = self.codec.encode(tool_id)?;
        fs::create_dir_all(&self.qr_dir)?;

        let path = self.qr_dir.join(image.file_name());
        fs::write(&path, &image.png)?;
        info!("💾 QR de {} guardado en {}", tool_id, path.display());
        Ok(path)
    }

    /// Ruta del PNG guardado, si existe
    pub fn file_path(&self, tool_id: &str) -> Option<PathBuf> {
        let path = self.qr_dir.join(qr_file_name(tool_id));
        path.is_file().then_some(path)
    }
}
