use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bengkel_inventory::config::EnvironmentConfig;
use bengkel_inventory::AppState;

fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging: sin colores en producción, con target en desarrollo
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(!config.is_production())
        .with_target(config.is_development())
        .init();

    info!("🔧 Bengkel Motor - Pencatatan Peralatan");
    info!("======================================");
    info!("📁 Datos: {}", config.storage().workbook_path().display());
    info!("🔲 QR: {}", config.qr_dir.display());

    let state = match AppState::bootstrap(config) {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando el almacenamiento: {}", e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };

    let dashboard = state
        .statistics
        .dashboard(state.config.recent_service_limit);
    info!(
        "📊 {} alat ({} baik, {} rusak ringan, {} rusak berat), {} servis, total biaya Rp {}",
        dashboard.summary.total,
        dashboard.summary.good,
        dashboard.summary.minor_damage,
        dashboard.summary.major_damage,
        dashboard.summary.total_services,
        dashboard.summary.total_cost
    );
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    Ok(())
}
