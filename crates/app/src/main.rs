use anyhow::Result;
use tracing::{error, info};

use persistence::ConnectionManager;
use rentmaster::config::Config;
use rentmaster::logging::init_logging;
use rentmaster::RentalService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging)?;

    info!("Starting RentMaster v{}", env!("CARGO_PKG_VERSION"));

    let db = ConnectionManager::new(config.database.clone());
    let service = RentalService::new(db.clone());

    if let Err(e) = service.init_db().await {
        error!(error = %e, "no usable database backend");
        return Err(e.into());
    }

    let backend = db.backend_kind().await;
    let languages = service.get_languages().await;
    info!(?backend, languages = languages.len(), "database ready");

    db.close().await;
    Ok(())
}
