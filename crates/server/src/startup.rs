use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend, StorageConfig};
use models::{car::Car, customer::Customer, Keyed};
use serde_json::Value;
use service::{
    catalog::CatalogService,
    directory::DirectoryService,
    directory_client::HttpDirectoryClient,
    seeding::ensure_seeded,
    storage::{JsonFileStore, MemoryStore, RecordStore},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{CustomerState, RentalState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured backend for one record type and seed it if empty.
pub async fn open_seeded_store<T>(
    storage: &StorageConfig,
    file_name: &str,
    seed: Vec<T>,
) -> Result<Arc<dyn RecordStore<T>>, StartupError>
where
    T: Keyed + serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
{
    let store: Arc<dyn RecordStore<T>> = match storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::<T>::new()),
        StorageBackend::Json => {
            let path = Path::new(&storage.data_dir).join(file_name);
            Arc::new(JsonFileStore::<T>::open(path).await?)
        }
    };
    // 在绑定端口之前完成初始化，保证对外服务时数据已就绪
    ensure_seeded(store.as_ref(), seed).await?;
    Ok(store)
}

/// Wire the customer directory from configuration.
pub async fn build_customer_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let store = open_seeded_store::<Customer>(&cfg.storage, "customers.json", models::customer::seed()).await?;
    let state = CustomerState { directory: DirectoryService::new(store) };
    Ok(routes::build_customer_router(state, build_cors()))
}

/// Wire the rental catalog from configuration.
pub async fn build_rental_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let cars = open_seeded_store::<Car>(&cfg.storage, "cars.json", models::car::seed()).await?;
    let client = HttpDirectoryClient::new(&cfg.customer_service.url, cfg.customer_service.timeout())
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(
        customer_service_url = %cfg.customer_service.url,
        timeout_secs = cfg.customer_service.timeout_secs,
        "customer directory client configured"
    );
    let state = RentalState { catalog: CatalogService::new(cars, Arc::new(client)) };
    Ok(routes::build_rental_router(state, build_cors()))
}

async fn serve(app: Router, cfg: &AppConfig, service: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, service, "listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: build the customer directory and run its HTTP server
pub async fn run_customer_service(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_customer_app(&cfg).await?;
    serve(app, &cfg, "customer").await
}

/// Public entry: build the rental catalog and run its HTTP server
pub async fn run_rental_service(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_rental_app(&cfg).await?;
    serve(app, &cfg, "rental").await
}

/// Redacted view of the effective configuration for the startup log.
pub fn config_summary(cfg: &AppConfig) -> Value {
    serde_json::json!({
        "bind": cfg.server.bind_addr(),
        "worker_threads": cfg.server.worker_threads,
        "storage": format!("{:?}", cfg.storage.backend).to_lowercase(),
        "data_dir": cfg.storage.data_dir,
        "customer_service_url": cfg.customer_service.url,
    })
}
