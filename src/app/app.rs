use axum::{Router, routing::get};
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, MongoConfig};
use crate::handler::ui_handler::index_handler;
use crate::repository::mongo_gateway::MongoGateway;
use crate::repository::record_repo::MongoRecordRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::auth_router::auth_router;
use crate::router::record_router::record_router;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::record_service::RecordServiceImpl;


pub struct App {
    config: AppConfig,
    router: Router,
    pub record_service: Arc<RecordServiceImpl>,
    pub auth_service: Arc<AuthServiceImpl>,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;

        let gateway = MongoGateway::connect(&mongo_config).await?;
        let record_repo = Arc::new(MongoRecordRepository::new(&gateway, &mongo_config.record_collection));
        let user_repo = Arc::new(MongoUserRepository::new(&gateway, &mongo_config.user_collection));

        let record_service = Arc::new(RecordServiceImpl::new(record_repo));
        let auth_service = Arc::new(AuthServiceImpl::new(user_repo));

        let router = build_router(record_service.clone(), auth_service.clone());
        Ok(App { config, router, record_service, auth_service })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// The full HTTP surface: record CRUD, auth, the client page and a health check.
pub fn build_router(record_service: Arc<RecordServiceImpl>, auth_service: Arc<AuthServiceImpl>) -> Router {
    Router::new()
        .merge(record_router(record_service))
        .merge(auth_router(auth_service))
        .route("/", get(index_handler))
        .route("/health", get(|| async { "OK" }))
}
