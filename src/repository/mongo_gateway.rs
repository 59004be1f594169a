use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use bson::doc;
use mongodb::{options::{ClientOptions, Credential}, Client, Collection, Database};
use tracing::{error, info};

/// The process-wide database handle. Created once at startup and handed to
/// every repository; cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct MongoGateway {
    db: Database,
}

impl MongoGateway {
    #[tracing::instrument(skip(config), fields(database = %config.database))]
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            error!("Invalid MongoDB URI: {}", e);
            RepositoryError::connection(format!("Invalid MongoDB URI: {}", e))
        })?;
        client_options.app_name = Some("AgentRegistry".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 }, None).await.map_err(|e| {
            error!("Failed to ping MongoDB: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Connected to MongoDB");
        Ok(MongoGateway { db })
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }
}
