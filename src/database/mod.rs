use std::time::Duration;

use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database, IndexModel,
};

use crate::{config::AppConfig, services::user_service::COLLECTION as USERS_COLLECTION};

const DEFAULT_DATABASE: &str = "user_service";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(config: &AppConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.database_url).await?;

        // Pool de conexões compartilhado entre os workers
        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.min_pool_size = Some(config.min_pool_size);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = database_name(config.database_name.as_deref(), client_options.default_database.as_deref());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("✅ Connected to MongoDB database: {}", db_name);

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Cria o índice único de email em `users`
    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<Document>(USERS_COLLECTION);

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        users.create_index(email_index).await?;
        log::info!("   ✅ Index ready: {}(email) unique", USERS_COLLECTION);

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Encerra o pool de conexões; chamado depois que o servidor para
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        log::info!("👋 MongoDB connection closed");
    }
}

/// Nome explícito > database da URI > padrão
fn database_name(configured: Option<&str>, from_uri: Option<&str>) -> String {
    configured
        .or(from_uri)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_precedence() {
        assert_eq!(database_name(Some("explicit"), Some("from_uri")), "explicit");
        assert_eq!(database_name(None, Some("from_uri")), "from_uri");
        assert_eq!(database_name(None, None), DEFAULT_DATABASE);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let config = AppConfig::from_env().expect("valid configuration");
        let db = MongoDB::new(&config).await;
        assert!(db.is_ok());
    }
}
