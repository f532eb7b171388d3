use mongodb::bson::doc;
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

use crate::models::User;

pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connects and pings the server. Any error here means the process
    /// cannot serve traffic.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Defaults only; anything set in the URI wins.
        client_options.max_pool_size.get_or_insert(20);
        client_options.min_pool_size.get_or_insert(5);
        client_options.max_idle_time.get_or_insert(Duration::from_secs(300));
        client_options.connect_timeout.get_or_insert(Duration::from_secs(5));
        client_options.server_selection_timeout.get_or_insert(Duration::from_secs(5));
        client_options.app_name.get_or_insert_with(|| "scoreboard-api".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Index backing the top-N listing.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let users = self.database().collection::<User>(USERS_COLLECTION);
        let score_index = IndexModel::builder().keys(doc! { "score": -1 }).build();

        match users.create_index(score_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(score desc)"),
            Err(e) if is_index_conflict(&e) => {
                log::debug!("   ℹ️  Index already exists: {}", e)
            }
            Err(e) => log::warn!("   ⚠️  Could not create index users(score desc): {}", e),
        }

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn ping(&self) -> mongodb::error::Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the connection pool. Called once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

/// Server codes for an index that exists under another name or options.
const INDEX_CONFLICT_CODES: [i32; 3] = [68, 85, 86];

fn is_index_conflict_code(code: i32) -> bool {
    INDEX_CONFLICT_CODES.contains(&code)
}

fn is_index_conflict(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(command_error) => is_index_conflict_code(command_error.code),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri, "scoreboard_test").await.unwrap();
        assert!(db.ping().await.is_ok());
        assert_eq!(db.database().name(), "scoreboard_test");
        db.shutdown().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_within_uri_timeout() {
        let started = std::time::Instant::now();
        let result = MongoDB::new(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
            "scoreboard_test",
        )
        .await;

        assert!(result.is_err());
        // The 5s default must not override the 200ms from the URI.
        assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
    }

    #[test]
    fn test_index_conflict_codes() {
        assert!(is_index_conflict_code(85));
        assert!(is_index_conflict_code(86));
        assert!(is_index_conflict_code(68));
        // Unauthorized must surface as a warning, not be treated as "exists".
        assert!(!is_index_conflict_code(13));
    }
}
