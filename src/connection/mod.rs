//! Connection management.
//!
//! A [`Session`] owns the MongoDB client and the current database handle.
//! `use` statements switch the current database explicitly through
//! [`Session::switch_database`]; nothing else mutates it.

use bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConnectionError, Result};

/// A live connection with an explicit current database.
pub struct Session {
    client: Client,
    database: Database,
}

impl Session {
    /// Connect to the server and select the initial database.
    ///
    /// The connection is verified with a `ping` so that an unreachable
    /// server fails here rather than on the first script statement.
    pub async fn connect(uri: &str, database: &str, config: &Config) -> Result<Self> {
        debug!(database, "connecting to MongoDB");

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(e.to_string()))?;
        options.connect_timeout = Some(config.connection_timeout());
        options.server_selection_timeout = Some(config.server_selection_timeout());

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(e.to_string()))?;

        info!(database, "connected");
        Ok(Self {
            client,
            database: db,
        })
    }

    /// Switch the session's current database.
    pub fn switch_database(&mut self, name: &str) {
        debug!(from = self.database.name(), to = name, "switching database");
        self.database = self.client.database(name);
    }

    /// Handle to the current database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Name of the current database.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}
