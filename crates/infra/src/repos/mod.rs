mod shared;
mod user;

use crate::config::MongoConfig;
use mongodb::{options::ClientOptions, Client};
use std::{sync::Arc, time::Duration};
use tracing::info;
use user::{InMemoryUserRepo, MongoUserRepo};

pub use shared::query_structs::*;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_mongodb(config: &MongoConfig, timeout: Duration) -> anyhow::Result<Self> {
        let mut client_options = ClientOptions::parse(&config.connection_string).await?;
        client_options.server_selection_timeout = Some(timeout);
        let client = Client::with_options(client_options)?;
        let db = client.database(&config.db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.collection::<mongodb::bson::Document>("server-start")
            .insert_one(
                mongodb::bson::doc! {
                "server-start": 1
                },
                None,
            )
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            users: Arc::new(MongoUserRepo::new(&db, &config.collection, timeout)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
