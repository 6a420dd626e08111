pub mod booking_repo;
pub mod contact_repo;
pub mod project_repo;
pub mod repository_error;

use crate::config::mongo_conf::MongoConfig;
use bson::{doc, Document};
use mongodb::options::FindOptions;
use tracing::info;

/// Connects once and returns the database handle shared by every repository.
pub async fn connect(config: &MongoConfig) -> Result<mongodb::Database, mongodb::error::Error> {
    use mongodb::{options::{ClientOptions, Credential, ResolverConfig}, Client};

    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("VeloriaBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(Credential::builder()
            .username(username.clone())
            .password(password.clone())
            .build());
    }

    let client = Client::with_options(client_options)?;
    let db = client.database(&config.database);
    db.run_command(doc! { "ping": 1 }, None).await?;
    info!(database = %config.database, "Connected to MongoDB");
    Ok(db)
}

/// Newest records first.
pub(crate) fn newest_first() -> FindOptions {
    FindOptions::builder().sort(doc! { "createdAt": -1 }).build()
}

/// Strips `_id` so the document can be used in a `$set` update.
pub(crate) fn without_id(mut document: Document) -> Document {
    document.remove("_id");
    document
}
