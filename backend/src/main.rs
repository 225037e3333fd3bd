use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use contact_storage::{
    contact::ContactStorage,
    store::{ContactStore, DynamoDbStore},
};
use contacts_backend::{
    readiness::{provision_table, Readiness},
    server,
    types::{Config, Environment},
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (development)
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // JSON logs for staging/production, human readable for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let config = Config::from_env()?;
    tracing::info!(
        environment = ?config.environment,
        table = %config.table_name,
        region = %config.aws.region,
        "Starting contacts backend"
    );

    let dynamodb_client = Arc::new(DynamoDbClient::new(&config.aws_config().await));
    let store: Arc<dyn ContactStore> = Arc::new(DynamoDbStore::new(dynamodb_client));

    let readiness = Readiness::new();
    provision_table(store.as_ref(), &config.table_spec(), &readiness).await;

    let contact_storage = Arc::new(ContactStorage::new(store, config.table_name.clone()));

    server::start(config, contact_storage, readiness).await
}
