use bom_stream::{DeliveryUrls, StreamClient, StreamConfig};
use bom_worker::config::{StorageConfig, SyncConfig};
use bom_worker::migrate::StreamMigrationJob;
use bom_worker::storage::BlobStore;
use bom_worker::sync::StorageSyncJob;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bom_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = bom_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    let storage_config = StorageConfig::from_env();
    let sync_config = SyncConfig::from_env();
    let store = BlobStore::new(&storage_config);

    match command {
        Some("sync") => {
            let job = StorageSyncJob::new(
                &pool,
                &store,
                &sync_config,
                storage_config.public_base_url.clone(),
            );
            let report = job.run().await.expect("Storage sync failed");
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        Some("migrate") => {
            let stream_config = StreamConfig::from_env();
            let stream = StreamClient::new(&stream_config);
            let urls = DeliveryUrls::new(stream_config.delivery_domain.clone());
            let job =
                StreamMigrationJob::new(&pool, &store, &stream, &urls, &sync_config, dry_run);
            let report = job.run().await.expect("Stream migration failed");
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        _ => {
            eprintln!("Usage: bom-worker <sync|migrate> [--dry-run]");
            std::process::exit(2);
        }
    }
}
