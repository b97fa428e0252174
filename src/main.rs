use chrono::Utc;
use clap::Parser;
use marketsync::cli::commands::{Cli, Commands};
use marketsync::domain::entities::embed::{EmbedData, EmbedRecord};
use marketsync::domain::entities::market_item::CanonicalMarketItem;
use marketsync::MarketSync;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("MARKETSYNC_DB").unwrap_or_else(|_| "./marketsync.db".into());

    let ms = match MarketSync::new(&db_path) {
        Ok(ms) => ms,
        Err(e) => {
            eprintln!("Error initializing marketsync: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(ms, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(ms: MarketSync, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Sync { embed_id } => {
            let result = ms.sync_embed(&embed_id).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::SyncAll => {
            let result = ms.sync_all_embeds().await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Candidates { embed_id } => {
            let candidates = ms.find_candidates(&embed_id).await?;
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
        Commands::Match { symbol } => match ms.find_matching_item(&symbol).await? {
            Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
            None => println!("No catalog item matches {symbol}"),
        },
        Commands::Catalog => {
            let items = ms.catalog().await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Seed { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;
            let items: Vec<CanonicalMarketItem> = if data.is_array() {
                serde_json::from_value(data)?
            } else {
                vec![serde_json::from_value(data)?]
            };
            let count = ms.upsert_items(items).await?;
            println!("Upserted {count} items");
        }
        Commands::AddEmbed { json } => {
            let data: serde_json::Value = serde_json::from_str(&json)?;

            let id = data["id"].as_str().ok_or("Missing required field: id")?.to_string();
            let title = data["title"].as_str().unwrap_or_default().to_string();
            let content = data["content"].as_str().unwrap_or_default().to_string();
            let embed_data: Option<EmbedData> = match data.get("embedData") {
                Some(v) if !v.is_null() => Some(serde_json::from_value(v.clone())?),
                _ => None,
            };

            let now = Utc::now();
            let embed = EmbedRecord {
                id,
                title,
                content,
                embed_data,
                created_at: now,
                updated_at: now,
            };
            ms.add_embed(&embed).await?;
            println!("Stored embed {}", embed.id);
        }
        Commands::Logs { limit } => {
            let logs = ms.sync_logs(limit).await?;
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
    }
    Ok(())
}
