use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "marketsync", about = "Synchronize embed market hints into the market-data catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply one embed's structured hints to the catalog
    Sync {
        embed_id: String,
    },
    /// Sync every embed that carries structured data
    SyncAll,
    /// Suggest catalog items an embed may refer to
    Candidates {
        embed_id: String,
    },
    /// Resolve a symbol (e.g. "USD/TRY", "Dolar") to a catalog item
    Match {
        symbol: String,
    },
    /// Print the catalog
    Catalog,
    /// Upsert catalog items from a JSON array (or a single object)
    Seed {
        json: String,
    },
    /// Store an embed from JSON (id, title, content, embedData)
    AddEmbed {
        json: String,
    },
    /// Show the sync history, newest first
    Logs {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}
