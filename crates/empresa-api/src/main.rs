//! CLI entry point for the Empresa GraphQL server.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use empresa_api::{build_schema, server, Directory};
use empresa_core::config::{EmpresaConfig, StoreBackend};
use empresa_store::{seed, EntityStore, GraphClient, GraphConfig, MemoryStore};

#[derive(Parser)]
#[command(name = "empresa")]
#[command(about = "GraphQL API over employees, managers, and departments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file prefix (default: empresa).
    #[arg(short, long, default_value = "empresa", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the GraphQL API over HTTP (default).
    Serve {
        /// Override the listen port.
        #[arg(short, long)]
        port: Option<u16>,

        /// Load the demo dataset before serving.
        #[arg(long)]
        seed: bool,
    },
    /// Wipe all collections and load the demo dataset.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let config = EmpresaConfig::load(&cli.config)?;
    let store = connect_store(&config).await?;

    match cli.command.unwrap_or(Command::Serve {
        port: None,
        seed: false,
    }) {
        Command::Serve { port, seed: reseed } => {
            if reseed {
                seed::seed(store.as_ref()).await?;
            }
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;
            let schema = build_schema(Directory::new(store));
            server::serve(schema, addr).await?;
        }
        Command::Seed => {
            if config.store.backend == StoreBackend::Memory {
                tracing::warn!("Seeding the memory backend has no effect after exit");
            }
            let summary = seed::seed(store.as_ref()).await?;
            println!("{}", serde_json::to_string(&summary)?);
        }
    }

    Ok(())
}

async fn connect_store(config: &EmpresaConfig) -> anyhow::Result<Arc<dyn EntityStore>> {
    match config.store.backend {
        StoreBackend::Neo4j => {
            let graph_config = GraphConfig::from(config.store.neo4j.clone());
            let client = GraphClient::connect(&graph_config).await.map_err(|e| {
                tracing::error!(uri = %graph_config.uri, error = %e, "Could not reach Neo4j");
                e
            })?;
            client.ensure_constraints().await?;
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
