use anyhow::Result;
use clap::{Parser, Subcommand};
use orgraph::config::ServerConfig;
use orgraph::server;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve(ServerConfig),
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, env = "ORGRAPH_DATABASE", default_value = "orgraph.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve(config) => {
            info!("Starting server on port {}", config.port);
            server::start_server(&config).await?;
        }
        Commands::Migrate {
            direction,
            database,
        } => {
            info!("Migrating database {} ({:?})", database, direction);
            server::migrate_database(&database, direction).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sqlx=warn,{}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();
}
