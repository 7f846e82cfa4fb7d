//! Velora CLI - feed seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog with demo products
//! velora seed
//!
//! # List the current catalog
//! velora products
//!
//! # Follow the order collection live
//! velora watch-orders
//!
//! # Transition an order and print the customer notification link
//! velora set-status -o -OabcDEF123 -s Delivered
//!
//! # Sign in (or sign up) and remember the session locally
//! velora login -n Ali -p secret
//! ```
//!
//! Configuration comes from the environment; see
//! [`velora_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use velora_storefront::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "velora")]
#[command(author, version, about = "Velora CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the catalog with demo products
    Seed,
    /// List the current catalog
    Products,
    /// Follow the order collection and print it on every change
    WatchOrders,
    /// Transition an order's status and print the notification link
    SetStatus {
        /// Order key
        #[arg(short, long)]
        order: String,

        /// New status token
        #[arg(short, long)]
        status: String,
    },
    /// Sign in (or sign up) and remember the session locally
    Login {
        /// Login name
        #[arg(short, long)]
        name: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Print the remembered session, if any
    Whoami,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "velora=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run(&config).await?,
        Commands::Products => commands::products::list(&config).await?,
        Commands::WatchOrders => commands::orders::watch(&config).await?,
        Commands::SetStatus { order, status } => {
            commands::orders::set_status(&config, &order, &status).await?;
        }
        Commands::Login { name, password } => {
            commands::session::login(&config, &name, &password).await?;
        }
        Commands::Whoami => commands::session::whoami(&config).await?,
    }
    Ok(())
}
