use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use runtime::{AppConfig, CliArgs};
use todo_list::domain::service::Service as TodoService;
use todo_list::infra::storage::{InMemoryTodoRepository, SeaOrmTodoRepository};
use user_accounts::domain::service::Service as UserService;
use user_accounts::infra::auth::{BcryptPasswordHasher, OpaqueTokenIssuer};
use user_accounts::infra::storage::{InMemoryUserRepository, SeaOrmUserRepository};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Todo Server - todo and user management service
#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo Server - todo and user management service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run with in-memory repositories, ignoring any database config
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init(&logging_config)?;

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Wire repositories, services and routers, then serve until shutdown.
async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Todo Server starting");

    let (todo_service, user_service) = build_services(&config).await?;

    let mut app: Router = todo_list::api::rest::router(todo_service)
        .merge(user_accounts::api::rest::router(user_service))
        .layer(TraceLayer::new_for_http());

    if config.server.timeout_sec > 0 {
        app = app.layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout_sec,
        )));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Todo Server stopped");
    Ok(())
}

/// Build both services against either the configured database or the
/// in-memory repositories when no database section is present.
async fn build_services(config: &AppConfig) -> Result<(Arc<TodoService>, Arc<UserService>)> {
    let todo_config = todo_list::domain::service::ServiceConfig::default();
    let user_config = user_accounts::domain::service::ServiceConfig::default();
    let hasher = Arc::new(BcryptPasswordHasher::new());
    let tokens = Arc::new(OpaqueTokenIssuer::new());

    match &config.database {
        Some(db_config) => {
            let mut opts = ConnectOptions::new(db_config.url.clone());
            if let Some(max_conns) = db_config.max_conns {
                opts.max_connections(max_conns);
            }

            tracing::info!("Connecting to database: {}", db_config.url);
            let db = Database::connect(opts)
                .await
                .context("Failed to connect to database")?;

            todo_list::infra::storage::migrations::Migrator::up(&db, None)
                .await
                .context("Failed to run todo migrations")?;
            user_accounts::infra::storage::migrations::Migrator::up(&db, None)
                .await
                .context("Failed to run user migrations")?;

            let todo_service = Arc::new(TodoService::new(
                Arc::new(SeaOrmTodoRepository::new(db.clone())),
                todo_config,
            ));
            let user_service = Arc::new(UserService::new(
                Arc::new(SeaOrmUserRepository::new(db)),
                hasher,
                tokens,
                user_config,
            ));
            Ok((todo_service, user_service))
        }
        None => {
            tracing::warn!("No database configured, using in-memory repositories");
            let todo_service = Arc::new(TodoService::new(
                Arc::new(InMemoryTodoRepository::new()),
                todo_config,
            ));
            let user_service = Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                hasher,
                tokens,
                user_config,
            ));
            Ok((todo_service, user_service))
        }
    }
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
