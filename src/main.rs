//! time-greeter
//!
//! Runs the time service, the greeting service, or both in one process.
//!
//! ```text
//! time-greeter time              # GET /time   on $PORT (default 3001)
//! time-greeter greet             # GET /greet  on $PORT (default 3000)
//! time-greeter all               # both, on their configured addresses
//! time-greeter --config x.toml greet
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use time_greeter::config::{
    load_config, ConfigError, EnvOverrides, ObservabilityConfig, ServiceConfig, ServiceRole,
};
use time_greeter::observability::{self, init_logging};
use time_greeter::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "time-greeter", version)]
#[command(about = "Time provider and greeting composer services", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Serve GET /time
    Time,
    /// Serve GET /greet, calling the time service
    Greet,
    /// Serve both in one process
    All,
}

impl Commands {
    fn role(self) -> Option<ServiceRole> {
        match self {
            Commands::Time => Some(ServiceRole::Time),
            Commands::Greet => Some(ServiceRole::Greeting),
            Commands::All => None,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<(ServiceConfig, EnvOverrides), ConfigError> {
    let overrides = EnvOverrides::from_env()?;
    let config = load_config(cli.config.as_deref(), &overrides, cli.command.role())?;
    Ok((config, overrides))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, overrides) = match resolve_config(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_logging(&config.observability);
    tracing::info!("time-greeter v{} starting", env!("CARGO_PKG_VERSION"));

    let role = cli.command.role();
    if let Some(port) = overrides.ignored_port(role) {
        tracing::warn!(port, "Ignoring PORT when running both services");
    }
    tracing::info!(
        time_address = %config.time.bind_address,
        greeting_address = %config.greeting.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mut servers = Vec::new();
    if role != Some(ServiceRole::Greeting) {
        servers.push((HttpServer::time(&config), config.time.bind_address.clone()));
    }
    if role != Some(ServiceRole::Time) {
        servers.push((HttpServer::greeting(&config)?, config.greeting.bind_address.clone()));
    }

    // Bind everything before serving so a port conflict aborts startup.
    let mut bound = Vec::with_capacity(servers.len());
    for (server, address) in servers {
        let listener = TcpListener::bind(&address).await?;
        tracing::info!(
            service = server.name(),
            address = %listener.local_addr()?,
            "Listening for connections"
        );
        bound.push((server, listener));
    }

    let shutdown = Shutdown::new();
    let mut tasks = JoinSet::new();
    for (server, listener) in bound {
        let server_shutdown = shutdown.subscribe();
        tasks.spawn(server.run(listener, server_shutdown));
    }
    shutdown.trigger_on_signal();

    let mut failure: Option<Box<dyn std::error::Error>> = None;
    while let Some(result) = tasks.join_next().await {
        let error: Box<dyn std::error::Error> = match result {
            Ok(Ok(())) => continue,
            Ok(Err(e)) => e.into(),
            Err(e) => e.into(),
        };
        tracing::error!(error = %error, "Server exited with error");
        shutdown.trigger();
        failure.get_or_insert(error);
    }

    tracing::info!("Shutdown complete");
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
