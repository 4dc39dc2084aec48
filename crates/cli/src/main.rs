mod render_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    juliet_config::JulietConfig,
    juliet_gateway::state::GatewayState,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "juliet", about = "Juliet: keyword chat, emotion scoring and rendering demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true, env = "JULIET_BIND")]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true, env = "JULIET_PORT")]
    port: Option<u16>,
    /// Config file (skips discovery in ./ and ~/.config/juliet/).
    #[arg(long, global = true, env = "JULIET_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default when no subcommand is provided).
    Gateway,
    /// Reply to one message and print the JSON payload.
    Chat {
        /// Message text.
        message: String,
    },
    /// Render a diagram or math expression to a PNG file.
    Render {
        #[command(subcommand)]
        action: render_commands::RenderAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<JulietConfig> {
    match cli.config {
        Some(ref path) => Ok(juliet_config::load_config(path)?),
        None => Ok(juliet_config::discover_and_load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "juliet starting");

    let config = load_config(&cli)?;

    match cli.command {
        None | Some(Commands::Gateway) => {
            let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
            let port = cli.port.unwrap_or(config.server.port);
            let state = GatewayState::from_config(&config);
            juliet_gateway::server::start_gateway(&bind, port, state).await?;
            Ok(())
        },
        Some(Commands::Chat { message }) => {
            let reply = juliet_chat::respond(&message);
            println!("{}", serde_json::to_string_pretty(&reply)?);
            Ok(())
        },
        Some(Commands::Render { action }) => {
            render_commands::handle_render(action, &config.render)
        },
    }
}
