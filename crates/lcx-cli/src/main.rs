/*
[INPUT]:  CLI arguments, optional YAML configuration file, OS shutdown signals
[OUTPUT]: Exchange responses printed as JSON on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or shutdown handling
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lcx_adapter::{
    ClientConfig, CoinBalancePayload, LcxClient, LcxWebSocket, MarketTickerPayload,
    OpenOrdersPayload, OrderBookPayload,
};
use lcx_cli::{CliConfig, WatchTopic, watch};

#[derive(Parser, Debug)]
#[command(name = "lcx", version, about = "LCX exchange command-line client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Validate the configuration and exit without contacting the exchange
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all trading pairs
    Pairs,
    /// Tickers for every pair
    Tickers,
    /// Ticker for one pair
    Ticker { pair: String },
    /// Order book snapshot for one pair
    Book { pair: String },
    /// Balances of every coin
    Balances,
    /// Balance of one coin
    Balance { coin: String },
    /// Open orders, optionally filtered by pair
    OpenOrders {
        #[arg(long)]
        pair: Option<String>,
        #[arg(long, default_value_t = 1)]
        offset: u32,
    },
    /// Stream a realtime topic as JSON lines until interrupted
    Watch {
        #[arg(value_enum)]
        topic: WatchTopic,
        #[arg(long)]
        pair: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    let client_config = config.client_config();
    info!(
        exchange = %client_config.base_urls.exchange,
        authenticated = client_config.credentials.is_complete(),
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    match args.command {
        Command::Watch { topic, pair } => run_watch(&client_config, topic, pair).await,
        command => {
            let response = run_rest(&client_config, command).await?;
            let text = serde_json::to_string_pretty(&response).context("format response")?;
            println!("{text}");
            Ok(())
        }
    }
}

async fn run_rest(config: &ClientConfig, command: Command) -> Result<Value> {
    let client = LcxClient::with_config(config.clone()).context("build http client")?;
    let response = match command {
        Command::Pairs => client.market_pairs().await?,
        Command::Tickers => client.market_tickers().await?,
        Command::Ticker { pair } => client.market_ticker(&MarketTickerPayload { pair }).await?,
        Command::Book { pair } => client.order_book(&OrderBookPayload { pair }).await?,
        Command::Balances => client.balances().await?,
        Command::Balance { coin } => client.balance(&CoinBalancePayload { coin }).await?,
        Command::OpenOrders { pair, offset } => {
            let payload = OpenOrdersPayload {
                pair,
                offset,
                ..Default::default()
            };
            client.open_orders(&payload).await?
        }
        Command::Watch { .. } => return Err(anyhow!("watch is not a REST command")),
    };
    Ok(response)
}

async fn run_watch(config: &ClientConfig, topic: WatchTopic, pair: Option<String>) -> Result<()> {
    let topic = topic.into_topic(pair.as_deref())?;
    let mut ws = LcxWebSocket::with_config(config).context("build websocket client")?;

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let mut stdout = std::io::stdout().lock();
    let written = watch::watch_topic(&mut ws, topic, &shutdown, &mut stdout).await?;
    info!(messages = written, "watch finished");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<CliConfig> {
    match path {
        Some(path) => CliConfig::from_file(path).context("load config"),
        None => Ok(CliConfig::default()),
    }
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
