use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ledmatrix::{
    Command, CommandKind, Config, Dimmer, Engine, EngineOptions, MemorySink, PixelSink,
    Resources, Screen, TerminalSink, default_registry,
};

#[derive(Parser, Debug)]
#[command(name = "ledmatrix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run the engine, reading `<kind> <name>` commands from stdin.
    Run(RunArgs),
    /// Print the renderers each command kind accepts.
    List(ListArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where frames go.
    #[arg(long, value_enum, default_value_t = SinkChoice::Terminal)]
    sink: SinkChoice,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SinkChoice {
    /// Half-block rendering on a true-color terminal.
    Terminal,
    /// Keep only the latest frame in memory (headless runs).
    Memory,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Run(args) => cmd_run(args),
        Cmd::List(args) => cmd_list(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(Config::default()),
    }
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let registry = default_registry(Resources::from_config(&config));
    for kind in CommandKind::ALL {
        let names = registry.names(kind);
        let mut line = names.join(", ");
        if registry.has_fallback(kind) {
            let any = match kind {
                CommandKind::Image => {
                    format!("<any name under {}>", config.assets.images_dir.display())
                }
                CommandKind::Gif | CommandKind::GifOnce => {
                    format!("<any name under {}>", config.assets.gifs_dir.display())
                }
                _ => "<any name>".to_string(),
            };
            if !line.is_empty() {
                line.push_str(", ");
            }
            line.push_str(&any);
        }
        println!("{kind}: {line}");
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")?;
    let result = runtime.block_on(run(config, args.sink));
    // stdin reads block a worker thread; do not wait for them
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(config: Config, choice: SinkChoice) -> anyhow::Result<()> {
    let (width, height) = config.geometry();
    info!(
        width,
        height,
        brightness = config.display.brightness,
        hardware_mapping = %config.display.hardware_mapping,
        "display configured"
    );

    let sink: Box<dyn PixelSink> = match choice {
        SinkChoice::Terminal => Box::new(TerminalSink::stdout(width, height)),
        SinkChoice::Memory => Box::new(MemorySink::bounded(width, height, 1).0),
    };
    let screen = Screen::new(Dimmer::new(sink, config.display.brightness));
    let registry = default_registry(Resources::from_config(&config));

    let root = CancellationToken::new();
    let (tx, rx) = mpsc::channel(config.engine.command_buffer);
    tokio::spawn(read_commands(tx, root.clone()));

    let on_signal = root.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupted");
                on_signal.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for ctrl-c"),
        }
    });

    Engine::run(
        screen,
        registry,
        EngineOptions::from(&config.engine),
        rx,
        root,
    )
    .await
    .context("engine stopped")
}

/// Forward stdin lines as commands. Blank lines and `#` comments are skipped.
async fn read_commands(tx: mpsc::Sender<Command>, root: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = root.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    match line.parse::<Command>() {
                        Ok(cmd) => {
                            if tx.send(cmd).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, "ignoring input line"),
                    }
                }
                Ok(None) => {
                    info!("stdin closed");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            },
        }
    }
}
