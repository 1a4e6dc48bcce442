use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "yeargrid", version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the wallpaper and write it as a PNG.
    Render(RenderArgs),
    /// Print the resolved day count and grid layout as JSON without rendering.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Wallpaper configuration JSON. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render for this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output PNG path, overriding the configuration.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Supersampling factor, overriding the configuration.
    #[arg(long)]
    scale: Option<u32>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "yeargrid=debug,info"
    } else {
        "yeargrid=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Config file (or defaults) plus the directory relative asset paths resolve against.
fn load_config(common: &CommonArgs) -> anyhow::Result<(yeargrid::WallpaperConfig, PathBuf)> {
    match &common.config {
        Some(path) => {
            let cfg = yeargrid::WallpaperConfig::from_path(path)?;
            let root = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            Ok((cfg, root))
        }
        None => Ok((yeargrid::WallpaperConfig::default(), PathBuf::from("."))),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut cfg, assets_root) = load_config(&args.common)?;
    if let Some(out) = args.out {
        cfg.out = out;
    }
    if let Some(scale) = args.scale {
        cfg.scale = scale;
    }

    let date = yeargrid::resolve_date(&cfg, args.common.date)?;
    let plan = yeargrid::plan(&cfg, date)?;
    let rendered = yeargrid::render(&cfg, &plan, &assets_root)?;
    yeargrid::write_png(&rendered.frame, &cfg.out)
        .with_context(|| format!("save wallpaper '{}'", cfg.out.display()))?;

    tracing::info!("{}", yeargrid::summary(&plan, &cfg, &cfg.out));
    eprintln!("wrote {}", cfg.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (cfg, _) = load_config(&args.common)?;
    let date = yeargrid::resolve_date(&cfg, args.common.date)?;
    let plan = yeargrid::plan(&cfg, date)?;
    let json = serde_json::to_string_pretty(&plan).context("serialize render plan")?;
    println!("{json}");
    Ok(())
}
