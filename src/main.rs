//! The Chosen entry point
//!
//! Parses flags, sets up logging, then hands the terminal to the driver.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use flappy_chosen::clock::FrameClock;
use flappy_chosen::config::Config;
use flappy_chosen::driver::Driver;
use flappy_chosen::theme::{AssetLoader, BuiltinThemes, ManifestLoader, Theme, ThemeAssets};
use flappy_chosen::tui::TerminalFrontend;
use flappy_chosen::AssetError;

const USAGE: &str = "\
Usage: flappy-chosen [OPTIONS]

Options:
  --config <FILE>     JSON config file
  --theme-dir <DIR>   Load <theme>.json manifests from DIR
  --seed <N>          Reproducible gap placement
  --log <FILE>        Write logs to FILE (filter with RUST_LOG)
  --mute              No sound
  --print-config      Print the effective config as JSON and exit
  -h, --help          Show this help

Keys: Space/Up/Enter flap, 1-3 pick a menu entry, q/Esc quit. Mouse clicks work in menus.";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    theme_dir: Option<PathBuf>,
    seed: Option<u64>,
    log: Option<PathBuf>,
    mute: bool,
    print_config: bool,
    help: bool,
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().with_context(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--config" => args.config = Some(value("--config")?.into()),
            "--theme-dir" => args.theme_dir = Some(value("--theme-dir")?.into()),
            "--seed" => {
                let raw = value("--seed")?;
                args.seed = Some(raw.parse().with_context(|| format!("bad seed {raw:?}"))?);
            }
            "--log" => args.log = Some(value("--log")?.into()),
            "--mute" => args.mute = true,
            "--print-config" => args.print_config = true,
            "-h" | "--help" => args.help = true,
            other => bail!("unknown argument {other:?}\n\n{USAGE}"),
        }
    }
    Ok(args)
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // Stderr shares the screen with the game, so only log there on request
    let env = env_logger::Env::default().default_filter_or(if log_file.is_some() {
        "info"
    } else {
        "off"
    });
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Built-in palettes, or manifests from a directory
enum Loader {
    Builtin(BuiltinThemes),
    Manifests(ManifestLoader),
}

impl AssetLoader for Loader {
    fn load(&self, theme: Theme) -> Result<ThemeAssets, AssetError> {
        match self {
            Loader::Builtin(l) => l.load(theme),
            Loader::Manifests(l) => l.load(theme),
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.theme_dir.is_some() {
        config.theme_dir = args.theme_dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.log.is_some() {
        config.log_file = args.log;
    }
    if args.mute {
        config.sound = false;
    }
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_json());
        return Ok(());
    }

    init_logging(config.log_file.as_ref())?;
    log::info!("The Chosen v{}", env!("CARGO_PKG_VERSION"));

    let loader = match &config.theme_dir {
        Some(dir) => Loader::Manifests(ManifestLoader::new(dir)),
        None => Loader::Builtin(BuiltinThemes),
    };
    let clock = FrameClock::new(config.timing.frame());
    let frontend = TerminalFrontend::new(config.sound).context("cannot set up the terminal")?;

    let mut driver = Driver::new(frontend, clock, loader, config);
    driver.run()?;
    Ok(())
}

fn main() -> ExitCode {
    // Errors print after the frontend is dropped and the terminal restored
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("flappy-chosen: {e:#}");
            ExitCode::FAILURE
        }
    }
}
