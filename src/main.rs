use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use vicsnap::config::SystemConfig;
use vicsnap::render::{blanking, canvas_to_image};
use vicsnap::{UltimateClient, acquire, dump, render_pipeline};

/// Capture the screen of a running Ultimate 64 / Ultimate-II+ as a PNG.
#[derive(Parser)]
#[command(name = "vicsnap", disable_version_flag = true)]
struct Args {
    /// Device address, e.g. 192.168.1.64. Defaults to the configured host.
    host: Option<String>,

    /// Output file
    #[arg(default_value = "screenshot.png")]
    output: PathBuf,

    /// Don't add the border around the screen
    #[arg(long)]
    no_border: bool,

    /// Don't draw hardware sprites
    #[arg(long)]
    no_sprites: bool,

    /// Read ROM-shadowed graphics directly instead of running the NMI copy
    #[arg(long)]
    no_bypass: bool,

    /// Integer upscale factor
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
    upscale: Option<u32>,

    /// Network password, sent as X-Password
    #[arg(long)]
    password: Option<String>,

    /// How long the machine runs while the NMI copy executes
    #[arg(long)]
    bypass_wait_ms: Option<u64>,

    /// Write the raw register and memory blocks into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Remember host and password as the defaults
    #[arg(long)]
    save_config: bool,

    /// More output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
        );
        return Ok(());
    }

    let level = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    check_extension(&args.output)?;

    let mut config = SystemConfig::load();
    let mut options = config.capture_options();
    options.border &= !args.no_border;
    options.sprites &= !args.no_sprites;
    options.bypass = !args.no_bypass;
    if let Some(upscale) = args.upscale {
        options.upscale = upscale;
    }
    let mut bypass = config.bypass;
    if let Some(wait_ms) = args.bypass_wait_ms {
        bypass.wait_ms = wait_ms;
    }

    let Some(host) = args.host.clone().or_else(|| config.default_host.clone()) else {
        bail!("No device address given and no default host configured");
    };
    let password = args.password.clone().or_else(|| config.password.clone());

    if args.save_config {
        config.default_host = Some(host.clone());
        config.password = password.clone();
        config.save()?;
        if let Some(path) = SystemConfig::path() {
            log::info!("Saved defaults to {}", path.display());
        }
    }

    let mut client = UltimateClient::new(&host, password)?;
    log::info!("Connecting to {}", client.base_url());

    let snapshot = acquire(&mut client, &options, &bypass)
        .with_context(|| format!("Capture from {} failed", host))?;

    for line in snapshot
        .state
        .describe()
        .into_iter()
        .chain(blanking::describe(&snapshot.state))
    {
        log::info!("{}", line);
    }

    if let Some(dir) = &args.dump_dir {
        let written = dump::write_debug_files(dir, &snapshot)?;
        log::info!("Wrote {} debug files to {}", written.len(), dir.display());
    }

    let output = render_pipeline(&snapshot.state, &snapshot.blocks, &options)?;
    for warning in &output.warnings {
        log::warn!("{}", warning);
    }

    let image = canvas_to_image(&output.canvas, options.upscale);
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let warning_count = snapshot.warnings.len() + output.warnings.len();
    println!(
        "Saved {} ({}x{}){}",
        args.output.display(),
        image.width(),
        image.height(),
        if warning_count > 0 {
            format!(", {} warning(s)", warning_count)
        } else {
            String::new()
        }
    );
    Ok(())
}

/// Output is always PNG-encoded, so refuse names that suggest otherwise.
fn check_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if ext.as_deref() != Some("png") {
        bail!(
            "Output file '{}' must have a .png extension",
            path.display()
        );
    }
    Ok(())
}
