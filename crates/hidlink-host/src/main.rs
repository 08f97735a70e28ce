//! hidlink host entry point.
//!
//! Loads the configuration, opens the link to the device and runs the
//! interactive automation loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::parse() + load_config_from()  -- file values, then CLI overrides
//!  └─ AppConfig::validate()
//!  └─ --print-config | --save-config     -- dump or persist, then exit
//!  └─ SerialTransport::open()            -- failure is fatal, no retry
//!  └─ native_cursor()                    -- GetCursorPos / XQueryPointer
//!  └─ AutomationSession                  -- locator, mover, typer, writer
//!  └─ ctrl_c task                        -- sets the shared abort flag
//!  └─ run_interactive() | run_once()
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{bail, Context};
use clap::Parser;
use hidlink_core::{ImeProfile, MotionProfile, ScreenPoint};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hidlink_host::application::{
    automation::{
        run_interactive, AutomationError, AutomationSession, RunOutcome, TargetLocator,
    },
    move_pointer::MovePointerUseCase,
    send_commands::{CommandTransport, CommandWriter, SendError},
    type_text::TypeTextUseCase,
};
use hidlink_host::infrastructure::{
    cursor::native_cursor,
    prompt::ConsoleOperatorPrompt,
    storage::config::{config_file_path, load_config, load_config_from, save_config_to, AppConfig},
    transport::{SerialTransport, StdoutTransport},
    vision::StaticTargetLocator,
};

/// Clicks a target on screen and types text there through a hidlink device.
#[derive(Debug, Parser)]
#[command(name = "hidlink", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, env = "HIDLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Serial port of the device.
    #[arg(long, env = "HIDLINK_PORT")]
    port: Option<String>,

    /// Serial baud rate.
    #[arg(long, env = "HIDLINK_BAUD")]
    baud: Option<u32>,

    /// Text to type after the click.
    #[arg(long)]
    payload: Option<String>,

    /// Template image of the target.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Minimum match similarity, 0 to 1.
    #[arg(long)]
    threshold: Option<f64>,

    /// Search timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Fixed target coordinate `x,y` instead of image search.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    target: Option<ScreenPoint>,

    /// Write command lines to stdout instead of the serial port.
    #[arg(long)]
    dry_run: bool,

    /// Run once without prompting.
    #[arg(long)]
    once: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long, conflicts_with = "print_config")]
    save_config: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = &self.port {
            config.transport.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.transport.baud_rate = baud;
        }
        if let Some(payload) = &self.payload {
            config.typing.payload = payload.clone();
        }
        if let Some(image) = &self.image {
            config.target.image = image.clone();
        }
        if let Some(threshold) = self.threshold {
            config.target.threshold = threshold;
        }
        if let Some(timeout) = self.timeout {
            config.target.search_timeout_secs = timeout;
        }
        if let Some(point) = self.target {
            config.target.fixed_x = Some(point.x);
            config.target.fixed_y = Some(point.y);
        }
    }
}

fn parse_point(s: &str) -> Result<ScreenPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(ScreenPoint::new(x, y))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => load_config().context("loading config")?,
    };
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }
    if cli.save_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => config_file_path().context("resolving the config file path")?,
        };
        save_config_to(&config, &path)
            .with_context(|| format!("saving config to {}", path.display()))?;
        eprintln!("configuration written to {}", path.display());
        return Ok(());
    }

    // Logs go to stderr; stdout carries `--dry-run` command lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("hidlink host starting");

    let locator: Arc<dyn TargetLocator> = match config.target.fixed_point() {
        Some(point) => Arc::new(StaticTargetLocator::new(point)),
        None => bail!(
            "no target locator available: set [target] fixed_x/fixed_y or pass --target x,y"
        ),
    };

    let transport: Arc<dyn CommandTransport> = if cli.dry_run {
        Arc::new(StdoutTransport::new())
    } else {
        Arc::new(
            SerialTransport::open(&config.transport.port, config.transport.baud_rate)
                .context("cannot connect to the device")?,
        )
    };
    let cursor = native_cursor().context("opening the cursor-position source")?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let abort = Arc::new(AtomicBool::new(false));
    let abort_clone = Arc::clone(&abort);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            abort_clone.store(true, Ordering::SeqCst);
        }
    });

    let writer = Arc::new(CommandWriter::new(
        transport,
        config.pacing_profile(),
        Arc::clone(&abort),
    ));
    let session = AutomationSession::new(
        locator,
        Arc::clone(&writer),
        MovePointerUseCase::new(cursor, Arc::clone(&writer), MotionProfile::default()),
        TypeTextUseCase::new(Arc::clone(&writer), ImeProfile::default()),
        config.automation_settings(),
    );
    info!(payload = %config.typing.payload, "ready");

    if cli.once {
        match session.run_once().await {
            Ok(RunOutcome::Completed) => info!("run completed"),
            Ok(RunOutcome::TargetNotFound) => warn!("target not found"),
            Err(AutomationError::Send(SendError::Aborted)) => info!("aborted by operator"),
            Err(e) => return Err(e).context("automation run failed"),
        }
    } else {
        let prompt = ConsoleOperatorPrompt::stdin(Arc::clone(&abort));
        let summary = run_interactive(&session, &prompt)
            .await
            .context("automation loop failed")?;
        info!(
            completed = summary.completed,
            not_found = summary.not_found,
            "hidlink host stopped"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_accepts_negative_and_spaced_values() {
        assert_eq!(parse_point("-20, 340"), Ok(ScreenPoint::new(-20, 340)));
    }

    #[test]
    fn test_parse_point_rejects_missing_comma() {
        assert!(parse_point("100").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_save_config_cannot_be_combined_with_print_config() {
        let result = Cli::try_parse_from(["hidlink", "--save-config", "--print-config"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_saved_overrides_load_back_from_file() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("hidlink-main-{}", std::process::id()));
        let path = dir.join("config.toml");
        let cli = Cli::parse_from(["hidlink", "--save-config", "--baud", "9600"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        // Act
        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        // Assert
        assert!(cli.save_config);
        assert_eq!(loaded.transport.baud_rate, 9600);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cli_overrides_replace_file_values() {
        // Arrange
        let cli = Cli::parse_from([
            "hidlink",
            "--port",
            "/dev/ttyACM0",
            "--payload",
            "hi",
            "--target",
            "10,20",
        ]);
        let mut config = AppConfig::default();

        // Act
        cli.apply(&mut config);

        // Assert
        assert_eq!(config.transport.port, "/dev/ttyACM0");
        assert_eq!(config.typing.payload, "hi");
        assert_eq!(config.target.fixed_point(), Some(ScreenPoint::new(10, 20)));
        assert_eq!(config.transport.baud_rate, 115_200);
    }
}
