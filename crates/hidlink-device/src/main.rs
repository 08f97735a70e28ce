//! hidlink device entry point.
//!
//! Opens the command source, picks an emulator, and runs the read loop until
//! Ctrl-C or end of input.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::parse()                 -- port / baud / --stdin / --emulator
//!  └─ native_emulator() | LoggingEmulator
//!  └─ SerialByteSource | StdinByteSource
//!  └─ spawn_blocking(serve)        -- poll → feed → execute, one line at a time
//!  └─ ctrl_c task                  -- clears the shared `running` flag
//! ```
//!
//! # Why `spawn_blocking`? (for beginners)
//!
//! Serial and stdin reads are blocking calls.  Running the read loop on
//! Tokio's blocking pool keeps the runtime free to deliver the Ctrl-C
//! signal, which flips an `AtomicBool` that the loop checks on every poll.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hidlink_device::application::{
    interpret::{CommandInterpreter, HidEmulator},
    serve::{serve, ByteSource},
};
use hidlink_device::infrastructure::{
    byte_source::{SerialByteSource, StdinByteSource},
    input_emulation::{logging::LoggingEmulator, native_emulator},
};

/// Which emulator executes received commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmulatorKind {
    /// The operating system's input injection API.
    Native,
    /// Log every event instead of injecting it.
    Log,
}

/// Executes hidlink line commands as keyboard and pointer input.
#[derive(Debug, Parser)]
#[command(name = "hidlink-device", version, about)]
struct Cli {
    /// Serial port the host writes commands to.
    #[arg(long, default_value = "COM5", env = "HIDLINK_PORT")]
    port: String,

    /// Serial baud rate.
    #[arg(long, default_value_t = 115_200, env = "HIDLINK_BAUD")]
    baud: u32,

    /// Read commands from standard input instead of the serial port.
    #[arg(long)]
    stdin: bool,

    /// Emulator backend.
    #[arg(long, value_enum, default_value_t = EmulatorKind::Native)]
    emulator: EmulatorKind,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(?cli, "hidlink device starting");

    let emulator: Arc<dyn HidEmulator> = match cli.emulator {
        EmulatorKind::Native => native_emulator().context("opening the input emulator")?,
        EmulatorKind::Log => Arc::new(LoggingEmulator::new()),
    };

    let mut source: Box<dyn ByteSource> = if cli.stdin {
        Box::new(StdinByteSource::new())
    } else {
        Box::new(
            SerialByteSource::open(&cli.port, cli.baud)
                .with_context(|| format!("opening serial port {}", cli.port))?,
        )
    };

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::SeqCst);
        }
    });

    info!("listening for commands");
    let mut interpreter = CommandInterpreter::new(emulator);
    let stats = tokio::task::spawn_blocking(move || {
        serve(source.as_mut(), &mut interpreter, &running)
    })
    .await
    .context("read loop panicked")?;

    info!(
        executed = stats.executed,
        dropped = stats.dropped,
        failed = stats.failed,
        read_errors = stats.read_errors,
        "hidlink device stopped"
    );
    Ok(())
}
