//! g203-led CLI: lighting and DPI control for the Logitech G203.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use g203_led_core::command::Command;
use g203_led_core::fields::{BlinkRate, Brightness, Color, Dpi, IntroToggle};
use g203_led_core::session::DeviceSession;
use g203_led_core::transfer::{send_command, SendOptions};
use g203_led_core::{DEFAULT_PID, LOGITECH_VID};

#[derive(Parser)]
#[command(
    name = "g203-led",
    version,
    about = "LED and DPI control for the Logitech G203 Prodigy / Lightsync mouse"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a single static color.
    Solid {
        /// Color as six hex digits, with or without a leading '#'.
        color: String,
    },
    /// Cycle through all colors.
    Cycle {
        /// Cycle time in milliseconds (1000-65535, default 10000).
        rate_ms: Option<String>,
        /// Brightness in percent (1-100, default 100).
        brightness: Option<String>,
    },
    /// Pulse a single color.
    Breathe {
        /// Color as six hex digits, with or without a leading '#'.
        color: String,
        /// Pulse time in milliseconds (1000-65535, default 10000).
        rate_ms: Option<String>,
        /// Brightness in percent (1-100, default 100).
        brightness: Option<String>,
    },
    /// Enable or disable the power-on intro effect.
    Intro {
        /// on, off, 1 or 0.
        state: String,
    },
    /// Set the sensor resolution (200-8000, clamped).
    Dpi {
        /// Dots per inch.
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let (encoded, options, confirmation) = build(command)?;

    let mut session = DeviceSession::open(LOGITECH_VID, DEFAULT_PID)?;
    send_command(&mut session, &encoded, &options)?;
    session.close()?;

    println!("{confirmation}");
    Ok(())
}

/// Validate the arguments and encode the wire command.
///
/// Pure: no device access happens until everything parsed.
fn build(command: Commands) -> Result<(Command, SendOptions, String)> {
    match command {
        Commands::Solid { color } => {
            let color = Color::parse(&color)?;
            Ok((
                Command::solid(color),
                SendOptions::default(),
                format!("Lighting set to solid #{}", color.to_hex()),
            ))
        }
        Commands::Cycle { rate_ms, brightness } => {
            let rate = BlinkRate::parse(rate_ms.as_deref())?;
            let brightness = Brightness::parse(brightness.as_deref())?;
            Ok((
                Command::cycle(rate, brightness),
                SendOptions::default(),
                format!(
                    "Lighting set to color cycle ({} ms, {}%)",
                    rate.as_millis(),
                    brightness.percent()
                ),
            ))
        }
        Commands::Breathe {
            color,
            rate_ms,
            brightness,
        } => {
            let color = Color::parse(&color)?;
            let rate = BlinkRate::parse(rate_ms.as_deref())?;
            let brightness = Brightness::parse(brightness.as_deref())?;
            Ok((
                Command::breathe(color, rate, brightness),
                SendOptions::default(),
                format!(
                    "Lighting set to breathe #{} ({} ms, {}%)",
                    color.to_hex(),
                    rate.as_millis(),
                    brightness.percent()
                ),
            ))
        }
        Commands::Intro { state } => {
            let toggle = IntroToggle::parse(&state)?;
            let word = match toggle {
                IntroToggle::On => "enabled",
                IntroToggle::Off => "disabled",
            };
            Ok((
                Command::intro(toggle),
                SendOptions::default(),
                format!("Intro effect {word}"),
            ))
        }
        Commands::Dpi { value } => {
            let dpi = Dpi::parse(&value)?;
            Ok((
                Command::dpi(dpi),
                SendOptions {
                    bypass_onboard_memory: true,
                    ..Default::default()
                },
                format!("DPI set to {}", dpi.value()),
            ))
        }
    }
}
