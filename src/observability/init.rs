//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber: an `EnvFilter` built from the
//! configured level and a plain-text `fmt` layer writing to the host console
//! with `chrono` timestamps.

use std::fmt;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::console_writer::ConsoleWriter;
use crate::Config;

/// Level used when the configuration names none.
const DEFAULT_LEVEL: &str = "info";

/// Wall-clock timestamps from `chrono`, which works on `wasm32` where
/// `std::time::SystemTime` does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTimer;

impl FormatTime for ChronoTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Utc::now().format("%H:%M:%S%.3f"))
    }
}

/// Initializes the tracing subscriber.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters spans and events by the configured level
/// 2. Formats events as single plain-text lines (no ANSI colours)
/// 3. Writes each line to the browser console, or stderr off-browser
///
/// # Parameters
///
/// * `config` - Configuration containing the `trace_level` directive
///
/// # Trace Level Resolution
///
/// 1. `config.trace_level` if set (any `EnvFilter` directive, e.g.
///    `"place_actions=debug"`)
/// 2. Default: `"info"`
///
/// An unparsable directive falls back to the default.
///
/// # Initialization Behavior
///
/// Idempotent: only the first call installs a subscriber, later calls (or a
/// subscriber installed by the embedder) are left in place.
///
/// # Example
///
/// ```rust
/// use place_actions::observability::init_tracing;
/// use place_actions::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_timer(ChronoTimer)
        .with_writer(ConsoleWriter);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}
