//! Tracing subscriber setup shared by the command-line tools.
//!
//! The library itself only emits `tracing` events; nothing is printed until a
//! binary (or a test) installs a subscriber through [`init_tracing`].

use std::io;
use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { default_level: LogLevel::Warn, module_filters: Vec::new(), show_targets: false }
    }
}

impl TracingConfig {
    /// Default config with generation events raised to `level`.
    pub fn with_generation_level(level: LogLevel) -> Self {
        Self {
            module_filters: vec![("depthgen_core::mapgen".to_string(), level)],
            ..Self::default()
        }
    }

    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{module}={}", level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a compact stderr subscriber. `RUST_LOG` overrides the configured
/// filter. Only the first call has any effect.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(show_targets)
            .compact();

        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = subscriber.try_init();
    });
}
