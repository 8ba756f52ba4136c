//! Tracing subscriber setup.
//!
//! stdout carries the quote document, so every log line goes to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, LogFormat, Settings};

/// Filter used when `RUST_LOG` is not set
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev | Environment::Staging => "roofestimate=debug,info",
        Environment::Prod => "roofestimate=info,warn",
    }
}

pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&settings.env)));

    let source_location = settings.env.is_dev();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(source_location)
        .with_line_number(source_location);

    let registry = tracing_subscriber::registry().with(filter);
    match settings.log_format {
        LogFormat::Json => registry.with(layer.json().with_current_span(true)).init(),
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Pretty => registry.with(layer.pretty()).init(),
    }

    tracing::debug!(env = ?settings.env, format = ?settings.log_format, "Logging initialized");
}
