// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process settings loaded from environment variables.

use planform_geometry::LengthUnit;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Settings that do not belong in the per-building configuration file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Overrides the drawing unit of every configuration file.
    pub units: Option<LengthUnit>,
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var("PLANFORM_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".into()),
            log_format: match std::env::var("PLANFORM_LOG_FORMAT")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Compact,
            },
            units: std::env::var("PLANFORM_UNITS")
                .ok()
                .and_then(|u| match u.parse() {
                    Ok(unit) => Some(unit),
                    Err(e) => {
                        eprintln!("ignoring PLANFORM_UNITS: {e}");
                        None
                    }
                }),
        }
    }

    /// Install the global tracing subscriber.
    pub fn init_logging(&self) {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter.as_str())
            .with_writer(std::io::stderr);
        match self.log_format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Pretty => builder.pretty().init(),
            LogFormat::Compact => builder.compact().init(),
        }
    }
}
