//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar ueber [`LogOptionen`] oder per Umgebungsvariable:
//! - `PV_LOG_LEVEL`: Log-Level (trace/debug/info/warn/error), Standard: info
//! - `PV_LOG_FORMAT`: Format (text/json), Standard: text
//!
//! Umgebungsvariablen gewinnen gegenueber programmatisch gesetzten Optionen.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Optionen fuer die Logging-Initialisierung
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptionen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "text" oder "json"
    pub format: String,
}

impl Default for LogOptionen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl LogOptionen {
    /// Wendet `PV_LOG_LEVEL` und `PV_LOG_FORMAT` auf die Optionen an
    pub fn mit_umgebung(mut self) -> Self {
        if let Ok(level) = std::env::var("PV_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = std::env::var("PV_LOG_FORMAT") {
            self.format = format;
        }
        self
    }

    /// Prueft ob Level und Format gueltige Werte tragen
    pub fn ist_gueltig(&self) -> bool {
        matches!(
            self.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) && matches!(self.format.as_str(), "text" | "json")
    }
}

/// Initialisiert das Logging-System fuer eine Host-Anwendung.
///
/// Ungueltige Optionen fallen auf `info` / `text` zurueck.
pub fn logging_initialisieren(optionen: &LogOptionen) {
    let optionen = if optionen.ist_gueltig() {
        optionen.clone()
    } else {
        LogOptionen::default()
    };

    let filter = EnvFilter::try_new(&optionen.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match optionen.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Initialisiert Logging fuer Tests.
///
/// Mehrfachaufruf ist erlaubt (jeder weitere Aufruf ist ein No-op),
/// damit jeder Integrationstest die Initialisierung anstossen darf.
pub fn logging_fuer_tests() {
    let filter = EnvFilter::try_from_env("PV_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
