//! Fehlertypen fuer den Palaver-Connector
//!
//! Zentraler Fehler-Enum der alle moeglichen Fehlerzustaende abdeckt.
//! Erwartete Fehlpfade (Anmeldung abgelehnt, Transport weg) werden ueber
//! Callbacks bzw. das Verbindungs-Gate gemeldet, nie via Panic.

use thiserror::Error;

/// Globaler Result-Alias fuer Palaver
pub type Result<T> = std::result::Result<T, PalaverError>;

/// Alle moeglichen Fehler im Palaver-Connector
#[derive(Debug, Error)]
pub enum PalaverError {
    // --- Verbindung & Signaling ---
    #[error("Anmeldung fehlgeschlagen ({code}): {nachricht}")]
    Anmeldung { code: String, nachricht: String },

    #[error("Verbindung getrennt: {0}")]
    Getrennt(String),

    #[error("Transport nicht verbunden: {0}")]
    Transport(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    // --- Nachrichten ---
    #[error("Ungueltige Nachricht: {0}")]
    UngueltigeNachricht(String),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl PalaverError {
    /// Erstellt einen Anmeldefehler aus Code und Klartext
    pub fn anmeldung(code: impl Into<String>, nachricht: impl Into<String>) -> Self {
        Self::Anmeldung {
            code: code.into(),
            nachricht: nachricht.into(),
        }
    }

    /// Erstellt einen internen Fehler aus einer beliebigen Nachricht
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn ein erneuter Verbindungsversuch sinnvoll ist
    pub fn ist_wiederholbar(&self) -> bool {
        matches!(self, Self::Getrennt(_) | Self::Transport(_))
    }
}
