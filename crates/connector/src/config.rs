//! Connector-Konfiguration
//!
//! Wird vom Host aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Connector ohne
//! Konfigurationsdatei lauffaehig ist.

use crate::bitrate::{standard_bitratenprofile, BitratenProfil};
use palaver_core::{PalaverError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vollstaendige Connector-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorKonfiguration {
    /// Anwendungs-Einstellungen fuer den Signaling-Client
    pub anwendung: AnwendungsEinstellungen,
    /// Nachrichten-Einstellungen
    pub nachrichten: NachrichtenEinstellungen,
    /// Bitratenprofile, waehlbar ueber `bandbreite_konfigurieren`
    pub bitraten: BTreeMap<String, BitratenProfil>,
}

impl Default for ConnectorKonfiguration {
    fn default() -> Self {
        Self {
            anwendung: AnwendungsEinstellungen::default(),
            nachrichten: NachrichtenEinstellungen::default(),
            bitraten: standard_bitratenprofile(),
        }
    }
}

/// Anwendungs-Einstellungen fuer den App-Start beim Signaling-Client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnwendungsEinstellungen {
    /// Name unter dem sich der Connector beim Signaling-Dienst anmeldet
    pub name: String,
    /// Element-ID des lokalen Videobilds
    pub lokales_video_id: String,
    /// Element-IDs der entfernten Videobilder (eine pro Anruf-Slot)
    pub remote_video_ids: Vec<String>,
}

impl Default for AnwendungsEinstellungen {
    fn default() -> Self {
        Self {
            name: "palaver".into(),
            lokales_video_id: "video-lokal".into(),
            remote_video_ids: (1..=4).map(|n| format!("video-remote-{n}")).collect(),
        }
    }
}

/// Nachrichten-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NachrichtenEinstellungen {
    /// Maximale Laenge einer P2P-Nachricht in Bytes
    pub max_p2p_laenge: usize,
}

impl Default for NachrichtenEinstellungen {
    fn default() -> Self {
        Self {
            max_p2p_laenge: 10_000,
        }
    }
}

impl ConnectorKonfiguration {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str(&inhalt).map_err(|e| {
                PalaverError::Konfiguration(format!("'{pfad}' nicht lesbar: {e}"))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(PalaverError::Konfiguration(format!(
                "'{pfad}' nicht lesbar: {e}"
            ))),
        }
    }
}
