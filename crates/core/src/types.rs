//! Gemeinsame Identifikationstypen fuer den Palaver-Connector
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! verschiedenen ID-Arten zur Compilezeit auszuschliessen. Anders als
//! serverseitig vergebene UUIDs sind diese IDs opake Strings: Peer-IDs
//! gehoeren dem Signaling-Client, Konferenz- und Benutzer-IDs dem Host.

use serde::{Deserialize, Serialize};

/// Opake Kennung eines entfernten Sitzungsteilnehmers
///
/// Wird ausschliesslich vom Signaling-Client vergeben und hier nur
/// nachgeschlagen, nie erzeugt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(String);

impl PeerId {
    /// Uebernimmt eine vom Signaling-Client gelieferte Kennung
    pub fn neu(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Gibt die Kennung als String-Slice zurueck
    pub fn als_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PeerId {
    fn from(id: &str) -> Self {
        Self::neu(id)
    }
}

/// Kennung einer Konferenz (entspricht dem Raumnamen beim Signaling)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KonferenzId(String);

impl KonferenzId {
    /// Uebernimmt eine vom Host vergebene Konferenz-Kennung
    pub fn neu(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Gibt die Kennung als String-Slice zurueck
    pub fn als_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KonferenzId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KonferenzId {
    fn from(id: &str) -> Self {
        Self::neu(id)
    }
}

/// Kennung eines Host-Benutzers (Session-Provider des Hosts)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Uebernimmt eine vom Host vergebene Benutzer-Kennung
    pub fn neu(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Gibt die Kennung als String-Slice zurueck
    pub fn als_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::neu(id)
    }
}
