//! palaver-core – Gemeinsame Typen, Traits und Fehlertypen
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die der
//! Palaver-Connector und die Host-Anwendung gemeinsam nutzen:
//! Identifikations-Newtypes, der zentrale Fehler-Enum und der
//! Event-Bus ueber den der Connector Ereignisse an den Host meldet.

pub mod error;
pub mod event;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{PalaverError, Result};
pub use event::{BroadcastEventBus, EventBus, PalaverEvent};
pub use types::{KonferenzId, PeerId, UserId};
