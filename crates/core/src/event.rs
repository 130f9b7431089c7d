//! Event-Bus zwischen Connector und Host-Anwendung
//!
//! Der Connector meldet Lebenszyklus-Ereignisse (Konferenz verlassen,
//! Verbindung verloren) als explizite Events statt ueber einen versteckten
//! globalen Zustand. Die Host-Anwendung bringt ihren eigenen Bus mit oder
//! verwendet den mitgelieferten [`BroadcastEventBus`] auf tokio-Basis.

use crate::types::KonferenzId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Alle Ereignisse die der Connector an den Host meldet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PalaverEvent {
    /// Die lokale Sitzung hat eine Konferenz verlassen
    KonferenzVerlassen { konferenz_id: KonferenzId },
    /// Die Verbindung zum Signaling-Server ist weggebrochen
    VerbindungGetrennt,
}

impl PalaverEvent {
    /// Gibt den Event-Namen als String zurueck (fuer Logs und Vergleiche)
    pub fn name(&self) -> &'static str {
        match self {
            Self::KonferenzVerlassen { .. } => "konferenz_verlassen",
            Self::VerbindungGetrennt => "verbindung_getrennt",
        }
    }
}

/// Trait fuer den Event-Bus Richtung Host
///
/// Der Connector ist reiner Produzent. Die Empfaenger-Seite gehoert der
/// Host-Anwendung und ist bewusst nicht Teil dieses Traits.
pub trait EventBus: Send + Sync + 'static {
    /// Sendet ein Ereignis an alle Abonnenten
    fn senden(&self, event: PalaverEvent) -> crate::Result<()>;
}

// ---------------------------------------------------------------------------
// BroadcastEventBus
// ---------------------------------------------------------------------------

/// Groesse des Broadcast-Kanals
const EVENT_KANAL_GROESSE: usize = 64;

/// Mitgelieferte Event-Bus-Implementierung via tokio broadcast
///
/// Clone des Busses teilt den inneren Kanal. Ein Senden ohne aktive
/// Abonnenten ist kein Fehler.
#[derive(Clone)]
pub struct BroadcastEventBus {
    tx: broadcast::Sender<PalaverEvent>,
}

impl BroadcastEventBus {
    /// Erstellt einen neuen Bus mit Standard-Kapazitaet
    pub fn neu() -> Self {
        let (tx, _) = broadcast::channel(EVENT_KANAL_GROESSE);
        Self { tx }
    }

    /// Abonniert alle zukuenftigen Ereignisse
    pub fn abonnieren(&self) -> broadcast::Receiver<PalaverEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::neu()
    }
}

impl EventBus for BroadcastEventBus {
    fn senden(&self, event: PalaverEvent) -> crate::Result<()> {
        tracing::debug!(event = event.name(), "Host-Event versendet");
        // SendError heisst nur: momentan kein Abonnent
        let _ = self.tx.send(event);
        Ok(())
    }
}
