//! Schnittstellen zur Host-Anwendung
//!
//! Transportverbindung und Identitaet liefert der Host; der Connector
//! konsumiert beide nur. Der Konferenz-Zustandsspeicher steht in
//! [`attendee`](crate::attendee).

use palaver_core::UserId;
use std::sync::Arc;

/// Opaker Socket-Handle der vom Host aufgebauten Transportverbindung
///
/// Der Connector reicht den Handle unveraendert an den Signaling-Client
/// weiter ([`socket_verwenden`](crate::client::SignalingClient::socket_verwenden)).
pub trait TransportSocket: Send + Sync {
    /// Kurzbeschreibung fuer Logs
    fn beschreibung(&self) -> String;
}

/// Vom Host verwaltete Transportverbindung zum Signaling-Server
pub trait TransportVerbindung: Send + Sync {
    /// Ist die Verbindung im Moment aufgebaut?
    fn ist_verbunden(&self) -> bool;

    /// Ruft den Callback genau einmal auf sobald die Verbindung steht.
    ///
    /// Ist die Verbindung bereits aufgebaut, darf der Callback sofort
    /// (noch im Aufruf) ausgefuehrt werden.
    fn bei_verbindung(&self, callback: Box<dyn FnOnce() + Send>);

    /// Gibt den Socket-Handle fuer den Signaling-Client zurueck
    fn socket(&self) -> Arc<dyn TransportSocket>;
}

/// Identitaet des angemeldeten Host-Benutzers
pub trait Identitaet: Send + Sync {
    fn benutzer_id(&self) -> UserId;
    fn anzeige_name(&self) -> String;
}
