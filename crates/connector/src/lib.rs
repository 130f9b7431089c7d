//! palaver-connector – Bruecke zwischen Host-Konferenz und Signaling-Client
//!
//! Dieses Crate verbindet die Host-Anwendung mit einem externen
//! WebRTC-Signaling-Client. Es verhandelt selbst kein WebRTC und spricht
//! kein Signaling-Protokoll; beides bleibt hinter dem
//! [`SignalingClient`]-Trait.
//!
//! ## Architektur
//!
//! ```text
//! Host-Anwendung
//!     |
//!     v
//! SessionController
//!     |  Zustand: Bereit -> WartetAufTransport -> AnmeldungLaeuft -> Verbunden
//!     |
//!     +-- ConnectionGate   (Anmeldeergebnis, beliebig oft abwartbar)
//!     +-- ListenerFanout   (Einzelplatz-Callbacks -> Pub/Sub)
//!     +-- KonferenzStatus  (Teilnehmerliste der Konferenz)
//!     |
//!     v
//! SignalingClient (extern)     TransportVerbindung (extern)
//! ```

pub mod attendee;
pub mod bitrate;
pub mod client;
pub mod config;
pub mod fanout;
pub mod gate;
pub mod host;
pub mod session;

// Bequeme Re-Exporte
pub use attendee::{
    KonferenzStatus, KonferenzStatusSpeicher, Teilnehmer, TeilnehmerBroadcast,
    NACHRICHT_TEILNEHMER_UPDATE,
};
pub use bitrate::{standard_bitratenprofile, BitratenProfil, SdpFilterOptionen};
pub use client::{
    MediaSpur, MediaStrom, PeerNachricht, SignalFehler, SignalingClient, SpurArt,
    VerbindungsStatus, VideoQuelle,
};
pub use config::ConnectorKonfiguration;
pub use fanout::{ListenerFanout, ListenerHandle};
pub use gate::{AnmeldeFehler, ConnectionGate};
pub use host::{Identitaet, TransportSocket, TransportVerbindung};
pub use session::{SessionController, SitzungsZustand, VerbindungsCallback};
