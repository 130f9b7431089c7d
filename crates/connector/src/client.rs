//! Schnittstelle zum externen Signaling-Client
//!
//! Der Connector spricht nie direkt mit WebRTC oder dem Signaling-Protokoll,
//! sondern ausschliesslich mit diesem Trait. Die Host-Anwendung bringt die
//! konkrete Anbindung mit; die Tests verwenden einen geskripteten Mock.
//!
//! ## Hoerer-Slots
//!
//! Der Signaling-Client kennt pro Ereignis genau einen Hoerer-Platz
//! ("letzter gewinnt"). Der Connector koppelt an diese Plaetze seine
//! [`ListenerFanout`](crate::fanout::ListenerFanout)-Verteiler.
//! Implementierungen muessen den Hoerer vor dem Aufruf aus dem Slot
//! kopieren, damit ein Hoerer seinen eigenen Slot waehrend der Zustellung
//! neu belegen oder leeren darf.

use crate::bitrate::SdpFilterOptionen;
use crate::gate::AnmeldeFehler;
use crate::host::TransportSocket;
use palaver_core::{KonferenzId, PeerId};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Ereignis- und Callback-Typen
// ---------------------------------------------------------------------------

/// Eine ueber den Signaling-Client empfangene Peer-Nachricht
#[derive(Debug, Clone, PartialEq)]
pub struct PeerNachricht {
    /// Absender der Nachricht
    pub von: PeerId,
    /// Typ-Etikett der Nachricht
    pub typ: String,
    /// Nutzdaten als JSON
    pub daten: serde_json::Value,
}

/// Fehlerobjekt das der Signaling-Client ueber den Fehler-Hoerer meldet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalFehler {
    pub code: String,
    pub text: String,
}

impl SignalFehler {
    pub fn neu(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }
}

impl std::fmt::Display for SignalFehler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.text)
    }
}

/// Eine bei der Geraete-Aufzaehlung gefundene Videoquelle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuelle {
    pub id: String,
    pub beschriftung: String,
}

/// Verbindungsstatus eines Peers aus Sicht des Signaling-Clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbindungsStatus {
    NichtVerbunden,
    WirdVerbunden,
    Verbunden,
}

impl std::fmt::Display for VerbindungsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NichtVerbunden => "nicht verbunden",
            Self::WirdVerbunden => "wird verbunden",
            Self::Verbunden => "verbunden",
        };
        write!(f, "{text}")
    }
}

// Hoerer fuer die Einzelplatz-Slots des Signaling-Clients
pub type TrennungsHoerer = Box<dyn Fn() + Send + Sync>;
pub type DatenkanalHoerer = Box<dyn Fn(&PeerId) + Send + Sync>;
pub type PeerNachrichtHoerer = Box<dyn Fn(&PeerNachricht) + Send + Sync>;
pub type AnrufAbbruchHoerer = Box<dyn Fn(&PeerId, bool) + Send + Sync>;
pub type StromGeschlossenHoerer = Box<dyn Fn(&PeerId, &str) + Send + Sync>;
pub type MediaHoerer = Box<dyn Fn(bool, Option<&str>) + Send + Sync>;
pub type RaumBelegungsHoerer = Box<dyn Fn(&KonferenzId, &[PeerId]) + Send + Sync>;
pub type RaumEintrittsHoerer = Box<dyn Fn(bool, &KonferenzId) + Send + Sync>;
pub type SignalFehlerHoerer = Box<dyn Fn(&SignalFehler) + Send + Sync>;
pub type AnrufSlotHoerer = Box<dyn Fn(&PeerId, usize) + Send + Sync>;

// Einmal-Callbacks fuer asynchrone Ergebnisse
pub type ErgebnisCallback = Box<dyn FnOnce(Result<(), SignalFehler>) + Send>;
pub type AnmeldeCallback = Box<dyn FnOnce(Result<PeerId, AnmeldeFehler>) + Send>;
pub type QuittungsHoerer = Box<dyn FnOnce(serde_json::Value) + Send>;
pub type VideoQuellenCallback = Box<dyn FnOnce(Vec<VideoQuelle>) + Send>;

// ---------------------------------------------------------------------------
// Medien-Oberflaeche
// ---------------------------------------------------------------------------

/// Art einer Medienspur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpurArt {
    Audio,
    Video,
}

/// Eine einzelne Medienspur eines Stroms
///
/// Die Spuren gehoeren dem Signaling-Client; der Connector schaltet sie
/// nur an und aus bzw. stoppt sie beim Verlassen der Konferenz.
pub trait MediaSpur: Send + Sync {
    fn art(&self) -> SpurArt;
    fn ist_aktiv(&self) -> bool;
    fn aktiv_setzen(&self, aktiv: bool);
    fn stoppen(&self);
}

/// Ein lokaler oder entfernter Medienstrom
pub trait MediaStrom: Send + Sync {
    fn spuren(&self) -> Vec<Arc<dyn MediaSpur>>;

    /// Gibt nur die Audiospuren des Stroms zurueck
    fn audio_spuren(&self) -> Vec<Arc<dyn MediaSpur>> {
        self.spuren()
            .into_iter()
            .filter(|spur| spur.art() == SpurArt::Audio)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SignalingClient
// ---------------------------------------------------------------------------

/// Die Gestalt des externen Signaling-Clients
///
/// Methoden blockieren nie; asynchrone Ergebnisse kommen ueber die
/// uebergebenen Callbacks zurueck. `None` als Hoerer leert den Slot.
pub trait SignalingClient: Send + Sync {
    // --- Hoerer-Slots (einfach belegt, letzter gewinnt) ---
    fn trennung_hoerer_setzen(&self, hoerer: Option<TrennungsHoerer>);
    fn datenkanal_offen_hoerer_setzen(&self, hoerer: Option<DatenkanalHoerer>);
    fn datenkanal_zu_hoerer_setzen(&self, hoerer: Option<DatenkanalHoerer>);
    fn peer_hoerer_setzen(&self, hoerer: Option<PeerNachrichtHoerer>);
    fn anruf_abbruch_hoerer_setzen(&self, hoerer: Option<AnrufAbbruchHoerer>);
    fn strom_geschlossen_hoerer_setzen(&self, hoerer: Option<StromGeschlossenHoerer>);
    fn got_media_hoerer_setzen(&self, hoerer: Option<MediaHoerer>);
    fn raum_belegungs_hoerer_setzen(&self, hoerer: Option<RaumBelegungsHoerer>);
    fn raum_eintritts_hoerer_setzen(&self, hoerer: Option<RaumEintrittsHoerer>);
    fn fehler_hoerer_setzen(&self, hoerer: Option<SignalFehlerHoerer>);
    fn anruf_hoerer_setzen(&self, hoerer: Option<AnrufSlotHoerer>);
    fn auflegen_hoerer_setzen(&self, hoerer: Option<AnrufSlotHoerer>);

    // --- Raeume ---
    fn raum_beitreten(&self, raum: &KonferenzId, ergebnis: ErgebnisCallback);
    fn raum_verlassen(&self, raum: &KonferenzId, ergebnis: ErgebnisCallback);
    /// Raeume deren Beitritt bereits angefordert oder vollzogen ist
    fn beigetretene_raeume(&self) -> Vec<KonferenzId>;
    /// Aktuelle Belegung eines Raums; `None` wenn unbekannt
    fn raum_belegung(&self, raum: &KonferenzId) -> Option<Vec<PeerId>>;

    // --- Anrufe ---
    fn anrufen(&self, peer: &PeerId, ergebnis: ErgebnisCallback);
    fn alle_auflegen(&self);
    fn verbindungs_status(&self, peer: &PeerId) -> VerbindungsStatus;
    fn datenkanal_funktioniert(&self, peer: &PeerId) -> bool;
    /// Anzeigename eines Peers; faellt auf die rohe ID zurueck
    fn id_zu_name(&self, peer: &PeerId) -> String;

    // --- Medien ---
    fn kamera_aktivieren(&self, aktiv: bool);
    fn mikrofon_aktivieren(&self, aktiv: bool);
    fn video_aktivieren(&self, aktiv: bool);
    fn datenkanaele_aktivieren(&self, aktiv: bool);
    fn lokaler_strom(&self) -> Option<Arc<dyn MediaStrom>>;
    fn remote_strom(&self, peer: &PeerId) -> Option<Arc<dyn MediaStrom>>;
    fn video_quellen_auflisten(&self, ergebnis: VideoQuellenCallback);
    /// `None`/`None` setzt die Standard-Abmessungen des Clients
    fn video_dims_setzen(&self, breite: Option<u32>, hoehe: Option<u32>);

    // --- Datenversand (drei Transportvarianten) ---
    fn daten_senden(
        &self,
        peer: &PeerId,
        typ: &str,
        daten: &serde_json::Value,
        quittung: Option<QuittungsHoerer>,
    );
    fn daten_senden_p2p(&self, peer: &PeerId, typ: &str, daten: &serde_json::Value);
    fn daten_senden_ws(
        &self,
        peer: &PeerId,
        typ: &str,
        daten: &serde_json::Value,
        quittung: Option<QuittungsHoerer>,
    );

    // --- Sitzung ---
    fn benutzername_setzen(&self, name: &str);
    /// Eigene Peer-ID; erst nach erfolgreicher Anmeldung vorhanden
    fn mein_rtcid(&self) -> Option<PeerId>;
    fn sdp_filter_setzen(
        &self,
        lokal: Option<SdpFilterOptionen>,
        entfernt: Option<SdpFilterOptionen>,
    );
    fn max_p2p_laenge_setzen(&self, laenge: usize);
    /// Bindet eine extern aufgebaute Transportverbindung an den Client
    fn socket_verwenden(&self, socket: Arc<dyn TransportSocket>);
    /// Startet die Signaling-Anwendung und fuehrt die Anmeldung durch
    fn app_starten(
        &self,
        anwendung: &str,
        lokales_video: &str,
        remote_videos: &[String],
        anmeldung: AnmeldeCallback,
    );
}
