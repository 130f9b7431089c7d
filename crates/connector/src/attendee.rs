//! Teilnehmer-Datenmodell und Konferenz-Zustandsspeicher
//!
//! Der Controller pflegt die Teilnehmerliste der laufenden Konferenz ueber
//! das [`KonferenzStatus`]-Trait. Die Host-Anwendung bringt ihren eigenen
//! Speicher mit oder verwendet den mitgelieferten DashMap-basierten
//! [`KonferenzStatusSpeicher`].

use dashmap::DashMap;
use palaver_core::{PeerId, UserId};
use serde::{Deserialize, Serialize};

/// Nachrichtentyp unter dem Teilnehmer-Datensaetze verbreitet werden
pub const NACHRICHT_TEILNEHMER_UPDATE: &str = "attendee_update";

// ---------------------------------------------------------------------------
// Teilnehmer
// ---------------------------------------------------------------------------

/// Vollstaendiger Teilnehmer-Datensatz eines Konferenzplatzes
///
/// `video_element_id` und `extras` sind rein lokale Felder und werden nie
/// an andere Teilnehmer verbreitet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teilnehmer {
    /// Peer-ID beim Signaling-Client
    pub rtcid: PeerId,
    /// Host-Benutzer-ID; bei entfernten Teilnehmern erst nach deren
    /// Broadcast bekannt
    pub benutzer_id: Option<UserId>,
    pub anzeige_name: Option<String>,
    pub avatar: Option<String>,
    /// Mikrofon stummgeschaltet
    pub stumm: bool,
    /// Video abgeschaltet
    pub video_stumm: bool,
    pub spricht: bool,
    /// Zeitzonen-Versatz zu UTC in Minuten (oestlich positiv)
    pub zeitzonen_versatz: i32,
    pub video_element_id: Option<String>,
    #[serde(default)]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

impl Teilnehmer {
    /// Teilnehmer ohne bekannte Host-Identitaet (entfernter Anrufer)
    pub fn neu(rtcid: PeerId) -> Self {
        Self {
            rtcid,
            benutzer_id: None,
            anzeige_name: None,
            avatar: None,
            stumm: false,
            video_stumm: false,
            spricht: false,
            zeitzonen_versatz: 0,
            video_element_id: None,
            extras: serde_json::Map::new(),
        }
    }

    /// Lokaler Teilnehmer mit Host-Identitaet
    pub fn mit_identitaet(rtcid: PeerId, benutzer_id: UserId, anzeige_name: String) -> Self {
        Self {
            benutzer_id: Some(benutzer_id),
            anzeige_name: Some(anzeige_name),
            ..Self::neu(rtcid)
        }
    }

    /// Spielt einen empfangenen Broadcast-Datensatz in diesen Teilnehmer ein
    pub fn broadcast_anwenden(&mut self, update: &TeilnehmerBroadcast) {
        if update.id.is_some() {
            self.benutzer_id = update.id.clone();
        }
        if update.anzeige_name.is_some() {
            self.anzeige_name = update.anzeige_name.clone();
        }
        if update.avatar.is_some() {
            self.avatar = update.avatar.clone();
        }
        self.stumm = update.stumm;
        self.video_stumm = update.video_stumm;
        self.spricht = update.spricht;
        self.zeitzonen_versatz = update.zeitzonen_versatz;
    }
}

/// Broadcast-Projektion eines Teilnehmers
///
/// Strikte Teilmenge von [`Teilnehmer`]: Platznummer, Video-Element und
/// Extras bleiben bewusst draussen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeilnehmerBroadcast {
    pub id: Option<UserId>,
    pub rtcid: PeerId,
    pub anzeige_name: Option<String>,
    pub avatar: Option<String>,
    pub stumm: bool,
    pub video_stumm: bool,
    pub spricht: bool,
    pub zeitzonen_versatz: i32,
}

impl From<&Teilnehmer> for TeilnehmerBroadcast {
    fn from(teilnehmer: &Teilnehmer) -> Self {
        Self {
            id: teilnehmer.benutzer_id.clone(),
            rtcid: teilnehmer.rtcid.clone(),
            anzeige_name: teilnehmer.anzeige_name.clone(),
            avatar: teilnehmer.avatar.clone(),
            stumm: teilnehmer.stumm,
            video_stumm: teilnehmer.video_stumm,
            spricht: teilnehmer.spricht,
            zeitzonen_versatz: teilnehmer.zeitzonen_versatz,
        }
    }
}

// ---------------------------------------------------------------------------
// KonferenzStatus
// ---------------------------------------------------------------------------

/// Konferenz-Zustandsspeicher der Host-Anwendung
///
/// Platz 0 gehoert dem lokalen Teilnehmer, die Plaetze dahinter den
/// entfernten Anrufen (Anruf-Slot + 1). Alle Operationen auf fehlenden
/// Plaetzen oder Peers sind stille No-ops.
pub trait KonferenzStatus: Send + Sync {
    fn teilnehmer_einfuegen(&self, platz: usize, teilnehmer: Teilnehmer);
    fn teilnehmer_entfernen(&self, platz: usize);
    fn teilnehmer_aktualisieren_nach_peer(&self, peer: &PeerId, update: TeilnehmerBroadcast);
    fn stumm_setzen_nach_platz(&self, platz: usize, stumm: bool);
    fn video_stumm_setzen_nach_platz(&self, platz: usize, stumm: bool);
    fn zeitzone_setzen_nach_platz(&self, platz: usize, versatz_minuten: i32);
    fn teilnehmer_nach_peer(&self, peer: &PeerId) -> Option<Teilnehmer>;
}

/// Mitgelieferter In-Memory-Speicher auf DashMap-Basis
///
/// Thread-safe; Clone teilt den inneren Zustand nicht (bewusst: pro
/// Konferenz genau ein Speicher, gehalten als `Arc`).
#[derive(Default)]
pub struct KonferenzStatusSpeicher {
    plaetze: DashMap<usize, Teilnehmer>,
}

impl KonferenzStatusSpeicher {
    /// Erstellt einen leeren Speicher
    pub fn neu() -> Self {
        Self {
            plaetze: DashMap::new(),
        }
    }

    /// Anzahl der belegten Plaetze
    pub fn anzahl(&self) -> usize {
        self.plaetze.len()
    }

    /// Gibt den Teilnehmer auf einem Platz zurueck
    pub fn teilnehmer_nach_platz(&self, platz: usize) -> Option<Teilnehmer> {
        self.plaetze.get(&platz).map(|eintrag| eintrag.clone())
    }
}

impl KonferenzStatus for KonferenzStatusSpeicher {
    fn teilnehmer_einfuegen(&self, platz: usize, teilnehmer: Teilnehmer) {
        tracing::debug!(platz, rtcid = %teilnehmer.rtcid, "Teilnehmer eingefuegt");
        self.plaetze.insert(platz, teilnehmer);
    }

    fn teilnehmer_entfernen(&self, platz: usize) {
        if self.plaetze.remove(&platz).is_some() {
            tracing::debug!(platz, "Teilnehmer entfernt");
        }
    }

    fn teilnehmer_aktualisieren_nach_peer(&self, peer: &PeerId, update: TeilnehmerBroadcast) {
        for mut eintrag in self.plaetze.iter_mut() {
            if eintrag.rtcid == *peer {
                eintrag.broadcast_anwenden(&update);
                return;
            }
        }
        tracing::debug!(peer = %peer, "Update fuer unbekannten Teilnehmer verworfen");
    }

    fn stumm_setzen_nach_platz(&self, platz: usize, stumm: bool) {
        if let Some(mut eintrag) = self.plaetze.get_mut(&platz) {
            eintrag.stumm = stumm;
        }
    }

    fn video_stumm_setzen_nach_platz(&self, platz: usize, stumm: bool) {
        if let Some(mut eintrag) = self.plaetze.get_mut(&platz) {
            eintrag.video_stumm = stumm;
        }
    }

    fn zeitzone_setzen_nach_platz(&self, platz: usize, versatz_minuten: i32) {
        if let Some(mut eintrag) = self.plaetze.get_mut(&platz) {
            eintrag.zeitzonen_versatz = versatz_minuten;
        }
    }

    fn teilnehmer_nach_peer(&self, peer: &PeerId) -> Option<Teilnehmer> {
        self.plaetze
            .iter()
            .find(|eintrag| eintrag.rtcid == *peer)
            .map(|eintrag| eintrag.clone())
    }
}
