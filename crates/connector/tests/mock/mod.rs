#![allow(dead_code)]
//! Geskriptete Mock-Kollaborateure fuer die Integrationstests
//!
//! Der Mock-Client haelt jeden Hoerer-Slot als `Arc` und feuert immer
//! auf einem Schnappschuss, damit Hoerer ihren eigenen Slot waehrend
//! der Zustellung neu belegen duerfen (wie es der echte Client muss).

use palaver_connector::bitrate::SdpFilterOptionen;
use palaver_connector::client::*;
use palaver_connector::gate::AnmeldeFehler;
use palaver_connector::host::{Identitaet, TransportSocket, TransportVerbindung};
use palaver_connector::{ConnectorKonfiguration, KonferenzStatusSpeicher, SessionController};
use palaver_core::{BroadcastEventBus, KonferenzId, PeerId, UserId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Medien-Mocks
// ---------------------------------------------------------------------------

pub struct MockSpur {
    art: SpurArt,
    aktiv: AtomicBool,
    gestoppt: AtomicBool,
}

impl MockSpur {
    pub fn neu(art: SpurArt) -> Arc<Self> {
        Arc::new(Self {
            art,
            aktiv: AtomicBool::new(true),
            gestoppt: AtomicBool::new(false),
        })
    }

    pub fn ist_gestoppt(&self) -> bool {
        self.gestoppt.load(Ordering::SeqCst)
    }
}

impl MediaSpur for MockSpur {
    fn art(&self) -> SpurArt {
        self.art
    }

    fn ist_aktiv(&self) -> bool {
        self.aktiv.load(Ordering::SeqCst)
    }

    fn aktiv_setzen(&self, aktiv: bool) {
        self.aktiv.store(aktiv, Ordering::SeqCst);
    }

    fn stoppen(&self) {
        self.gestoppt.store(true, Ordering::SeqCst);
    }
}

pub struct MockStrom {
    pub spuren: Vec<Arc<MockSpur>>,
}

impl MockStrom {
    pub fn neu(spuren: Vec<Arc<MockSpur>>) -> Arc<Self> {
        Arc::new(Self { spuren })
    }
}

impl MediaStrom for MockStrom {
    fn spuren(&self) -> Vec<Arc<dyn MediaSpur>> {
        self.spuren
            .iter()
            .map(|spur| Arc::clone(spur) as Arc<dyn MediaSpur>)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// MockSignalingClient
// ---------------------------------------------------------------------------

#[derive(Default)]
struct HoererSlots {
    trennung: Mutex<Option<Arc<dyn Fn() + Send + Sync>>>,
    datenkanal_offen: Mutex<Option<Arc<dyn Fn(&PeerId) + Send + Sync>>>,
    datenkanal_zu: Mutex<Option<Arc<dyn Fn(&PeerId) + Send + Sync>>>,
    peer: Mutex<Option<Arc<dyn Fn(&PeerNachricht) + Send + Sync>>>,
    anruf_abbruch: Mutex<Option<Arc<dyn Fn(&PeerId, bool) + Send + Sync>>>,
    strom_geschlossen: Mutex<Option<Arc<dyn Fn(&PeerId, &str) + Send + Sync>>>,
    got_media: Mutex<Option<Arc<dyn Fn(bool, Option<&str>) + Send + Sync>>>,
    raum_belegung: Mutex<Option<Arc<dyn Fn(&KonferenzId, &[PeerId]) + Send + Sync>>>,
    raum_eintritt: Mutex<Option<Arc<dyn Fn(bool, &KonferenzId) + Send + Sync>>>,
    fehler: Mutex<Option<Arc<dyn Fn(&SignalFehler) + Send + Sync>>>,
    anruf: Mutex<Option<Arc<dyn Fn(&PeerId, usize) + Send + Sync>>>,
    auflegen: Mutex<Option<Arc<dyn Fn(&PeerId, usize) + Send + Sync>>>,
}

/// Aufzeichnung eines Datenversands
#[derive(Debug, Clone, PartialEq)]
pub struct Versand {
    pub variante: &'static str,
    pub peer: PeerId,
    pub typ: String,
    pub daten: serde_json::Value,
}

#[derive(Default)]
pub struct MockSignalingClient {
    slots: HoererSlots,

    // Geskripteter Zustand
    pub mitglied: Mutex<Vec<KonferenzId>>,
    pub belegungen: Mutex<HashMap<KonferenzId, Vec<PeerId>>>,
    pub funktionierende_kanaele: Mutex<HashSet<PeerId>>,
    pub video_quellen: Mutex<Vec<VideoQuelle>>,
    pub lokal: Mutex<Option<Arc<MockStrom>>>,
    pub remote: Mutex<HashMap<PeerId, Arc<MockStrom>>>,
    pub namen: Mutex<HashMap<PeerId, String>>,
    eigene_id: Mutex<Option<PeerId>>,

    // Aufzeichnungen
    pub beitritte: Mutex<Vec<KonferenzId>>,
    pub angerufen: Mutex<Vec<PeerId>>,
    pub auflegungen: AtomicU32,
    pub gesendet: Mutex<Vec<Versand>>,
    pub benutzername: Mutex<Option<String>>,
    pub sdp_filter: Mutex<Option<(Option<SdpFilterOptionen>, Option<SdpFilterOptionen>)>>,
    pub max_p2p_laenge: Mutex<Option<usize>>,
    pub datenkanaele: Mutex<Option<bool>>,
    pub video: Mutex<Option<bool>>,
    pub kamera: Mutex<Option<bool>>,
    pub mikrofon: Mutex<Option<bool>>,
    pub socket_gebunden: AtomicBool,
    pub app_start: Mutex<Option<(String, String, Vec<String>)>>,
    anmeldung: Mutex<Option<AnmeldeCallback>>,
}

impl MockSignalingClient {
    pub fn neu() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // --- Skript-Helfer ---

    pub fn belegung_setzen(&self, raum: &KonferenzId, peers: Vec<PeerId>) {
        self.belegungen.lock().insert(raum.clone(), peers);
    }

    pub fn kanal_funktioniert_setzen(&self, peer: &PeerId) {
        self.funktionierende_kanaele.lock().insert(peer.clone());
    }

    pub fn app_gestartet(&self) -> bool {
        self.app_start.lock().is_some()
    }

    // --- Ereignisse ausloesen ---

    pub fn anmeldung_erfolgreich(&self, rtcid: &str) {
        let cb = self.anmeldung.lock().take().expect("app_starten fehlt");
        *self.eigene_id.lock() = Some(PeerId::neu(rtcid));
        cb(Ok(PeerId::neu(rtcid)));
    }

    pub fn anmeldung_fehlgeschlagen(&self, code: &str, nachricht: &str) {
        let cb = self.anmeldung.lock().take().expect("app_starten fehlt");
        cb(Err(AnmeldeFehler::neu(code, nachricht)));
    }

    pub fn feuere_trennung(&self) {
        let hoerer = self.slots.trennung.lock().clone();
        if let Some(h) = hoerer {
            h();
        }
    }

    pub fn feuere_datenkanal_offen(&self, peer: &PeerId) {
        let hoerer = self.slots.datenkanal_offen.lock().clone();
        if let Some(h) = hoerer {
            h(peer);
        }
    }

    pub fn feuere_datenkanal_zu(&self, peer: &PeerId) {
        let hoerer = self.slots.datenkanal_zu.lock().clone();
        if let Some(h) = hoerer {
            h(peer);
        }
    }

    pub fn feuere_peer_nachricht(&self, nachricht: &PeerNachricht) {
        let hoerer = self.slots.peer.lock().clone();
        if let Some(h) = hoerer {
            h(nachricht);
        }
    }

    pub fn feuere_raum_belegung(&self, raum: &KonferenzId, belegung: &[PeerId]) {
        let hoerer = self.slots.raum_belegung.lock().clone();
        if let Some(h) = hoerer {
            h(raum, belegung);
        }
    }

    pub fn feuere_raum_eintritt(&self, eintritt: bool, raum: &KonferenzId) {
        let hoerer = self.slots.raum_eintritt.lock().clone();
        if let Some(h) = hoerer {
            h(eintritt, raum);
        }
    }

    pub fn feuere_anruf(&self, peer: &PeerId, slot: usize) {
        let hoerer = self.slots.anruf.lock().clone();
        if let Some(h) = hoerer {
            h(peer, slot);
        }
    }

    pub fn feuere_auflegen(&self, peer: &PeerId, slot: usize) {
        let hoerer = self.slots.auflegen.lock().clone();
        if let Some(h) = hoerer {
            h(peer, slot);
        }
    }
}

impl SignalingClient for MockSignalingClient {
    fn trennung_hoerer_setzen(&self, hoerer: Option<TrennungsHoerer>) {
        *self.slots.trennung.lock() = hoerer.map(Arc::from);
    }

    fn datenkanal_offen_hoerer_setzen(&self, hoerer: Option<DatenkanalHoerer>) {
        *self.slots.datenkanal_offen.lock() = hoerer.map(Arc::from);
    }

    fn datenkanal_zu_hoerer_setzen(&self, hoerer: Option<DatenkanalHoerer>) {
        *self.slots.datenkanal_zu.lock() = hoerer.map(Arc::from);
    }

    fn peer_hoerer_setzen(&self, hoerer: Option<PeerNachrichtHoerer>) {
        *self.slots.peer.lock() = hoerer.map(Arc::from);
    }

    fn anruf_abbruch_hoerer_setzen(&self, hoerer: Option<AnrufAbbruchHoerer>) {
        *self.slots.anruf_abbruch.lock() = hoerer.map(Arc::from);
    }

    fn strom_geschlossen_hoerer_setzen(&self, hoerer: Option<StromGeschlossenHoerer>) {
        *self.slots.strom_geschlossen.lock() = hoerer.map(Arc::from);
    }

    fn got_media_hoerer_setzen(&self, hoerer: Option<MediaHoerer>) {
        *self.slots.got_media.lock() = hoerer.map(Arc::from);
    }

    fn raum_belegungs_hoerer_setzen(&self, hoerer: Option<RaumBelegungsHoerer>) {
        *self.slots.raum_belegung.lock() = hoerer.map(Arc::from);
    }

    fn raum_eintritts_hoerer_setzen(&self, hoerer: Option<RaumEintrittsHoerer>) {
        *self.slots.raum_eintritt.lock() = hoerer.map(Arc::from);
    }

    fn fehler_hoerer_setzen(&self, hoerer: Option<SignalFehlerHoerer>) {
        *self.slots.fehler.lock() = hoerer.map(Arc::from);
    }

    fn anruf_hoerer_setzen(&self, hoerer: Option<AnrufSlotHoerer>) {
        *self.slots.anruf.lock() = hoerer.map(Arc::from);
    }

    fn auflegen_hoerer_setzen(&self, hoerer: Option<AnrufSlotHoerer>) {
        *self.slots.auflegen.lock() = hoerer.map(Arc::from);
    }

    fn raum_beitreten(&self, raum: &KonferenzId, ergebnis: ErgebnisCallback) {
        self.beitritte.lock().push(raum.clone());
        self.mitglied.lock().push(raum.clone());
        ergebnis(Ok(()));
        self.feuere_raum_eintritt(true, raum);
    }

    fn raum_verlassen(&self, raum: &KonferenzId, ergebnis: ErgebnisCallback) {
        self.mitglied.lock().retain(|r| r != raum);
        ergebnis(Ok(()));
        self.feuere_raum_eintritt(false, raum);
    }

    fn beigetretene_raeume(&self) -> Vec<KonferenzId> {
        self.mitglied.lock().clone()
    }

    fn raum_belegung(&self, raum: &KonferenzId) -> Option<Vec<PeerId>> {
        self.belegungen.lock().get(raum).cloned()
    }

    fn anrufen(&self, peer: &PeerId, ergebnis: ErgebnisCallback) {
        self.angerufen.lock().push(peer.clone());
        ergebnis(Ok(()));
    }

    fn alle_auflegen(&self) {
        self.auflegungen.fetch_add(1, Ordering::SeqCst);
    }

    fn verbindungs_status(&self, peer: &PeerId) -> VerbindungsStatus {
        if self.funktionierende_kanaele.lock().contains(peer) {
            VerbindungsStatus::Verbunden
        } else {
            VerbindungsStatus::NichtVerbunden
        }
    }

    fn datenkanal_funktioniert(&self, peer: &PeerId) -> bool {
        self.funktionierende_kanaele.lock().contains(peer)
    }

    fn id_zu_name(&self, peer: &PeerId) -> String {
        self.namen
            .lock()
            .get(peer)
            .cloned()
            .unwrap_or_else(|| peer.als_str().to_string())
    }

    fn kamera_aktivieren(&self, aktiv: bool) {
        *self.kamera.lock() = Some(aktiv);
    }

    fn mikrofon_aktivieren(&self, aktiv: bool) {
        *self.mikrofon.lock() = Some(aktiv);
    }

    fn video_aktivieren(&self, aktiv: bool) {
        *self.video.lock() = Some(aktiv);
    }

    fn datenkanaele_aktivieren(&self, aktiv: bool) {
        *self.datenkanaele.lock() = Some(aktiv);
    }

    fn lokaler_strom(&self) -> Option<Arc<dyn MediaStrom>> {
        self.lokal
            .lock()
            .clone()
            .map(|strom| strom as Arc<dyn MediaStrom>)
    }

    fn remote_strom(&self, peer: &PeerId) -> Option<Arc<dyn MediaStrom>> {
        self.remote
            .lock()
            .get(peer)
            .cloned()
            .map(|strom| strom as Arc<dyn MediaStrom>)
    }

    fn video_quellen_auflisten(&self, ergebnis: VideoQuellenCallback) {
        ergebnis(self.video_quellen.lock().clone());
    }

    fn video_dims_setzen(&self, _breite: Option<u32>, _hoehe: Option<u32>) {}

    fn daten_senden(
        &self,
        peer: &PeerId,
        typ: &str,
        daten: &serde_json::Value,
        quittung: Option<QuittungsHoerer>,
    ) {
        self.gesendet.lock().push(Versand {
            variante: "auto",
            peer: peer.clone(),
            typ: typ.to_string(),
            daten: daten.clone(),
        });
        if let Some(quittung) = quittung {
            quittung(serde_json::json!({ "status": "ok" }));
        }
    }

    fn daten_senden_p2p(&self, peer: &PeerId, typ: &str, daten: &serde_json::Value) {
        self.gesendet.lock().push(Versand {
            variante: "p2p",
            peer: peer.clone(),
            typ: typ.to_string(),
            daten: daten.clone(),
        });
    }

    fn daten_senden_ws(
        &self,
        peer: &PeerId,
        typ: &str,
        daten: &serde_json::Value,
        quittung: Option<QuittungsHoerer>,
    ) {
        self.gesendet.lock().push(Versand {
            variante: "ws",
            peer: peer.clone(),
            typ: typ.to_string(),
            daten: daten.clone(),
        });
        if let Some(quittung) = quittung {
            quittung(serde_json::json!({ "status": "ok" }));
        }
    }

    fn benutzername_setzen(&self, name: &str) {
        *self.benutzername.lock() = Some(name.to_string());
    }

    fn mein_rtcid(&self) -> Option<PeerId> {
        self.eigene_id.lock().clone()
    }

    fn sdp_filter_setzen(
        &self,
        lokal: Option<SdpFilterOptionen>,
        entfernt: Option<SdpFilterOptionen>,
    ) {
        *self.sdp_filter.lock() = Some((lokal, entfernt));
    }

    fn max_p2p_laenge_setzen(&self, laenge: usize) {
        *self.max_p2p_laenge.lock() = Some(laenge);
    }

    fn socket_verwenden(&self, _socket: Arc<dyn TransportSocket>) {
        self.socket_gebunden.store(true, Ordering::SeqCst);
    }

    fn app_starten(
        &self,
        anwendung: &str,
        lokales_video: &str,
        remote_videos: &[String],
        anmeldung: AnmeldeCallback,
    ) {
        *self.app_start.lock() = Some((
            anwendung.to_string(),
            lokales_video.to_string(),
            remote_videos.to_vec(),
        ));
        *self.anmeldung.lock() = Some(anmeldung);
    }
}

// ---------------------------------------------------------------------------
// Transport und Identitaet
// ---------------------------------------------------------------------------

struct MockSocket;

impl TransportSocket for MockSocket {
    fn beschreibung(&self) -> String {
        "mock-socket".into()
    }
}

pub struct MockTransport {
    verbunden: AtomicBool,
    wartende: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
}

impl MockTransport {
    pub fn neu(verbunden: bool) -> Arc<Self> {
        Arc::new(Self {
            verbunden: AtomicBool::new(verbunden),
            wartende: Mutex::new(Vec::new()),
        })
    }

    /// Markiert den Transport als verbunden und weckt alle Wartenden
    pub fn verbinden_jetzt(&self) {
        self.verbunden.store(true, Ordering::SeqCst);
        let wartende: Vec<_> = self.wartende.lock().drain(..).collect();
        for callback in wartende {
            callback();
        }
    }
}

impl TransportVerbindung for MockTransport {
    fn ist_verbunden(&self) -> bool {
        self.verbunden.load(Ordering::SeqCst)
    }

    fn bei_verbindung(&self, callback: Box<dyn FnOnce() + Send>) {
        if self.ist_verbunden() {
            callback();
        } else {
            self.wartende.lock().push(callback);
        }
    }

    fn socket(&self) -> Arc<dyn TransportSocket> {
        Arc::new(MockSocket)
    }
}

pub struct MockIdentitaet {
    pub benutzer: UserId,
    pub name: String,
}

impl MockIdentitaet {
    pub fn neu(benutzer: &str, name: &str) -> Arc<Self> {
        Arc::new(Self {
            benutzer: UserId::neu(benutzer),
            name: name.to_string(),
        })
    }
}

impl Identitaet for MockIdentitaet {
    fn benutzer_id(&self) -> UserId {
        self.benutzer.clone()
    }

    fn anzeige_name(&self) -> String {
        self.name.clone()
    }
}

// ---------------------------------------------------------------------------
// Testaufbau
// ---------------------------------------------------------------------------

pub struct TestAufbau {
    pub client: Arc<MockSignalingClient>,
    pub transport: Arc<MockTransport>,
    pub speicher: Arc<KonferenzStatusSpeicher>,
    pub bus: BroadcastEventBus,
    pub controller: SessionController,
}

/// Standardaufbau: Transport verbunden, eine Videoquelle vorhanden
pub fn aufbau() -> TestAufbau {
    aufbau_mit(
        vec![VideoQuelle {
            id: "kamera-0".into(),
            beschriftung: "Integrierte Kamera".into(),
        }],
        true,
    )
}

pub fn aufbau_mit(video_quellen: Vec<VideoQuelle>, transport_verbunden: bool) -> TestAufbau {
    palaver_observability::logging_fuer_tests();

    let client = MockSignalingClient::neu();
    *client.video_quellen.lock() = video_quellen;
    let transport = MockTransport::neu(transport_verbunden);
    let speicher = Arc::new(KonferenzStatusSpeicher::neu());
    let bus = BroadcastEventBus::neu();

    let controller = SessionController::neu(
        Arc::clone(&client) as Arc<dyn SignalingClient>,
        Arc::clone(&transport) as Arc<dyn TransportVerbindung>,
        MockIdentitaet::neu("benutzer-1", "Alice"),
        Arc::clone(&speicher) as Arc<dyn palaver_connector::KonferenzStatus>,
        Arc::new(bus.clone()),
        ConnectorKonfiguration::default(),
    );

    TestAufbau {
        client,
        transport,
        speicher,
        bus,
        controller,
    }
}

/// Verbindet und meldet erfolgreich an; gibt die eigene Peer-ID zurueck
pub fn verbunden_mit(aufbau: &TestAufbau, konferenz: &KonferenzId, rtcid: &str) -> PeerId {
    aufbau.controller.verbinden(konferenz, None);
    aufbau.client.anmeldung_erfolgreich(rtcid);
    PeerId::neu(rtcid)
}
