//! Session-Controller – Lebenszyklus einer Signaling-Sitzung
//!
//! Der Controller uebersetzt die Host-Sicht (Konferenz betreten, Anruf
//! starten, Daten verteilen) in Aufrufe des Signaling-Clients und haelt
//! dabei den Sitzungszustand zusammen:
//!
//! ```text
//! Bereit -> WartetAufTransport -> AnmeldungLaeuft -> Verbunden
//!                                        |
//!                                        v
//!                             AnmeldungFehlgeschlagen (terminal)
//! ```
//!
//! Alle Operationen sind nicht-blockierend; Warten heisst immer: einen
//! Callback, einen Fan-out-Hoerer oder ein Gate-Future registrieren.

use crate::attendee::{KonferenzStatus, Teilnehmer, TeilnehmerBroadcast, NACHRICHT_TEILNEHMER_UPDATE};
use crate::bitrate::{BitratenProfil, SdpFilterOptionen};
use crate::client::{
    AnmeldeCallback, MediaHoerer, PeerNachricht, PeerNachrichtHoerer, QuittungsHoerer,
    SignalingClient, VerbindungsStatus,
};
use crate::config::ConnectorKonfiguration;
use crate::fanout::{ListenerFanout, ListenerHandle};
use crate::gate::{AnmeldeFehler, ConnectionGate};
use crate::host::{Identitaet, TransportVerbindung};
use palaver_core::{EventBus, KonferenzId, PalaverEvent, PeerId};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback fuer das Ergebnis von [`SessionController::verbinden`];
/// `None` bei Erfolg, sonst der Anmeldefehler
pub type VerbindungsCallback = Box<dyn FnOnce(Option<AnmeldeFehler>) + Send>;

/// Zustand der Sitzung, sichtbar fuer Logs und Tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitzungsZustand {
    /// `verbinden` wurde noch nicht aufgerufen
    Bereit,
    /// `verbinden` laeuft, Transport steht noch nicht
    WartetAufTransport,
    /// Anmeldung beim Signaling-Dienst ist unterwegs
    AnmeldungLaeuft,
    /// Anmeldung erfolgreich
    Verbunden,
    /// Anmeldung abgelehnt; terminal fuer diesen Sitzungsversuch
    AnmeldungFehlgeschlagen,
}

impl std::fmt::Display for SitzungsZustand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Bereit => "bereit",
            Self::WartetAufTransport => "wartet auf Transport",
            Self::AnmeldungLaeuft => "Anmeldung laeuft",
            Self::Verbunden => "verbunden",
            Self::AnmeldungFehlgeschlagen => "Anmeldung fehlgeschlagen",
        };
        write!(f, "{text}")
    }
}

// ---------------------------------------------------------------------------
// Kern
// ---------------------------------------------------------------------------

struct SessionControllerKern {
    client: Arc<dyn SignalingClient>,
    transport: Arc<dyn TransportVerbindung>,
    identitaet: Arc<dyn Identitaet>,
    konferenz_status: Arc<dyn KonferenzStatus>,
    event_bus: Arc<dyn EventBus>,
    konfiguration: ConnectorKonfiguration,
    gate: ConnectionGate,
    zustand: Mutex<SitzungsZustand>,
    /// Aktuell betretener Raum laut Raum-Eintritts-Hoerer
    raum: Mutex<Option<KonferenzId>>,
    aktives_profil: Mutex<Option<BitratenProfil>>,
    video_aktiv: AtomicBool,
    /// Trennungs-Hoerer; Plaetze bleiben nach dem Entfernen stabil
    trennungs_hoerer: Mutex<Vec<Option<Arc<dyn Fn() + Send + Sync>>>>,
    datenkanal_offen: ListenerFanout<PeerId>,
    datenkanal_zu: ListenerFanout<PeerId>,
    peer_nachrichten: ListenerFanout<PeerNachricht>,
}

impl SessionControllerKern {
    fn zustand_setzen(&self, neuer: SitzungsZustand) {
        let mut zustand = self.zustand.lock();
        let bisher = *zustand;
        tracing::debug!(von = %bisher, nach = %neuer, "Sitzungszustand gewechselt");
        *zustand = neuer;
    }

    /// Verteilt ein Trennungs-Ereignis an alle registrierten Hoerer
    fn trennung_ausloesen(&self) {
        let schnappschuss: Vec<Arc<dyn Fn() + Send + Sync>> =
            self.trennungs_hoerer.lock().iter().flatten().cloned().collect();
        for hoerer in schnappschuss {
            hoerer();
        }
        let _ = self.event_bus.senden(PalaverEvent::VerbindungGetrennt);
    }

    /// Meldet einen Peer-Nachrichten-Hoerer an, optional gefiltert auf
    /// einen Nachrichtentyp. Nicht passende Typen werden still verworfen.
    fn peer_hoerer_hinzufuegen(
        &self,
        hoerer: ListenerHandle<PeerNachricht>,
        nur_typ: Option<String>,
    ) -> ListenerHandle<PeerNachricht> {
        let dekoriert: ListenerHandle<PeerNachricht> = match nur_typ {
            Some(typ) => {
                let innen = hoerer;
                Arc::new(move |nachricht: &PeerNachricht| {
                    if nachricht.typ == typ {
                        innen(nachricht);
                    }
                })
            }
            None => hoerer,
        };
        self.peer_nachrichten.hinzufuegen(dekoriert)
    }

    /// Schiebt den lokalen Teilnehmer-Datensatz ueber einen frisch
    /// geoeffneten Datenkanal zur Gegenseite
    fn lokalen_teilnehmer_senden(&self, peer: &PeerId) {
        let mein = match self.client.mein_rtcid() {
            Some(mein) => mein,
            None => {
                tracing::warn!(peer = %peer, "Datenkanal offen, aber eigene Peer-ID unbekannt");
                return;
            }
        };
        let teilnehmer = match self.konferenz_status.teilnehmer_nach_peer(&mein) {
            Some(teilnehmer) => teilnehmer,
            None => {
                tracing::warn!(peer = %peer, "Kein lokaler Teilnehmer-Datensatz vorhanden");
                return;
            }
        };
        match serde_json::to_value(TeilnehmerBroadcast::from(&teilnehmer)) {
            Ok(daten) => {
                tracing::debug!(peer = %peer, "Sende Teilnehmer-Datensatz ueber neuen Datenkanal");
                self.client
                    .daten_senden(peer, NACHRICHT_TEILNEHMER_UPDATE, &daten, None);
            }
            Err(e) => tracing::warn!(fehler = %e, "Teilnehmer-Datensatz nicht serialisierbar"),
        }
    }

    /// Zweite Haelfte von `verbinden`: laeuft sobald der Transport steht
    fn transport_bereit(self: &Arc<Self>, callback: Option<VerbindungsCallback>) {
        self.zustand_setzen(SitzungsZustand::AnmeldungLaeuft);
        self.client.socket_verwenden(self.transport.socket());

        self.client.fehler_hoerer_setzen(Some(Box::new(|fehler| {
            tracing::error!(code = %fehler.code, text = %fehler.text, "Signaling-Client meldet Fehler");
        })));

        self.client.video_dims_setzen(None, None);

        // Anmeldung starten; das Ergebnis treibt Gate und Teilnehmerliste
        let k = Arc::clone(self);
        let anmeldung: AnmeldeCallback = Box::new(move |ergebnis| match ergebnis {
            Ok(rtcid) => {
                tracing::info!(rtcid = %rtcid, "Am Signaling-Dienst angemeldet");
                k.zustand_setzen(SitzungsZustand::Verbunden);
                k.konferenz_status.teilnehmer_einfuegen(
                    0,
                    Teilnehmer::mit_identitaet(
                        rtcid,
                        k.identitaet.benutzer_id(),
                        k.identitaet.anzeige_name(),
                    ),
                );
                k.konferenz_status
                    .zeitzone_setzen_nach_platz(0, aktueller_utc_versatz_minuten());
                if !k.video_aktiv.load(Ordering::SeqCst) {
                    k.konferenz_status.video_stumm_setzen_nach_platz(0, true);
                }
                if let Some(cb) = callback {
                    cb(None);
                }
                k.gate.erfolg_melden();
            }
            Err(fehler) => {
                tracing::error!(
                    code = %fehler.code,
                    nachricht = %fehler.nachricht,
                    "Anmeldung am Signaling-Dienst fehlgeschlagen"
                );
                k.zustand_setzen(SitzungsZustand::AnmeldungFehlgeschlagen);
                if let Some(cb) = callback {
                    cb(Some(fehler.clone()));
                }
                k.gate.fehler_melden(fehler);
            }
        });
        self.client.app_starten(
            &self.konfiguration.anwendung.name,
            &self.konfiguration.anwendung.lokales_video_id,
            &self.konfiguration.anwendung.remote_video_ids,
            anmeldung,
        );

        // Ein- und ausgehende Anrufe pflegen die Teilnehmerliste
        let k = Arc::clone(self);
        self.client.anruf_hoerer_setzen(Some(Box::new(move |peer, slot| {
            tracing::debug!(peer = %peer, slot, "Anruf aufgebaut");
            k.konferenz_status
                .teilnehmer_einfuegen(slot + 1, Teilnehmer::neu(peer.clone()));
        })));
        let k = Arc::clone(self);
        self.client.auflegen_hoerer_setzen(Some(Box::new(move |peer, slot| {
            tracing::debug!(peer = %peer, slot, "Anruf aufgelegt");
            k.konferenz_status.teilnehmer_entfernen(slot + 1);
        })));

        // Sobald ein Datenkanal steht bekommt die Gegenseite unseren Datensatz
        let k = Arc::clone(self);
        self.datenkanal_offen
            .hinzufuegen(Arc::new(move |peer: &PeerId| {
                k.lokalen_teilnehmer_senden(peer);
            }));

        // Teilnehmer-Updates der Gegenseiten einspielen
        let k = Arc::clone(self);
        self.peer_hoerer_hinzufuegen(
            Arc::new(move |nachricht: &PeerNachricht| {
                match serde_json::from_value::<TeilnehmerBroadcast>(nachricht.daten.clone()) {
                    Ok(update) => {
                        tracing::debug!(von = %nachricht.von, "Teilnehmer-Update empfangen");
                        k.konferenz_status
                            .teilnehmer_aktualisieren_nach_peer(&nachricht.von, update);
                    }
                    Err(e) => {
                        tracing::warn!(von = %nachricht.von, fehler = %e, "Teilnehmer-Update nicht lesbar")
                    }
                }
            }),
            Some(NACHRICHT_TEILNEHMER_UPDATE.to_string()),
        );
    }
}

/// Aktueller Versatz der lokalen Zeitzone zu UTC in Minuten (oestlich positiv)
fn aktueller_utc_versatz_minuten() -> i32 {
    chrono::Local::now().offset().local_minus_utc() / 60
}

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

/// Controller einer Signaling-Sitzung
///
/// Clone teilt den inneren Zustand; pro Browser-Tab bzw. Host-Sitzung gibt
/// es genau einen Controller.
#[derive(Clone)]
pub struct SessionController {
    kern: Arc<SessionControllerKern>,
}

impl SessionController {
    /// Erstellt den Controller und verdrahtet die dauerhaften Hoerer
    pub fn neu(
        client: Arc<dyn SignalingClient>,
        transport: Arc<dyn TransportVerbindung>,
        identitaet: Arc<dyn Identitaet>,
        konferenz_status: Arc<dyn KonferenzStatus>,
        event_bus: Arc<dyn EventBus>,
        konfiguration: ConnectorKonfiguration,
    ) -> Self {
        let kern = Arc::new(SessionControllerKern {
            client,
            transport,
            identitaet,
            konferenz_status,
            event_bus,
            konfiguration,
            gate: ConnectionGate::neu(),
            zustand: Mutex::new(SitzungsZustand::Bereit),
            raum: Mutex::new(None),
            aktives_profil: Mutex::new(None),
            video_aktiv: AtomicBool::new(true),
            trennungs_hoerer: Mutex::new(Vec::new()),
            datenkanal_offen: ListenerFanout::neu("datenkanal_offen"),
            datenkanal_zu: ListenerFanout::neu("datenkanal_zu"),
            peer_nachrichten: ListenerFanout::neu("peer_nachrichten"),
        });
        let controller = Self { kern };
        controller.verkabeln();
        controller
    }

    /// Dauerhafte Verdrahtung mit dem Signaling-Client
    fn verkabeln(&self) {
        let kern = &self.kern;
        kern.client.datenkanaele_aktivieren(true);
        kern.client
            .max_p2p_laenge_setzen(kern.konfiguration.nachrichten.max_p2p_laenge);

        // Ohne Videoquelle bleibt die Sitzung eine reine Audio-Sitzung
        let k = Arc::clone(kern);
        kern.client.video_quellen_auflisten(Box::new(move |quellen| {
            if quellen.is_empty() {
                tracing::info!("Keine Videoquelle gefunden, Video wird deaktiviert");
                k.video_aktiv.store(false, Ordering::SeqCst);
                k.client.video_aktivieren(false);
            }
        }));

        // Trennungs-Dispatcher plus eingebauter Log-Hoerer
        let k = Arc::clone(kern);
        kern.client
            .trennung_hoerer_setzen(Some(Box::new(move || k.trennung_ausloesen())));
        self.trennung_hoerer_hinzufuegen(Arc::new(|| {
            tracing::info!("Verbindung zum Signaling-Server verloren");
        }));

        // Fan-outs einmalig an die Einzelplatz-Slots koppeln
        kern.client
            .datenkanal_offen_hoerer_setzen(Some(kern.datenkanal_offen.dispatcher()));
        kern.client
            .datenkanal_zu_hoerer_setzen(Some(kern.datenkanal_zu.dispatcher()));
        kern.client
            .peer_hoerer_setzen(Some(kern.peer_nachrichten.dispatcher()));

        // Diagnose-Hoerer
        let k = Arc::clone(kern);
        kern.client
            .anruf_abbruch_hoerer_setzen(Some(Box::new(move |peer, explizit| {
                if explizit {
                    tracing::debug!(
                        peer = %k.client.id_zu_name(peer),
                        "Gegenseite hat den Anrufversuch beendet"
                    );
                } else {
                    tracing::debug!(peer = %k.client.id_zu_name(peer), "Anruf implizit abgebrochen");
                }
            })));
        let k = Arc::clone(kern);
        kern.client
            .strom_geschlossen_hoerer_setzen(Some(Box::new(move |peer, strom| {
                tracing::debug!(
                    peer = %k.client.id_zu_name(peer),
                    strom = strom,
                    "Gegenseite hat einen Medienstrom geschlossen"
                );
            })));
        kern.datenkanal_zu.hinzufuegen(Arc::new(|peer: &PeerId| {
            tracing::debug!(peer = %peer, "Datenkanal geschlossen");
        }));
    }

    // -----------------------------------------------------------------------
    // Verbindungsaufbau
    // -----------------------------------------------------------------------

    /// Baut die Signaling-Sitzung fuer eine Konferenz auf
    ///
    /// Nicht-blockierend; das Ergebnis kommt ueber den optionalen Callback
    /// und ueber [`verbindung`](Self::verbindung).
    pub fn verbinden(&self, konferenz_id: &KonferenzId, callback: Option<VerbindungsCallback>) {
        let kern = &self.kern;
        kern.zustand_setzen(SitzungsZustand::WartetAufTransport);

        // Bitratenfilter nur wenn ein Profil mit Begrenzung aktiv ist
        if let Some(profil) = kern.aktives_profil.lock().clone() {
            if profil.hat_begrenzung() {
                kern.client.sdp_filter_setzen(
                    Some(SdpFilterOptionen::empfangsfilter(&profil)),
                    Some(SdpFilterOptionen::sendefilter(&profil)),
                );
            }
        }

        // Raum-Eintritt verfolgen
        let k = Arc::clone(kern);
        kern.client
            .raum_eintritts_hoerer_setzen(Some(Box::new(move |eintritt, raum| {
                if eintritt {
                    tracing::debug!(raum = %raum, "Raum betreten");
                    *k.raum.lock() = Some(raum.clone());
                } else {
                    tracing::debug!(raum = %raum, "Raum verlassen");
                    *k.raum.lock() = None;
                }
            })));

        // Belegungs-Hoerer: nur der erste Schnappschuss zaehlt, danach
        // meldet er sich selbst ab; spaetere Beitritte rufen uns an
        let k = Arc::clone(kern);
        let schon_gefeuert = Arc::new(AtomicBool::new(false));
        kern.client
            .raum_belegungs_hoerer_setzen(Some(Box::new(move |raum, belegung| {
                if schon_gefeuert.swap(true, Ordering::SeqCst) {
                    return;
                }
                k.client.raum_belegungs_hoerer_setzen(None);
                tracing::debug!(
                    raum = %raum,
                    anzahl = belegung.len(),
                    "Erster Belegungs-Schnappschuss"
                );
                for peer in belegung {
                    let name = k.client.id_zu_name(peer);
                    tracing::debug!(peer = %name, "Rufe Teilnehmer an");
                    k.client.anrufen(
                        peer,
                        Box::new(move |ergebnis| match ergebnis {
                            Ok(()) => tracing::info!(peer = %name, "Anruf aufgebaut"),
                            Err(f) => {
                                tracing::error!(peer = %name, fehler = %f, "Anruf fehlgeschlagen")
                            }
                        }),
                    );
                }
            })));

        // Raum beitreten falls noch nicht Mitglied
        if !kern.client.beigetretene_raeume().contains(konferenz_id) {
            let raum_id = konferenz_id.clone();
            kern.client.raum_beitreten(
                konferenz_id,
                Box::new(move |ergebnis| match ergebnis {
                    Ok(()) => tracing::debug!(raum = %raum_id, "Raum beigetreten"),
                    Err(f) => {
                        tracing::error!(raum = %raum_id, fehler = %f, "Raumbeitritt fehlgeschlagen")
                    }
                }),
            );
        }

        kern.client
            .benutzername_setzen(kern.identitaet.benutzer_id().als_str());

        // Auf Transportbereitschaft warten (sofort falls schon verbunden)
        if kern.transport.ist_verbunden() {
            kern.transport_bereit(callback);
        } else {
            let k = Arc::clone(kern);
            kern.transport.bei_verbindung(Box::new(move || {
                k.transport_bereit(callback);
            }));
        }
    }

    /// Future auf das Anmeldeergebnis dieser Sitzung
    ///
    /// Beliebig oft abrufbar, vor wie nach `verbinden`; alle offenen
    /// Futures loesen gemeinsam mit der Anmeldung auf.
    pub fn verbindung(&self) -> impl Future<Output = Result<(), AnmeldeFehler>> + Send + 'static {
        self.kern.gate.verbindung()
    }

    // -----------------------------------------------------------------------
    // Anrufe und Raeume
    // -----------------------------------------------------------------------

    /// Ruft einen Peer an; ein bestehender Anrufsatz wird vorher beendet
    ///
    /// Das asynchrone Ergebnis wird nur geloggt.
    pub fn anruf_starten(&self, peer: &PeerId) {
        let kern = &self.kern;
        tracing::debug!(peer = %peer, "Starte Anruf");
        // Es gibt hoechstens einen aktiven Anrufsatz
        kern.client.alle_auflegen();
        let name = kern.client.id_zu_name(peer);
        kern.client.anrufen(
            peer,
            Box::new(move |ergebnis| match ergebnis {
                Ok(()) => tracing::debug!(peer = %name, "Anruf aufgebaut"),
                Err(f) => tracing::error!(peer = %name, fehler = %f, "Anruf fehlgeschlagen"),
            }),
        );
    }

    /// Verlaesst die Konferenz und stoppt vorher alle lokalen Medienspuren
    ///
    /// Bei Erfolg geht [`PalaverEvent::KonferenzVerlassen`] an den Host-Bus.
    pub fn raum_verlassen(&self, konferenz_id: &KonferenzId) {
        let kern = &self.kern;
        if let Some(strom) = kern.client.lokaler_strom() {
            for spur in strom.spuren() {
                spur.stoppen();
            }
        }
        let k = Arc::clone(kern);
        let raum_id = konferenz_id.clone();
        kern.client.raum_verlassen(
            konferenz_id,
            Box::new(move |ergebnis| match ergebnis {
                Ok(()) => {
                    tracing::debug!(raum = %raum_id, "Konferenz verlassen");
                    let _ = k.event_bus.senden(PalaverEvent::KonferenzVerlassen {
                        konferenz_id: raum_id.clone(),
                    });
                }
                Err(f) => {
                    tracing::error!(raum = %raum_id, fehler = %f, "Fehler beim Verlassen der Konferenz")
                }
            }),
        );
    }

    // -----------------------------------------------------------------------
    // Medien
    // -----------------------------------------------------------------------

    pub fn mikrofon_aktivieren(&self, aktiv: bool) {
        self.kern.client.mikrofon_aktivieren(aktiv);
    }

    pub fn kamera_aktivieren(&self, aktiv: bool) {
        self.kern.client.kamera_aktivieren(aktiv);
    }

    /// Schaltet Video um und merkt sich die Wahl fuer `ist_video_aktiv`
    pub fn video_aktivieren(&self, aktiv: bool) {
        self.kern.video_aktiv.store(aktiv, Ordering::SeqCst);
        self.kern.client.video_aktivieren(aktiv);
    }

    pub fn ist_video_aktiv(&self) -> bool {
        self.kern.video_aktiv.load(Ordering::SeqCst)
    }

    /// Schaltet die Audiospuren eines entfernten Peers stumm bzw. laut
    ///
    /// No-op wenn der Peer oder seine Audiospuren fehlen.
    pub fn remote_mikrofon_stummschalten(&self, peer: &PeerId, stumm: bool) {
        let strom = match self.kern.client.remote_strom(peer) {
            Some(strom) => strom,
            None => return,
        };
        for spur in strom.audio_spuren() {
            spur.aktiv_setzen(!stumm);
        }
    }

    // -----------------------------------------------------------------------
    // Datenversand
    // -----------------------------------------------------------------------

    pub fn daten_senden(
        &self,
        peer: &PeerId,
        typ: &str,
        daten: &serde_json::Value,
        quittung: Option<QuittungsHoerer>,
    ) {
        self.kern.client.daten_senden(peer, typ, daten, quittung);
    }

    pub fn daten_senden_p2p(&self, peer: &PeerId, typ: &str, daten: &serde_json::Value) {
        self.kern.client.daten_senden_p2p(peer, typ, daten);
    }

    pub fn daten_senden_ws(
        &self,
        peer: &PeerId,
        typ: &str,
        daten: &serde_json::Value,
        quittung: Option<QuittungsHoerer>,
    ) {
        self.kern.client.daten_senden_ws(peer, typ, daten, quittung);
    }

    /// Sendet an alle Raum-Mitbewohner ausser an die eigene ID
    ///
    /// Ohne Raum oder ohne bekannte Belegung ein stiller No-op.
    pub fn broadcast_senden(&self, typ: &str, daten: &serde_json::Value) {
        let kern = &self.kern;
        let raum = match kern.raum.lock().clone() {
            Some(raum) => raum,
            None => {
                tracing::debug!("Broadcast ohne aktiven Raum, nichts zu senden");
                return;
            }
        };
        let belegung = match kern.client.raum_belegung(&raum) {
            Some(belegung) => belegung,
            None => return,
        };
        let mein = kern.client.mein_rtcid();
        for peer in belegung {
            if Some(&peer) == mein.as_ref() {
                continue;
            }
            kern.client.daten_senden(&peer, typ, daten, None);
        }
    }

    /// Verbreitet den eigenen Teilnehmer-Datensatz an alle Mitbewohner
    ///
    /// No-op wenn kein lokaler Datensatz aufloesbar ist.
    pub fn mich_broadcasten(&self) {
        let kern = &self.kern;
        let mein = match kern.client.mein_rtcid() {
            Some(mein) => mein,
            None => return,
        };
        let teilnehmer = match kern.konferenz_status.teilnehmer_nach_peer(&mein) {
            Some(teilnehmer) => teilnehmer,
            None => return,
        };
        match serde_json::to_value(TeilnehmerBroadcast::from(&teilnehmer)) {
            Ok(daten) => self.broadcast_senden(NACHRICHT_TEILNEHMER_UPDATE, &daten),
            Err(e) => tracing::warn!(fehler = %e, "Teilnehmer-Datensatz nicht serialisierbar"),
        }
    }

    /// Mitbewohner mit funktionierendem Datenkanal, in Belegungsreihenfolge
    pub fn offene_datenkanaele(&self) -> Vec<PeerId> {
        let kern = &self.kern;
        let raum = match kern.raum.lock().clone() {
            Some(raum) => raum,
            None => return Vec::new(),
        };
        kern.client
            .raum_belegung(&raum)
            .unwrap_or_default()
            .into_iter()
            .filter(|peer| kern.client.datenkanal_funktioniert(peer))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Auskunft und Konfiguration
    // -----------------------------------------------------------------------

    /// Eigene Peer-ID; erst nach erfolgreicher Anmeldung vorhanden
    pub fn mein_rtcid(&self) -> Option<PeerId> {
        self.kern.client.mein_rtcid()
    }

    pub fn p2p_verbindungs_status(&self, peer: &PeerId) -> VerbindungsStatus {
        self.kern.client.verbindungs_status(peer)
    }

    pub fn datenkanal_funktioniert(&self, peer: &PeerId) -> bool {
        self.kern.client.datenkanal_funktioniert(peer)
    }

    pub fn got_media_hoerer_setzen(&self, hoerer: Option<MediaHoerer>) {
        self.kern.client.got_media_hoerer_setzen(hoerer);
    }

    /// Direkter Durchgriff auf den Einzelplatz-Slot des Clients
    ///
    /// Ersetzt den Fan-out-Dispatcher; fuer mehrere Hoerer stattdessen
    /// [`peer_hoerer_hinzufuegen`](Self::peer_hoerer_hinzufuegen) verwenden.
    pub fn peer_hoerer_setzen(&self, hoerer: Option<PeerNachrichtHoerer>) {
        tracing::warn!("peer_hoerer_setzen: nur der zuletzt gesetzte Hoerer wird ausgefuehrt");
        self.kern.client.peer_hoerer_setzen(hoerer);
    }

    /// Waehlt ein Bitratenprofil aus oder hebt die Begrenzung auf
    ///
    /// Wirkt erst beim naechsten `verbinden`.
    pub fn bandbreite_konfigurieren(&self, profil_name: Option<&str>) {
        let kern = &self.kern;
        let mut aktiv = kern.aktives_profil.lock();
        match profil_name {
            Some(name) => match kern.konfiguration.bitraten.get(name) {
                Some(profil) => {
                    tracing::debug!(profil = name, "Bitratenprofil aktiviert");
                    *aktiv = Some(profil.clone());
                }
                None => {
                    tracing::warn!(profil = name, "Unbekanntes Bitratenprofil, Begrenzung aufgehoben");
                    *aktiv = None;
                }
            },
            None => {
                tracing::debug!("Bitratenbegrenzung aufgehoben");
                *aktiv = None;
            }
        }
    }

    /// Aktuell gewaehltes Bitratenprofil
    pub fn aktives_profil(&self) -> Option<BitratenProfil> {
        self.kern.aktives_profil.lock().clone()
    }

    /// Aktueller Sitzungszustand
    pub fn zustand(&self) -> SitzungsZustand {
        *self.kern.zustand.lock()
    }

    /// Aktuell betretener Raum
    pub fn aktueller_raum(&self) -> Option<KonferenzId> {
        self.kern.raum.lock().clone()
    }

    // -----------------------------------------------------------------------
    // Hoerer-Verwaltung
    // -----------------------------------------------------------------------

    /// Registriert einen Trennungs-Hoerer; die ID bleibt bis zum Entfernen
    /// gueltig, auch wenn andere Hoerer entfernt werden
    pub fn trennung_hoerer_hinzufuegen(&self, hoerer: Arc<dyn Fn() + Send + Sync>) -> usize {
        let mut liste = self.kern.trennungs_hoerer.lock();
        liste.push(Some(hoerer));
        liste.len() - 1
    }

    /// Entfernt einen Trennungs-Hoerer; `false` bei unbekannter ID
    pub fn trennung_hoerer_entfernen(&self, id: usize) -> bool {
        let mut liste = self.kern.trennungs_hoerer.lock();
        match liste.get_mut(id) {
            Some(platz) if platz.is_some() => {
                *platz = None;
                true
            }
            _ => false,
        }
    }

    pub fn datenkanal_offen_hoerer_hinzufuegen(
        &self,
        hoerer: ListenerHandle<PeerId>,
    ) -> ListenerHandle<PeerId> {
        self.kern.datenkanal_offen.hinzufuegen(hoerer)
    }

    pub fn datenkanal_offen_hoerer_entfernen(&self, hoerer: &ListenerHandle<PeerId>) {
        self.kern.datenkanal_offen.entfernen(hoerer);
    }

    pub fn datenkanal_zu_hoerer_hinzufuegen(
        &self,
        hoerer: ListenerHandle<PeerId>,
    ) -> ListenerHandle<PeerId> {
        self.kern.datenkanal_zu.hinzufuegen(hoerer)
    }

    pub fn datenkanal_zu_hoerer_entfernen(&self, hoerer: &ListenerHandle<PeerId>) {
        self.kern.datenkanal_zu.entfernen(hoerer);
    }

    /// Meldet einen Peer-Nachrichten-Hoerer an, optional auf einen
    /// Nachrichtentyp gefiltert; zurueck kommt der abmeldbare Handle
    pub fn peer_hoerer_hinzufuegen(
        &self,
        hoerer: ListenerHandle<PeerNachricht>,
        nur_typ: Option<&str>,
    ) -> ListenerHandle<PeerNachricht> {
        self.kern
            .peer_hoerer_hinzufuegen(hoerer, nur_typ.map(str::to_string))
    }

    pub fn peer_hoerer_entfernen(&self, hoerer: &ListenerHandle<PeerNachricht>) {
        self.kern.peer_nachrichten.entfernen(hoerer);
    }
}
