//! Verbindungs-Gate – ein einmaliges Ergebnis, beliebig oft abwartbar
//!
//! Die Anmeldung am Signaling-Dienst loest genau einmal auf (Erfolg oder
//! Fehler). Das Gate haelt dieses Ergebnis als Terminalzustand fest:
//! Wartende vor der Aufloesung bekommen alle dasselbe Ergebnis, Wartende
//! danach bekommen es sofort. Jeder Aufrufer erhaelt sein eigenes Future;
//! es gibt keinen "letzter-gewinnt"-Platz.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;

// ---------------------------------------------------------------------------
// AnmeldeFehler
// ---------------------------------------------------------------------------

/// Fehlerinfo einer fehlgeschlagenen Anmeldung
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Anmeldung fehlgeschlagen ({code}): {nachricht}")]
pub struct AnmeldeFehler {
    pub code: String,
    pub nachricht: String,
}

impl AnmeldeFehler {
    pub fn neu(code: impl Into<String>, nachricht: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            nachricht: nachricht.into(),
        }
    }
}

impl From<AnmeldeFehler> for palaver_core::PalaverError {
    fn from(fehler: AnmeldeFehler) -> Self {
        Self::Anmeldung {
            code: fehler.code,
            nachricht: fehler.nachricht,
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionGate
// ---------------------------------------------------------------------------

/// Zustand des Gates; der Uebergang aus `Ausstehend` ist einmalig
#[derive(Debug, Clone)]
enum GateZustand {
    Ausstehend,
    Erfolgreich,
    Fehlgeschlagen(AnmeldeFehler),
}

struct GateKern {
    zustand: GateZustand,
    /// Wartende vor der Aufloesung; jeder bekommt seinen eigenen Kanal
    wartende: Vec<oneshot::Sender<Result<(), AnmeldeFehler>>>,
}

/// Das Verbindungs-Gate der Sitzung
///
/// Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct ConnectionGate {
    kern: Arc<Mutex<GateKern>>,
}

impl ConnectionGate {
    /// Erstellt ein Gate im Zustand `Ausstehend`
    pub fn neu() -> Self {
        Self {
            kern: Arc::new(Mutex::new(GateKern {
                zustand: GateZustand::Ausstehend,
                wartende: Vec::new(),
            })),
        }
    }

    /// Loest das Gate mit Erfolg auf und weckt alle Wartenden
    ///
    /// In einem Terminalzustand ist der Aufruf ein No-op.
    pub fn erfolg_melden(&self) {
        let geweckte = {
            let mut kern = self.kern.lock();
            if !matches!(kern.zustand, GateZustand::Ausstehend) {
                tracing::warn!("Gate bereits aufgeloest, Erfolgsmeldung ignoriert");
                return;
            }
            kern.zustand = GateZustand::Erfolgreich;
            std::mem::take(&mut kern.wartende)
        };
        tracing::debug!(wartende = geweckte.len(), "Verbindungs-Gate: Erfolg");
        for sender in geweckte {
            let _ = sender.send(Ok(()));
        }
    }

    /// Loest das Gate mit einem Anmeldefehler auf und weckt alle Wartenden
    ///
    /// In einem Terminalzustand ist der Aufruf ein No-op.
    pub fn fehler_melden(&self, fehler: AnmeldeFehler) {
        let geweckte = {
            let mut kern = self.kern.lock();
            if !matches!(kern.zustand, GateZustand::Ausstehend) {
                tracing::warn!(code = %fehler.code, "Gate bereits aufgeloest, Fehlermeldung ignoriert");
                return;
            }
            kern.zustand = GateZustand::Fehlgeschlagen(fehler.clone());
            std::mem::take(&mut kern.wartende)
        };
        tracing::debug!(
            code = %fehler.code,
            wartende = geweckte.len(),
            "Verbindungs-Gate: Fehler"
        );
        for sender in geweckte {
            let _ = sender.send(Err(fehler.clone()));
        }
    }

    /// Wartet auf die Aufloesung des Gates
    ///
    /// Beliebig oft aufrufbar, vor wie nach der Aufloesung. Alle vor der
    /// Aufloesung erzeugten Futures loesen gemeinsam mit ihr auf.
    pub fn verbindung(&self) -> impl Future<Output = Result<(), AnmeldeFehler>> + Send + 'static {
        enum Wartung {
            Sofort(Result<(), AnmeldeFehler>),
            Warten(oneshot::Receiver<Result<(), AnmeldeFehler>>),
        }

        let wartung = {
            let mut kern = self.kern.lock();
            match &kern.zustand {
                GateZustand::Erfolgreich => Wartung::Sofort(Ok(())),
                GateZustand::Fehlgeschlagen(fehler) => Wartung::Sofort(Err(fehler.clone())),
                GateZustand::Ausstehend => {
                    let (tx, rx) = oneshot::channel();
                    kern.wartende.push(tx);
                    Wartung::Warten(rx)
                }
            }
        };

        async move {
            match wartung {
                Wartung::Sofort(ergebnis) => ergebnis,
                Wartung::Warten(empfaenger) => empfaenger.await.unwrap_or_else(|_| {
                    Err(AnmeldeFehler::neu(
                        "GATE_VERWORFEN",
                        "Verbindungs-Gate wurde vor der Aufloesung verworfen",
                    ))
                }),
            }
        }
    }
}

impl Default for ConnectionGate {
    fn default() -> Self {
        Self::neu()
    }
}
