//! Listener-Verteiler – macht aus einem Einzelplatz-Callback ein Pub/Sub
//!
//! Der Signaling-Client kennt pro Ereignis genau einen Hoerer-Platz.
//! Dieser Verteiler belegt den Platz einmalig mit einem Dispatcher und
//! verteilt jedes Feuern an beliebig viele Abonnenten, in der Reihenfolge
//! ihrer Anmeldung. Abmelden erfolgt ueber den beim Anmelden
//! zurueckgegebenen Handle (Zeiger-Identitaet, erster Treffer).

use parking_lot::Mutex;
use std::sync::Arc;

/// Handle eines angemeldeten Hoerers
///
/// Der Handle ist zugleich der Hoerer selbst; derselbe Handle kann mehrfach
/// angemeldet werden und feuert dann einmal pro Anmeldung.
pub type ListenerHandle<A> = Arc<dyn Fn(&A) + Send + Sync>;

struct FanoutKern<A> {
    /// Name fuer Debug-Logs
    name: &'static str,
    /// Abonnenten in Anmelde-Reihenfolge
    hoerer: Mutex<Vec<ListenerHandle<A>>>,
}

impl<A> FanoutKern<A> {
    fn ausloesen(&self, argumente: &A) {
        // Schnappschuss vor dem Aufruf: Hoerer duerfen sich waehrend der
        // Zustellung an- und abmelden ohne den Verteiler zu verklemmen.
        let schnappschuss: Vec<ListenerHandle<A>> = self.hoerer.lock().clone();
        tracing::trace!(
            verteiler = self.name,
            anzahl = schnappschuss.len(),
            "Ereignis wird verteilt"
        );
        for hoerer in schnappschuss {
            hoerer(argumente);
        }
    }
}

/// Verteiler fuer einen Einzelplatz-Hoerer des Signaling-Clients
pub struct ListenerFanout<A> {
    kern: Arc<FanoutKern<A>>,
}

impl<A> Clone for ListenerFanout<A> {
    fn clone(&self) -> Self {
        Self {
            kern: Arc::clone(&self.kern),
        }
    }
}

impl<A: 'static> ListenerFanout<A> {
    /// Erstellt einen leeren Verteiler
    pub fn neu(name: &'static str) -> Self {
        Self {
            kern: Arc::new(FanoutKern {
                name,
                hoerer: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Meldet einen Hoerer an und gibt ihn als Handle zurueck
    pub fn hinzufuegen(&self, hoerer: ListenerHandle<A>) -> ListenerHandle<A> {
        tracing::debug!(verteiler = self.kern.name, "Hoerer angemeldet");
        self.kern.hoerer.lock().push(Arc::clone(&hoerer));
        hoerer
    }

    /// Meldet den ersten identischen Hoerer ab; No-op wenn unbekannt
    pub fn entfernen(&self, hoerer: &ListenerHandle<A>) {
        let mut liste = self.kern.hoerer.lock();
        if let Some(position) = liste.iter().position(|h| Arc::ptr_eq(h, hoerer)) {
            liste.remove(position);
            tracing::debug!(verteiler = self.kern.name, "Hoerer abgemeldet");
        }
    }

    /// Anzahl der aktuell angemeldeten Hoerer
    pub fn anzahl(&self) -> usize {
        self.kern.hoerer.lock().len()
    }

    /// Verteilt ein Ereignis an alle aktuell angemeldeten Hoerer
    pub fn ausloesen(&self, argumente: &A) {
        self.kern.ausloesen(argumente);
    }

    /// Dispatcher-Closure fuer den Einzelplatz-Slot des Signaling-Clients
    ///
    /// Wird pro Verteiler genau einmal registriert; jedes spaetere
    /// An- und Abmelden laeuft nur noch ueber die Abonnentenliste.
    pub fn dispatcher(&self) -> Box<dyn Fn(&A) + Send + Sync> {
        let kern = Arc::clone(&self.kern);
        Box::new(move |argumente: &A| kern.ausloesen(argumente))
    }
}
