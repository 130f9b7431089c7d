//! Bitratenprofile und SDP-Filteroptionen
//!
//! Ein Profil deckelt Audio- und Video-Bitraten; ausgewaehlt wird es ueber
//! `bandbreite_konfigurieren` und angewendet beim naechsten `verbinden`
//! (die Filter werden zur Verbindungszeit gesetzt, nicht rueckwirkend).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bitraten-Obergrenzen in kbit/s; `None` heisst unbegrenzt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BitratenProfil {
    pub audio_kbps: Option<u32>,
    pub video_kbps: Option<u32>,
}

impl BitratenProfil {
    pub fn neu(audio_kbps: Option<u32>, video_kbps: Option<u32>) -> Self {
        Self {
            audio_kbps,
            video_kbps,
        }
    }

    /// Hat das Profil ueberhaupt eine Obergrenze?
    pub fn hat_begrenzung(&self) -> bool {
        self.audio_kbps.is_some() || self.video_kbps.is_some()
    }
}

/// Eingebaute Profiltabelle
pub fn standard_bitratenprofile() -> BTreeMap<String, BitratenProfil> {
    let mut profile = BTreeMap::new();
    profile.insert("low".into(), BitratenProfil::neu(Some(20), Some(30)));
    profile.insert("medium".into(), BitratenProfil::neu(Some(40), Some(60)));
    profile.insert("nolimit".into(), BitratenProfil::neu(None, None));
    profile
}

// ---------------------------------------------------------------------------
// SDP-Filter
// ---------------------------------------------------------------------------

/// Optionen fuer einen SDP-Bitratenfilter des Signaling-Clients
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SdpFilterOptionen {
    pub audio_empfang_kbps: Option<u32>,
    pub video_empfang_kbps: Option<u32>,
    pub audio_sende_kbps: Option<u32>,
    pub video_sende_kbps: Option<u32>,
}

impl SdpFilterOptionen {
    /// Filter fuer die lokale SDP: deckelt was wir empfangen wollen
    pub fn empfangsfilter(profil: &BitratenProfil) -> Self {
        Self {
            audio_empfang_kbps: profil.audio_kbps,
            video_empfang_kbps: profil.video_kbps,
            ..Self::default()
        }
    }

    /// Filter fuer die entfernte SDP: deckelt was die Gegenseite sendet
    pub fn sendefilter(profil: &BitratenProfil) -> Self {
        Self {
            audio_sende_kbps: profil.audio_kbps,
            video_sende_kbps: profil.video_kbps,
            ..Self::default()
        }
    }
}
