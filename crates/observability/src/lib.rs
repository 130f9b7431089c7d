//! palaver-observability – Structured Logging
//!
//! Der Connector selbst loggt ausschliesslich ueber `tracing`; dieses
//! Crate liefert die Subscriber-Initialisierung fuer Host-Anwendungen
//! und Test-Harnische.

pub mod logging;

pub use logging::{logging_fuer_tests, logging_initialisieren, LogOptionen};
