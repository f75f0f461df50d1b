//! Tizim Scan — QR capture, classification and history core for the Tizim
//! productivity client.
//!
//! Pipeline: an acquisition collaborator produces a raw decoded string, the
//! [`services::classifier::Classifier`] parses it into a typed result, the
//! [`managers::history_manager::HistoryManager`] records it, and the
//! [`services::action_router::ActionRouter`] performs the matching effect.
//! [`app::ScanSession`] wires the pieces together for the UI layer.

pub mod app;
pub mod managers;
pub mod services;
pub mod storage;
pub mod types;
