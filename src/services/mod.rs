// Tizim Scan services
// Services provide stateless functionality: classification, action routing,
// the transactions gateway, and history export/import.

pub mod action_router;
pub mod classifier;
pub mod export_import;
pub mod transactions_api;
