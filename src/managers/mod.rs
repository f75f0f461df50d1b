// Tizim Scan state managers
// Managers handle stateful operations: the scan history store.

pub mod history_manager;
