// TimeScan - core/mod.rs
//
// Core logic layer: data model, token extraction, export, grid discovery.
// Must NOT depend on: app or platform.

pub mod discovery;
pub mod export;
pub mod extract;
pub mod model;
