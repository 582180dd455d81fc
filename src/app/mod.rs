// TimeScan - app/mod.rs
//
// Application layer: orchestrates the grid scan over the filesystem.
// Dependencies: core, platform.

pub mod scan;
