// DevFinder - app/mod.rs
//
// Application layer: state controller, dataset loading, catalog
// management, interactive commands.

pub mod catalog_mgr;
pub mod command;
pub mod loader;
pub mod state;
