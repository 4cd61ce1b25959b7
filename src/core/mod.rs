// DevFinder - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or filesystem I/O.

pub mod catalog;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod index;
pub mod model;
pub mod normalize;
