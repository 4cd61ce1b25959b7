// DevFinder - lib.rs
//
// Library entry point, exposing the filter engine, state controller and
// supporting layers for integration testing and programmatic use.
//
// Rendering lives in `main.rs` and is not part of the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
