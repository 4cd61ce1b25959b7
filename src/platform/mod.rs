// DevFinder - platform/mod.rs
//
// Platform layer: directory resolution and config.toml loading.

pub mod config;
