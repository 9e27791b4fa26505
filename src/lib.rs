//! plotmap - Serve land plots as GeoJSON on an interactive map
//!
//! This library provides the core functionality for the plotmap service:
//! plot loading, place enrichment, visitor geolocation and the HTTP API.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line maintenance commands
//!
//! # Architecture
//! - `services`: Plot loader, Places enrichment, GeoIP lookup
//! - `api`: HTTP services and middleware
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
