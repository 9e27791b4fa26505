//! HTTP API layer: route handlers and middleware

pub mod middleware;
pub mod services;
