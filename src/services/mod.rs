//! Service layer for business logic
//!
//! This module provides the logic behind the HTTP handlers and the CLI:
//! plot loading, place enrichment and visitor geolocation.

pub mod geoip;
pub mod places;
pub mod plots;

pub use geoip::{GeoIpProvider, GeoLocation, GeoLocator, LookupError};
pub use places::{GooglePlacesClient, PlaceEnricher, PlacesApi, PropertyDetail};
pub use plots::{PlotService, StructureCode};
