//! Core library for the skywatch weather dashboard.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap current-weather client and geolocation collaborator
//! - The lookup controller (UI-state machine) and display projection
//!
//! It is used by `skywatch-cli`, but can also be reused by other frontends.

pub mod config;
pub mod controller;
pub mod error;
pub mod geolocate;
pub mod model;
pub mod provider;
pub mod render;

pub use config::Config;
pub use controller::Controller;
pub use error::{GeoError, LookupError};
pub use geolocate::{Geolocator, IpApiGeolocator, Position};
pub use model::{LocationQuery, UiState, WeatherReading};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use render::{WeatherCard, render};
