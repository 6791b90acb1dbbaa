//! Williamsburg Travel Guide - a small multi-page travel-guide web app
//!
//! This library provides the fetch -> normalize -> render pipelines behind
//! the attraction picker, the restaurant search, and the weather dashboard,
//! plus the web layer that binds each page interaction to one pipeline run.

pub mod attractions;
pub mod config;
pub mod error;
pub mod restaurants;
pub mod views;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use attractions::{Attraction, AttractionPick};
pub use config::GuideConfig;
pub use error::GuideError;
pub use restaurants::{Cuisine, Restaurant};
pub use weather::{DailySummary, HourlySample};
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
