//! Shared types and models for the Beverage Container Tracking Platform
//!
//! This crate contains types shared between the board engine, the frontend
//! (via WASM), and other components of the system.

pub mod alerts;
pub mod models;
pub mod types;
pub mod validation;

pub use alerts::*;
pub use models::*;
pub use types::*;
pub use validation::*;
