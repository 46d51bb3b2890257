//! Beverage Container Tracking Platform - Board Engine
//!
//! In-process engine that owns the canonical logistics board: locations,
//! product groups, and containers moving through the lifecycle bonded
//! storage -> production -> packaging -> delivery -> restaurant -> returns.
//! The engine validates moves, derives alerts, and emits notifications; the
//! presentation layer and any persistence are external.

pub mod config;
pub mod error;
pub mod seed;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
