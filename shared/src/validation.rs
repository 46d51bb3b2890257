//! Validation utilities for the Beverage Container Tracking Platform
//!
//! The move validator decides whether a proposed container move is legal.
//! Business-rule violations are reported in the returned verdict, never as
//! errors; only malformed input (missing IDs, a container offered with the
//! wrong source) takes the `Err` path.

use crate::models::{Container, ContainerStatus, ContainerType, Location, LocationType};
use serde::{Deserialize, Serialize};

// ============================================================================
// Move Validation
// ============================================================================

/// Verdict on a proposed container move
///
/// `errors` block the move, `warnings` allow it but flag it as risky.
/// `no_op` marks a move onto the container's current location, which is a
/// valid do-nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveVerdict {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub no_op: bool,
}

impl MoveVerdict {
    /// Clean pass with no findings
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            no_op: false,
        }
    }

    /// Same-location move: valid, nothing to do
    pub fn no_op() -> Self {
        Self {
            no_op: true,
            ..Self::ok()
        }
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

/// Validate a proposed move of `container` from `source` to `dest`
///
/// Rules:
/// - a destination with a defined capacity must have room for one more
///   container
/// - a pending container may not be loaded onto a truck
/// - a keg sent to cleaning before it was delivered draws a warning
/// - moving to the current location is a valid no-op
pub fn validate_move(
    container: &Container,
    source: &Location,
    dest: &Location,
) -> Result<MoveVerdict, &'static str> {
    if container.id.is_empty() {
        return Err("container id must not be empty");
    }
    if source.id.is_empty() || dest.id.is_empty() {
        return Err("location ids must not be empty");
    }
    if container.location_id != source.id {
        return Err("container does not belong to the source location");
    }

    if source.id == dest.id {
        return Ok(MoveVerdict::no_op());
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Some(capacity) = dest.capacity {
        if dest.total_quantity() + 1 > capacity {
            errors.push(format!(
                "destination at capacity ({} of {})",
                dest.total_quantity(),
                capacity
            ));
        }
    }

    if dest.location_type == LocationType::Truck && !container.status.cleared_for_loading() {
        errors.push("must be approved before loading".to_string());
    }

    if container.container_type == ContainerType::Keg
        && dest.location_type == LocationType::Cleaning
        && container.status != ContainerStatus::Delivered
    {
        warnings.push("returning a container not yet delivered".to_string());
    }

    Ok(MoveVerdict {
        valid: errors.is_empty(),
        errors,
        warnings,
        no_op: false,
    })
}

// ============================================================================
// Input Validations
// ============================================================================

/// Validate a product name for manual container creation
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Product name must not be empty");
    }
    if name.len() > 120 {
        return Err("Product name must be at most 120 characters");
    }
    Ok(())
}

/// Validate a manual-add quantity
pub fn validate_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity == 0 {
        return Err("Quantity must be at least 1");
    }
    if quantity > 500 {
        return Err("Quantity must be at most 500 per batch");
    }
    Ok(())
}

/// Validate a batch identifier (e.g., "B-2024-045"); empty is allowed and
/// treated as untracked
pub fn validate_batch_id(batch_id: &str) -> Result<(), &'static str> {
    if batch_id.len() > 40 {
        return Err("Batch id must be at most 40 characters");
    }
    Ok(())
}
