//! Container and lifecycle models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LocationType;

/// A single trackable unit of product (keg, case, bottle, can)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Container {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    /// Production batch the contents came from (e.g., "B-2024-045")
    pub batch_id: String,
    pub container_type: ContainerType,
    pub status: ContainerStatus,
    /// Owning location; every container belongs to exactly one
    pub location_id: String,
    /// Sales order this container is staged against, if any
    pub order_id: Option<String>,
    pub customer: Option<String>,
    /// Liquid volume per unit
    pub volume_liters: Decimal,
    /// Return due date, stamped when the container is delivered
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Physical packaging of a container
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContainerType {
    Keg,
    Case,
    Bottle,
    Can,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Keg => "keg",
            ContainerType::Case => "case",
            ContainerType::Bottle => "bottle",
            ContainerType::Can => "can",
        }
    }

    /// Prefix used when generating container IDs
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ContainerType::Keg => "KEG",
            ContainerType::Case => "CASE",
            ContainerType::Bottle => "BTL",
            ContainerType::Can => "CAN",
        }
    }

    /// Typical liquid volume for a unit of this packaging
    pub fn default_volume_liters(&self) -> Decimal {
        match self {
            // Half-barrel keg, 15.5 US gal
            ContainerType::Keg => Decimal::new(587, 1),
            // 12-pack of 355 ml bottles or cans
            ContainerType::Case => Decimal::new(426, 2),
            ContainerType::Bottle => Decimal::new(355, 3),
            ContainerType::Can => Decimal::new(355, 3),
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a container type from text
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown container type: {0}")]
pub struct ParseContainerTypeError(pub String);

impl std::str::FromStr for ContainerType {
    type Err = ParseContainerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keg" => Ok(ContainerType::Keg),
            "case" => Ok(ContainerType::Case),
            "bottle" => Ok(ContainerType::Bottle),
            "can" => Ok(ContainerType::Can),
            other => Err(ParseContainerTypeError(other.to_string())),
        }
    }
}

/// Lifecycle status of a container
///
/// Containers move pending -> approved -> loaded -> in_transit -> delivered
/// -> returned, then re-enter the cycle when they reach bonded storage or
/// the production floor again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContainerStatus {
    Pending,
    Approved,
    Loaded,
    InTransit,
    Delivered,
    Returned,
}

impl ContainerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::Pending => "pending",
            ContainerStatus::Approved => "approved",
            ContainerStatus::Loaded => "loaded",
            ContainerStatus::InTransit => "in_transit",
            ContainerStatus::Delivered => "delivered",
            ContainerStatus::Returned => "returned",
        }
    }

    /// Whether the container has cleared order approval and may be loaded
    pub fn cleared_for_loading(&self) -> bool {
        !matches!(self, ContainerStatus::Pending)
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status a container takes on after arriving at a location
///
/// Trucks mark containers loaded, customers mark them delivered, the
/// cleaning bay marks them returned. A returned container re-entering
/// bonded storage or production starts a fresh cycle as pending. All other
/// moves keep the current status.
pub fn status_after_arrival(current: ContainerStatus, dest: LocationType) -> ContainerStatus {
    match dest {
        LocationType::Truck => ContainerStatus::Loaded,
        LocationType::Customer => ContainerStatus::Delivered,
        LocationType::Cleaning => ContainerStatus::Returned,
        LocationType::Tax | LocationType::Production
            if current == ContainerStatus::Returned =>
        {
            ContainerStatus::Pending
        }
        _ => current,
    }
}

/// Generate a container ID
///
/// IDs follow `PREFIX-timestamp-serial` (e.g., "KEG-1704067200-0"), which is
/// sufficient uniqueness for board-scale fleets.
pub fn generate_container_id(container_type: ContainerType, timestamp: i64, serial: u64) -> String {
    format!("{}-{}-{}", container_type.id_prefix(), timestamp, serial)
}
