//! Alert models
//!
//! Alerts are pure projections of the current board state. They are
//! recomputed wholesale after every mutation and never stored, so their IDs
//! are derived from what they describe rather than generated.

use serde::{Deserialize, Serialize};

use super::{Container, Location, ProductGroup};

/// A derived fact about an undesirable current board state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub product_name: Option<String>,
    pub location_id: Option<String>,
}

/// Condition an alert reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    OverdueReturn,
    CapacityExceeded,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LowStock => "low_stock",
            AlertType::OverdueReturn => "overdue_return",
            AlertType::CapacityExceeded => "capacity_exceeded",
        }
    }
}

/// Severity of an alert; ordering follows the variant order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Alert {
    /// Low-stock alert for a product group below its reorder threshold
    pub fn low_stock(location: &Location, group: &ProductGroup, threshold: u32) -> Self {
        Self {
            id: format!("low_stock:{}:{}:{}", location.id, group.product_name, group.container_type),
            alert_type: AlertType::LowStock,
            severity: AlertSeverity::Medium,
            title: "Low Stock".to_string(),
            message: format!(
                "{} ({}) at {} is down to {} (reorder at {})",
                group.product_name, group.container_type, location.name, group.quantity, threshold
            ),
            product_name: Some(group.product_name.clone()),
            location_id: Some(location.id.clone()),
        }
    }

    /// Capacity alert for a location at or over its ceiling
    pub fn capacity_exceeded(location: &Location, capacity: u32) -> Self {
        Self {
            id: format!("capacity_exceeded:{}", location.id),
            alert_type: AlertType::CapacityExceeded,
            severity: AlertSeverity::High,
            title: "Capacity Exceeded".to_string(),
            message: format!(
                "{} holds {} containers against a capacity of {}",
                location.name,
                location.total_quantity(),
                capacity
            ),
            product_name: None,
            location_id: Some(location.id.clone()),
        }
    }

    /// Overdue-return alert for a delivered container past its due date
    pub fn overdue_return(location: &Location, container: &Container) -> Self {
        let due = container
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            id: format!("overdue_return:{}", container.id),
            alert_type: AlertType::OverdueReturn,
            severity: AlertSeverity::High,
            title: "Overdue Return".to_string(),
            message: format!(
                "{} {} at {} was due back on {}",
                container.product_name, container.id, location.name, due
            ),
            product_name: Some(container.product_name.clone()),
            location_id: Some(location.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::High > AlertSeverity::Medium);
        assert!(AlertSeverity::Medium > AlertSeverity::Low);
    }
}
