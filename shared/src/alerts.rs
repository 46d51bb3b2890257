//! Alert derivation over a board snapshot
//!
//! A full recomputation runs after every mutation; the engine keeps no state
//! between calls, so the alert list is always consistent with the snapshot
//! it was computed from. Board sizes are tens to low hundreds of containers,
//! which keeps the full scan cheap.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Alert, ContainerStatus, Location, LocationType};

/// Reorder thresholds for low-stock detection
///
/// A product without an explicit entry falls back to the default threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertThresholds {
    pub default_low_stock: u32,
    pub per_product: HashMap<String, u32>,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            default_low_stock: 5,
            per_product: HashMap::new(),
        }
    }
}

impl AlertThresholds {
    pub fn reorder_point(&self, product_name: &str) -> u32 {
        self.per_product
            .get(product_name)
            .copied()
            .unwrap_or(self.default_low_stock)
    }
}

/// Compute the current alert set for a board snapshot
///
/// Scans every location in order, then every product group in order, so
/// discovery order is deterministic. The result is sorted by severity
/// descending; ties keep discovery order.
///
/// Rules:
/// - a stock-holding location's product group below its reorder point emits
///   a medium low-stock alert
/// - a location at or over its defined capacity emits a high capacity alert
/// - a delivered container sitting at a customer past its due date emits a
///   high overdue-return alert
pub fn compute_alerts(
    locations: &[Location],
    thresholds: &AlertThresholds,
    today: NaiveDate,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for location in locations {
        if let Some(capacity) = location.capacity {
            if location.total_quantity() >= capacity {
                alerts.push(Alert::capacity_exceeded(location, capacity));
            }
        }

        if location.location_type.holds_stock() {
            for group in &location.products {
                let reorder_point = thresholds.reorder_point(&group.product_name);
                if group.quantity < reorder_point {
                    alerts.push(Alert::low_stock(location, group, reorder_point));
                }
            }
        }

        if location.location_type == LocationType::Customer {
            for container in location.containers() {
                if container.status == ContainerStatus::Delivered {
                    if let Some(due) = container.due_date {
                        if due < today {
                            alerts.push(Alert::overdue_return(location, container));
                        }
                    }
                }
            }
        }
    }

    // Stable sort: severity descending, discovery order within a severity
    alerts.sort_by_key(|a| Reverse(a.severity));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertSeverity, AlertType, Container, ContainerType, LocationType};
    use chrono::Utc;

    fn keg(id: &str, product: &str, status: ContainerStatus, due: Option<NaiveDate>) -> Container {
        Container {
            id: id.to_string(),
            product_id: product.to_lowercase().replace(' ', "-"),
            product_name: product.to_string(),
            batch_id: "B-2024-001".to_string(),
            container_type: ContainerType::Keg,
            status,
            location_id: String::new(),
            order_id: None,
            customer: None,
            volume_liters: ContainerType::Keg.default_volume_liters(),
            due_date: due,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_low_stock_at_warehouse() {
        let mut warehouse =
            Location::new("warehouse-1", "Main Warehouse", LocationType::Warehouse, None);
        warehouse.insert_container(keg("KEG-1", "Dry Cider", ContainerStatus::Pending, None));
        warehouse.insert_container(keg("KEG-2", "Dry Cider", ContainerStatus::Pending, None));

        let thresholds = AlertThresholds {
            default_low_stock: 5,
            per_product: HashMap::new(),
        };
        let alerts = compute_alerts(&[warehouse], &thresholds, today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::LowStock);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(alerts[0].product_name.as_deref(), Some("Dry Cider"));
    }

    #[test]
    fn test_per_product_threshold_overrides_default() {
        let mut warehouse =
            Location::new("warehouse-1", "Main Warehouse", LocationType::Warehouse, None);
        for i in 0..8 {
            warehouse.insert_container(keg(
                &format!("KEG-{i}"),
                "Hopped Cider",
                ContainerStatus::Pending,
                None,
            ));
        }

        let mut per_product = HashMap::new();
        per_product.insert("Hopped Cider".to_string(), 10);
        let thresholds = AlertThresholds {
            default_low_stock: 5,
            per_product,
        };

        let alerts = compute_alerts(&[warehouse], &thresholds, today());
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.contains("reorder at 10"));
    }

    #[test]
    fn test_truck_stock_is_not_low_stock() {
        let mut truck = Location::new("truck-1", "Route A", LocationType::Truck, Some(10));
        truck.insert_container(keg("KEG-1", "Dry Cider", ContainerStatus::Loaded, None));

        let alerts = compute_alerts(&[truck], &AlertThresholds::default(), today());
        assert!(alerts.iter().all(|a| a.alert_type != AlertType::LowStock));
    }

    #[test]
    fn test_capacity_exceeded_at_ceiling() {
        let mut truck = Location::new("truck-1", "Route A", LocationType::Truck, Some(2));
        truck.insert_container(keg("KEG-1", "Dry Cider", ContainerStatus::Loaded, None));
        truck.insert_container(keg("KEG-2", "Dry Cider", ContainerStatus::Loaded, None));

        let alerts = compute_alerts(&[truck], &AlertThresholds::default(), today());
        assert!(alerts
            .iter()
            .any(|a| a.alert_type == AlertType::CapacityExceeded
                && a.severity == AlertSeverity::High));
    }

    #[test]
    fn test_overdue_return_detection() {
        let mut bar = Location::new("joes-bar", "Joe's Bar", LocationType::Customer, None);
        let past_due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let not_due = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        bar.insert_container(keg("KEG-1", "Dry Cider", ContainerStatus::Delivered, Some(past_due)));
        bar.insert_container(keg("KEG-2", "Dry Cider", ContainerStatus::Delivered, Some(not_due)));
        bar.insert_container(keg("KEG-3", "Dry Cider", ContainerStatus::Delivered, None));

        let alerts = compute_alerts(&[bar], &AlertThresholds::default(), today());
        let overdue: Vec<_> = alerts
            .iter()
            .filter(|a| a.alert_type == AlertType::OverdueReturn)
            .collect();
        assert_eq!(overdue.len(), 1);
        assert!(overdue[0].message.contains("KEG-1"));
    }

    #[test]
    fn test_ordering_severity_then_discovery() {
        // Location order: a low-stock warehouse first, then a full truck.
        // High severity must come first despite later discovery.
        let mut warehouse =
            Location::new("warehouse-1", "Main Warehouse", LocationType::Warehouse, None);
        warehouse.insert_container(keg("KEG-1", "Dry Cider", ContainerStatus::Pending, None));

        let mut truck = Location::new("truck-1", "Route A", LocationType::Truck, Some(1));
        truck.insert_container(keg("KEG-2", "Raspberry Cider", ContainerStatus::Loaded, None));

        let alerts = compute_alerts(&[warehouse, truck], &AlertThresholds::default(), today());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].alert_type, AlertType::CapacityExceeded);
        assert_eq!(alerts[1].alert_type, AlertType::LowStock);
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let mut warehouse =
            Location::new("warehouse-1", "Main Warehouse", LocationType::Warehouse, None);
        warehouse.insert_container(keg("KEG-1", "Dry Cider", ContainerStatus::Pending, None));
        let locations = vec![warehouse];

        let first = compute_alerts(&locations, &AlertThresholds::default(), today());
        let second = compute_alerts(&locations, &AlertThresholds::default(), today());
        assert_eq!(first, second);
    }
}
