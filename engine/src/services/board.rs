//! Board controller for the container lifecycle
//!
//! The board service is the single mutator of the canonical location
//! snapshot. It mediates between move intents (drags or direct calls), the
//! move validator, and the alert engine, and emits notifications for the
//! presentation layer. Every operation runs to completion synchronously;
//! a rejected move leaves the snapshot untouched.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::alerts::{compute_alerts, AlertThresholds};
use shared::models::{
    generate_container_id, status_after_arrival, Alert, Container, ContainerStatus, ContainerType,
    Location, LocationType,
};
use shared::types::{NotificationKind, ProductKey};
use shared::validation::{
    validate_batch_id, validate_move, validate_product_name, validate_quantity, MoveVerdict,
};

use crate::config::BoardConfig;
use crate::error::{AppError, AppResult};

use super::notification::NotificationCenter;

/// Callbacks for the presentation layer
///
/// Default implementations do nothing, so observers implement only what
/// they render.
pub trait BoardObserver {
    fn on_alerts_changed(&mut self, _alerts: &[Alert]) {}

    fn on_notify(&mut self, _title: &str, _message: &str, _kind: NotificationKind) {}
}

/// Input for manual container creation
#[derive(Debug, Clone, Deserialize)]
pub struct AddContainersInput {
    pub product_name: String,
    pub container_type: ContainerType,
    pub quantity: u32,
    pub location_id: String,
    pub batch_id: String,
    pub order_id: Option<String>,
    pub customer: Option<String>,
    /// Per-unit volume; defaults to the typical volume for the packaging
    pub volume_liters: Option<Decimal>,
}

/// Per-interaction drag state
#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        container_id: String,
        product: ProductKey,
        from_location_id: String,
    },
}

/// The board controller; owns the canonical snapshot
pub struct BoardService {
    locations: Vec<Location>,
    alerts: Vec<Alert>,
    thresholds: AlertThresholds,
    overdue_return_days: i64,
    drag: DragState,
    notifications: NotificationCenter,
    observer: Option<Box<dyn BoardObserver>>,
    /// Running serial folded into generated container IDs
    serial: u64,
}

impl BoardService {
    /// Create a board over a seeded snapshot and compute its initial alerts
    pub fn new(locations: Vec<Location>, config: &BoardConfig) -> Self {
        let thresholds = config.thresholds();
        let alerts = compute_alerts(&locations, &thresholds, Utc::now().date_naive());
        Self {
            locations,
            alerts,
            thresholds,
            overdue_return_days: config.overdue_return_days,
            drag: DragState::Idle,
            notifications: NotificationCenter::new(),
            observer: None,
            serial: 0,
        }
    }

    /// Register the presentation-layer observer, replacing any previous one
    pub fn set_observer(&mut self, observer: Box<dyn BoardObserver>) {
        self.observer = Some(observer);
    }

    // ========================================================================
    // Snapshot accessors
    // ========================================================================

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn find_container(&self, container_id: &str) -> Option<&Container> {
        self.locations
            .iter()
            .find_map(|l| l.find_container(container_id))
    }

    /// Total containers across all locations
    pub fn total_containers(&self) -> u32 {
        self.locations.iter().map(|l| l.total_quantity()).sum()
    }

    /// Container counts per lifecycle status, for the stage tiles
    pub fn count_by_status(&self) -> HashMap<ContainerStatus, u32> {
        let mut counts = HashMap::new();
        for location in &self.locations {
            for container in location.containers() {
                *counts.entry(container.status).or_insert(0) += 1;
            }
        }
        counts
    }

    // ========================================================================
    // Drag state machine
    // ========================================================================

    /// Record the start of a drag for a container
    pub fn begin_drag(&mut self, container_id: &str) -> AppResult<()> {
        let (container, from_location_id) = self
            .locations
            .iter()
            .find_map(|l| l.find_container(container_id).map(|c| (c, l.id.clone())))
            .ok_or_else(|| AppError::NotFound(format!("Container {container_id}")))?;

        tracing::debug!(container = container_id, from = %from_location_id, "drag started");
        self.drag = DragState::Dragging {
            container_id: container_id.to_string(),
            product: ProductKey::of(container),
            from_location_id,
        };
        Ok(())
    }

    /// Drop the dragged container on a location
    ///
    /// The drag ends regardless of the verdict; a blocked move emits a
    /// notification and mutates nothing.
    pub fn drop_on(&mut self, location_id: &str) -> AppResult<MoveVerdict> {
        let DragState::Dragging {
            container_id,
            product,
            from_location_id,
        } = std::mem::replace(&mut self.drag, DragState::Idle)
        else {
            return Err(AppError::InvalidStateTransition(
                "no drag in progress".to_string(),
            ));
        };
        tracing::debug!(
            container = %container_id,
            product = %product.product_name,
            from = %from_location_id,
            to = location_id,
            "drag dropped"
        );
        self.record_move(&container_id, location_id)
    }

    /// Drag ended without a drop; nothing changes
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// ID of the container currently being dragged, if any
    pub fn dragging(&self) -> Option<&str> {
        match &self.drag {
            DragState::Dragging { container_id, .. } => Some(container_id),
            DragState::Idle => None,
        }
    }

    // ========================================================================
    // Move operations
    // ========================================================================

    /// Move one container to a location, applying the validator's verdict
    ///
    /// A same-location move is a silent no-op. A blocked move emits an error
    /// notification and returns the verdict without touching the snapshot.
    pub fn record_move(
        &mut self,
        container_id: &str,
        to_location_id: &str,
    ) -> AppResult<MoveVerdict> {
        let source_idx = self
            .locations
            .iter()
            .position(|l| l.find_container(container_id).is_some())
            .ok_or_else(|| AppError::NotFound(format!("Container {container_id}")))?;
        let dest_idx = self
            .locations
            .iter()
            .position(|l| l.id == to_location_id)
            .ok_or_else(|| AppError::NotFound(format!("Location {to_location_id}")))?;

        let verdict = {
            let source = &self.locations[source_idx];
            let dest = &self.locations[dest_idx];
            let container = source
                .find_container(container_id)
                .ok_or_else(|| AppError::NotFound(format!("Container {container_id}")))?;
            validate_move(container, source, dest)
                .map_err(|msg| AppError::validation("move", msg))?
        };

        if verdict.no_op {
            return Ok(verdict);
        }

        if !verdict.valid {
            let reason = verdict.first_error().unwrap_or("move not allowed").to_string();
            tracing::warn!(
                container = container_id,
                dest = to_location_id,
                %reason,
                "move blocked"
            );
            self.notify("Move Blocked", &reason, NotificationKind::Error);
            return Ok(verdict);
        }

        // Everything is resolved and validated; the mutation below cannot
        // fail midway, so the snapshot never holds a half-applied move.
        let mut container = self.locations[source_idx]
            .remove_container(container_id)
            .ok_or_else(|| AppError::NotFound(format!("Container {container_id}")))?;
        let dest_type = self.locations[dest_idx].location_type;
        container.status = status_after_arrival(container.status, dest_type);
        if dest_type == LocationType::Customer {
            container.due_date =
                Some(Utc::now().date_naive() + Duration::days(self.overdue_return_days));
        }
        let dest_name = self.locations[dest_idx].name.clone();
        self.locations[dest_idx].insert_container(container);

        tracing::info!(container = container_id, dest = to_location_id, "container moved");
        for warning in &verdict.warnings {
            self.notify("Move Warning", warning, NotificationKind::Warning);
        }
        self.notify(
            "Container Moved",
            &format!("{container_id} moved to {dest_name}"),
            NotificationKind::Success,
        );
        self.recompute_alerts();
        Ok(verdict)
    }

    // ========================================================================
    // Manual container creation
    // ========================================================================

    /// Insert newly created containers into a location
    ///
    /// Returns the generated container IDs.
    pub fn add_containers(&mut self, input: AddContainersInput) -> AppResult<Vec<String>> {
        validate_product_name(&input.product_name)
            .map_err(|msg| AppError::validation("product_name", msg))?;
        validate_quantity(input.quantity).map_err(|msg| AppError::validation("quantity", msg))?;
        validate_batch_id(&input.batch_id).map_err(|msg| AppError::validation("batch_id", msg))?;
        if input.location_id.is_empty() {
            return Err(AppError::validation(
                "location_id",
                "A target location must be selected",
            ));
        }

        let dest_idx = self
            .locations
            .iter()
            .position(|l| l.id == input.location_id)
            .ok_or_else(|| AppError::NotFound(format!("Location {}", input.location_id)))?;

        let timestamp = Utc::now().timestamp();
        let product_id = product_slug(&input.product_name);
        let volume = input
            .volume_liters
            .unwrap_or_else(|| input.container_type.default_volume_liters());

        let mut ids = Vec::with_capacity(input.quantity as usize);
        for _ in 0..input.quantity {
            let id = generate_container_id(input.container_type, timestamp, self.serial);
            self.serial += 1;
            let container = Container {
                id: id.clone(),
                product_id: product_id.clone(),
                product_name: input.product_name.clone(),
                batch_id: input.batch_id.clone(),
                container_type: input.container_type,
                status: ContainerStatus::Pending,
                location_id: String::new(),
                order_id: input.order_id.clone(),
                customer: input.customer.clone(),
                volume_liters: volume,
                due_date: None,
                created_at: Utc::now(),
            };
            self.locations[dest_idx].insert_container(container);
            ids.push(id);
        }

        let dest_name = self.locations[dest_idx].name.clone();
        tracing::info!(
            count = input.quantity,
            product = %input.product_name,
            dest = %input.location_id,
            "containers added"
        );
        self.notify(
            "Containers Added",
            &format!(
                "Added {} x {} ({}) to {}",
                input.quantity, input.product_name, input.container_type, dest_name
            ),
            NotificationKind::Success,
        );
        self.recompute_alerts();
        Ok(ids)
    }

    // ========================================================================
    // Order operations
    // ========================================================================

    /// Approve every pending container staged against an order
    pub fn approve_order(&mut self, order_id: &str) -> AppResult<u32> {
        let mut matched = 0u32;
        let mut approved = 0u32;
        for location in &mut self.locations {
            for group in &mut location.products {
                for container in &mut group.containers {
                    if container.order_id.as_deref() == Some(order_id) {
                        matched += 1;
                        if container.status == ContainerStatus::Pending {
                            container.status = ContainerStatus::Approved;
                            approved += 1;
                        }
                    }
                }
            }
        }

        if matched == 0 {
            return Err(AppError::NotFound(format!("Order {order_id}")));
        }

        tracing::info!(order = order_id, approved, "order approved");
        self.notify(
            "Order Approved",
            &format!("Order {order_id} has been approved for loading"),
            NotificationKind::Success,
        );
        self.recompute_alerts();
        Ok(approved)
    }

    /// Load every container of an order onto a truck
    ///
    /// The whole order is validated up front; one blocked container blocks
    /// the load and nothing moves.
    pub fn load_order(&mut self, order_id: &str, truck_id: &str) -> AppResult<MoveVerdict> {
        let dest_idx = self
            .locations
            .iter()
            .position(|l| l.id == truck_id)
            .ok_or_else(|| AppError::NotFound(format!("Location {truck_id}")))?;
        if self.locations[dest_idx].location_type != LocationType::Truck {
            return Err(AppError::InvalidStateTransition(format!(
                "{truck_id} is not a truck"
            )));
        }

        let members: Vec<String> = self
            .locations
            .iter()
            .filter(|l| l.id != truck_id)
            .flat_map(|l| l.containers())
            .filter(|c| c.order_id.as_deref() == Some(order_id))
            .map(|c| c.id.clone())
            .collect();
        if members.is_empty() {
            return Err(AppError::NotFound(format!("Order {order_id}")));
        }

        let has_pending = self
            .locations
            .iter()
            .flat_map(|l| l.containers())
            .any(|c| c.order_id.as_deref() == Some(order_id) && !c.status.cleared_for_loading());
        if has_pending {
            let reason = "Order must be approved before loading".to_string();
            self.notify("Cannot Load", &reason, NotificationKind::Error);
            return Ok(MoveVerdict {
                valid: false,
                errors: vec![reason],
                warnings: Vec::new(),
                no_op: false,
            });
        }

        if let Some(capacity) = self.locations[dest_idx].capacity {
            let after = self.locations[dest_idx].total_quantity() + members.len() as u32;
            if after > capacity {
                let reason = format!(
                    "destination at capacity ({} of {})",
                    self.locations[dest_idx].total_quantity(),
                    capacity
                );
                self.notify("Cannot Load", &reason, NotificationKind::Error);
                return Ok(MoveVerdict {
                    valid: false,
                    errors: vec![reason],
                    warnings: Vec::new(),
                    no_op: false,
                });
            }
        }

        for container_id in &members {
            let source_idx = self
                .locations
                .iter()
                .position(|l| l.find_container(container_id).is_some())
                .ok_or_else(|| AppError::NotFound(format!("Container {container_id}")))?;
            let mut container = self.locations[source_idx]
                .remove_container(container_id)
                .ok_or_else(|| AppError::NotFound(format!("Container {container_id}")))?;
            container.status = status_after_arrival(container.status, LocationType::Truck);
            self.locations[dest_idx].insert_container(container);
        }

        let truck_name = self.locations[dest_idx].name.clone();
        tracing::info!(order = order_id, truck = truck_id, count = members.len(), "order loaded");
        self.notify(
            "Loaded to Truck",
            &format!("Order {order_id} loaded to {truck_name}"),
            NotificationKind::Success,
        );
        self.recompute_alerts();
        Ok(MoveVerdict::ok())
    }

    /// Send a loaded truck out on its route
    ///
    /// Departure from bonded storage is the tax determination point, so the
    /// success notification carries the TTB notice.
    pub fn start_route(&mut self, truck_id: &str) -> AppResult<u32> {
        let idx = self
            .locations
            .iter()
            .position(|l| l.id == truck_id)
            .ok_or_else(|| AppError::NotFound(format!("Location {truck_id}")))?;
        if self.locations[idx].location_type != LocationType::Truck {
            return Err(AppError::InvalidStateTransition(format!(
                "{truck_id} is not a truck"
            )));
        }

        let count = self.locations[idx].total_quantity();
        if count == 0 {
            self.notify(
                "Cannot Start Route",
                "No containers loaded on truck",
                NotificationKind::Error,
            );
            return Ok(0);
        }

        for group in &mut self.locations[idx].products {
            for container in &mut group.containers {
                container.status = ContainerStatus::InTransit;
            }
        }

        tracing::info!(truck = truck_id, count, "route started");
        self.notify(
            "Route Started",
            "Tax determination triggered (TTB requirement)",
            NotificationKind::Success,
        );
        self.recompute_alerts();
        Ok(count)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn notify(&mut self, title: &str, message: &str, kind: NotificationKind) {
        self.notifications.on_notify(title, message, kind);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_notify(title, message, kind);
        }
    }

    fn recompute_alerts(&mut self) {
        let alerts = compute_alerts(&self.locations, &self.thresholds, Utc::now().date_naive());
        tracing::debug!(count = alerts.len(), "alerts recomputed");
        self.alerts = alerts;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_alerts_changed(&self.alerts);
        }
    }
}

/// Derive a product ID from a display name ("Dry Cider" -> "dry-cider")
fn product_slug(product_name: &str) -> String {
    product_name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardService {
        let locations = vec![
            Location::new("tax-zone", "Bonded Storage", LocationType::Tax, None),
            Location::new("truck-1", "Route A", LocationType::Truck, Some(10)),
        ];
        BoardService::new(locations, &BoardConfig::default())
    }

    #[test]
    fn test_product_slug() {
        assert_eq!(product_slug("Dry Cider"), "dry-cider");
        assert_eq!(product_slug("  Hopped   Cider "), "hopped-cider");
    }

    #[test]
    fn test_drag_requires_known_container() {
        let mut board = board();
        assert!(matches!(
            board.begin_drag("KEG-404"),
            Err(AppError::NotFound(_))
        ));
        assert!(board.dragging().is_none());
    }

    #[test]
    fn test_drop_without_drag_is_rejected() {
        let mut board = board();
        assert!(matches!(
            board.drop_on("truck-1"),
            Err(AppError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_cancel_drag_resets_state() {
        let mut board = board();
        board
            .add_containers(AddContainersInput {
                product_name: "Dry Cider".to_string(),
                container_type: ContainerType::Keg,
                quantity: 1,
                location_id: "tax-zone".to_string(),
                batch_id: "B-2024-050".to_string(),
                order_id: None,
                customer: None,
                volume_liters: None,
            })
            .unwrap();
        let id = board.locations()[0].containers().next().unwrap().id.clone();

        board.begin_drag(&id).unwrap();
        assert_eq!(board.dragging(), Some(id.as_str()));
        board.cancel_drag();
        assert!(board.dragging().is_none());
    }
}
