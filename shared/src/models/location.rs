//! Location and product group models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Container, ContainerType};

/// A place a container can reside
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub location_type: LocationType,
    /// Optional ceiling on total containers held; meaning depends on the
    /// location type (pallet slots for trucks, rack space for warehouses)
    pub capacity: Option<u32>,
    pub products: Vec<ProductGroup>,
}

/// Kind of a location in the container lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Warehouse,
    Truck,
    Customer,
    Production,
    Cleaning,
    /// Bonded storage; leaving it triggers tax determination
    Tax,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Warehouse => "warehouse",
            LocationType::Truck => "truck",
            LocationType::Customer => "customer",
            LocationType::Production => "production",
            LocationType::Cleaning => "cleaning",
            LocationType::Tax => "tax",
        }
    }

    /// Whether this location holds sellable stock that should be watched
    /// for low-stock conditions
    pub fn holds_stock(&self) -> bool {
        matches!(self, LocationType::Warehouse | LocationType::Tax)
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a location type from text
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown location type: {0}")]
pub struct ParseLocationTypeError(pub String);

impl std::str::FromStr for LocationType {
    type Err = ParseLocationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warehouse" => Ok(LocationType::Warehouse),
            "truck" => Ok(LocationType::Truck),
            "customer" => Ok(LocationType::Customer),
            "production" => Ok(LocationType::Production),
            "cleaning" => Ok(LocationType::Cleaning),
            "tax" => Ok(LocationType::Tax),
            other => Err(ParseLocationTypeError(other.to_string())),
        }
    }
}

/// An aggregation of same-product, same-packaging containers at one location
///
/// Groups are created lazily when the first matching container arrives and
/// removed when the last one leaves; `quantity` always equals
/// `containers.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductGroup {
    pub product_id: String,
    pub product_name: String,
    pub container_type: ContainerType,
    pub quantity: u32,
    pub containers: Vec<Container>,
}

impl ProductGroup {
    /// Create a group seeded with its first container
    pub fn for_container(container: Container) -> Self {
        Self {
            product_id: container.product_id.clone(),
            product_name: container.product_name.clone(),
            container_type: container.container_type,
            quantity: 1,
            containers: vec![container],
        }
    }

    pub fn matches(&self, product_name: &str, container_type: ContainerType) -> bool {
        self.product_name == product_name && self.container_type == container_type
    }

    pub fn push(&mut self, container: Container) {
        self.containers.push(container);
        self.quantity = self.containers.len() as u32;
    }

    /// Remove a container by ID, keeping `quantity` in sync
    pub fn remove(&mut self, container_id: &str) -> Option<Container> {
        let idx = self.containers.iter().position(|c| c.id == container_id)?;
        let container = self.containers.remove(idx);
        self.quantity = self.containers.len() as u32;
        Some(container)
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Aggregate liquid volume across the group
    pub fn total_volume(&self) -> Decimal {
        self.containers.iter().map(|c| c.volume_liters).sum()
    }
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location_type: LocationType,
        capacity: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location_type,
            capacity,
            products: Vec::new(),
        }
    }

    /// Total containers currently held, across all product groups
    pub fn total_quantity(&self) -> u32 {
        self.products.iter().map(|g| g.quantity).sum()
    }

    /// Occupancy as a percentage of capacity (0-100), if capacity is defined
    pub fn fill_percentage(&self) -> Option<u32> {
        let capacity = self.capacity?;
        if capacity == 0 {
            return Some(100);
        }
        Some((self.total_quantity() * 100 / capacity).min(100))
    }

    pub fn find_group(
        &self,
        product_name: &str,
        container_type: ContainerType,
    ) -> Option<&ProductGroup> {
        self.products
            .iter()
            .find(|g| g.matches(product_name, container_type))
    }

    pub fn find_group_mut(
        &mut self,
        product_name: &str,
        container_type: ContainerType,
    ) -> Option<&mut ProductGroup> {
        self.products
            .iter_mut()
            .find(|g| g.matches(product_name, container_type))
    }

    pub fn find_container(&self, container_id: &str) -> Option<&Container> {
        self.products
            .iter()
            .flat_map(|g| g.containers.iter())
            .find(|c| c.id == container_id)
    }

    /// Insert a container, creating its product group if absent
    ///
    /// Rewrites the container's `location_id` to this location.
    pub fn insert_container(&mut self, mut container: Container) {
        container.location_id = self.id.clone();
        let product_name = container.product_name.clone();
        match self.find_group_mut(&product_name, container.container_type) {
            Some(group) => group.push(container),
            None => self.products.push(ProductGroup::for_container(container)),
        }
    }

    /// Remove a container by ID, deleting its product group if it empties
    pub fn remove_container(&mut self, container_id: &str) -> Option<Container> {
        let group_idx = self
            .products
            .iter()
            .position(|g| g.containers.iter().any(|c| c.id == container_id))?;
        let container = self.products[group_idx].remove(container_id)?;
        if self.products[group_idx].is_empty() {
            self.products.remove(group_idx);
        }
        Some(container)
    }

    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.products.iter().flat_map(|g| g.containers.iter())
    }
}
