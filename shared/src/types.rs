//! Common types used across the platform

use serde::{Deserialize, Serialize};

use crate::models::{Container, ContainerType, ProductGroup};

/// Key identifying a product group within a location
///
/// Containers aggregate into one group per (product name, container type)
/// pair, so the same product packaged as kegs and as cases forms two groups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductKey {
    pub product_name: String,
    pub container_type: ContainerType,
}

impl ProductKey {
    pub fn new(product_name: impl Into<String>, container_type: ContainerType) -> Self {
        Self {
            product_name: product_name.into(),
            container_type,
        }
    }

    /// Key of the group a container belongs to
    pub fn of(container: &Container) -> Self {
        Self {
            product_name: container.product_name.clone(),
            container_type: container.container_type,
        }
    }

    /// Whether a product group carries this key
    pub fn matches(&self, group: &ProductGroup) -> bool {
        group.product_name == self.product_name && group.container_type == self.container_type
    }
}

/// Kind of an outward-facing notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
