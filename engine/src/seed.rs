//! Board seeding
//!
//! The initial snapshot is never implicit global state; callers describe it
//! with a `BoardSeed` (deserializable, so a deployment can ship its own) and
//! build locations from it. `demo_seed` reproduces the sample cidery board
//! used by the demo binary and the integration tests.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{
    generate_container_id, Container, ContainerStatus, ContainerType, Location, LocationType,
};

/// Declarative description of a board's starting state
#[derive(Debug, Clone, Deserialize)]
pub struct BoardSeed {
    /// Epoch seconds folded into seeded container IDs, so seeded boards get
    /// stable, reproducible IDs
    pub id_epoch: i64,
    pub locations: Vec<LocationSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSeed {
    pub id: String,
    pub name: String,
    pub location_type: LocationType,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub stock: Vec<StockSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockSeed {
    pub product_name: String,
    pub container_type: ContainerType,
    pub batch_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub volume_liters: Option<Decimal>,
}

/// Build the canonical location list from a seed description
pub fn seed_board(seed: &BoardSeed) -> Vec<Location> {
    let mut serial = 0u64;
    seed.locations
        .iter()
        .map(|loc_seed| {
            let mut location = Location::new(
                loc_seed.id.clone(),
                loc_seed.name.clone(),
                loc_seed.location_type,
                loc_seed.capacity,
            );
            for stock in &loc_seed.stock {
                let volume = stock
                    .volume_liters
                    .unwrap_or_else(|| stock.container_type.default_volume_liters());
                for _ in 0..stock.quantity {
                    let id = generate_container_id(stock.container_type, seed.id_epoch, serial);
                    serial += 1;
                    location.insert_container(Container {
                        id,
                        product_id: stock
                            .product_name
                            .to_lowercase()
                            .split_whitespace()
                            .collect::<Vec<_>>()
                            .join("-"),
                        product_name: stock.product_name.clone(),
                        batch_id: stock.batch_id.clone(),
                        container_type: stock.container_type,
                        status: ContainerStatus::Pending,
                        location_id: String::new(),
                        order_id: stock.order_id.clone(),
                        customer: stock.customer.clone(),
                        volume_liters: volume,
                        due_date: None,
                        created_at: Utc::now(),
                    });
                }
            }
            location
        })
        .collect()
}

/// Sample cidery board: bonded storage, production, a warehouse, one truck,
/// three restaurant customers, and a cleaning bay
pub fn demo_seed() -> BoardSeed {
    BoardSeed {
        id_epoch: 1704067200,
        locations: vec![
            LocationSeed {
                id: "tax-zone".to_string(),
                name: "Bonded Storage".to_string(),
                location_type: LocationType::Tax,
                capacity: Some(120),
                stock: vec![
                    StockSeed {
                        product_name: "Hopped Cider".to_string(),
                        container_type: ContainerType::Keg,
                        batch_id: "B-2024-045".to_string(),
                        quantity: 6,
                        order_id: Some("ORD-1001".to_string()),
                        customer: Some("Joe's Bar".to_string()),
                        volume_liters: None,
                    },
                    StockSeed {
                        product_name: "Raspberry Cider".to_string(),
                        container_type: ContainerType::Keg,
                        batch_id: "B-2024-052".to_string(),
                        quantity: 4,
                        order_id: None,
                        customer: None,
                        volume_liters: None,
                    },
                ],
            },
            LocationSeed {
                id: "production-1".to_string(),
                name: "Production Floor".to_string(),
                location_type: LocationType::Production,
                capacity: None,
                stock: vec![StockSeed {
                    product_name: "Dry Cider".to_string(),
                    container_type: ContainerType::Keg,
                    batch_id: "B-2024-050".to_string(),
                    quantity: 6,
                    order_id: None,
                    customer: None,
                    volume_liters: None,
                }],
            },
            LocationSeed {
                id: "warehouse-1".to_string(),
                name: "Main Warehouse".to_string(),
                location_type: LocationType::Warehouse,
                capacity: Some(400),
                stock: vec![
                    StockSeed {
                        product_name: "Original Dry Cider".to_string(),
                        container_type: ContainerType::Case,
                        batch_id: "B-2024-048".to_string(),
                        quantity: 12,
                        order_id: None,
                        customer: None,
                        volume_liters: None,
                    },
                    StockSeed {
                        product_name: "Raspberry Cider".to_string(),
                        container_type: ContainerType::Case,
                        batch_id: "B-2024-049".to_string(),
                        quantity: 8,
                        order_id: None,
                        customer: None,
                        volume_liters: None,
                    },
                ],
            },
            LocationSeed {
                id: "truck-1".to_string(),
                name: "Route A".to_string(),
                location_type: LocationType::Truck,
                capacity: Some(10),
                stock: Vec::new(),
            },
            LocationSeed {
                id: "joes-bar".to_string(),
                name: "Joe's Bar".to_string(),
                location_type: LocationType::Customer,
                capacity: None,
                stock: Vec::new(),
            },
            LocationSeed {
                id: "main-st-pub".to_string(),
                name: "Main St Pub".to_string(),
                location_type: LocationType::Customer,
                capacity: None,
                stock: Vec::new(),
            },
            LocationSeed {
                id: "downtown-pub".to_string(),
                name: "Downtown Pub".to_string(),
                location_type: LocationType::Customer,
                capacity: None,
                stock: Vec::new(),
            },
            LocationSeed {
                id: "cleaning-bay".to_string(),
                name: "Keg Returns".to_string(),
                location_type: LocationType::Cleaning,
                capacity: None,
                stock: Vec::new(),
            },
        ],
    }
}
