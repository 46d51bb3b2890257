//! Beverage Container Tracking Platform - Board Demo
//!
//! Seeds the sample cidery board and replays a delivery run: approve an
//! order, load it on the truck, start the route, deliver a keg, and add
//! stock by hand. Prints the resulting snapshot as JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use container_tracking_engine::services::{AddContainersInput, BoardService};
use container_tracking_engine::seed::{demo_seed, seed_board};
use container_tracking_engine::Config;
use shared::models::ContainerType;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ct_board=debug,container_tracking_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Beverage Container Tracking board");
    tracing::info!("Environment: {}", config.environment);

    let mut board = BoardService::new(seed_board(&demo_seed()), &config.board);
    tracing::info!(
        locations = board.locations().len(),
        containers = board.total_containers(),
        "board seeded"
    );

    // A full delivery run for the staged order
    board.approve_order("ORD-1001")?;
    board.load_order("ORD-1001", "truck-1")?;
    board.start_route("truck-1")?;

    // Deliver the first keg on the truck to Joe's Bar
    let first_on_truck = board
        .locations()
        .iter()
        .find(|l| l.id == "truck-1")
        .and_then(|l| l.containers().next())
        .map(|c| c.id.clone());
    if let Some(container_id) = first_on_truck {
        board.record_move(&container_id, "joes-bar")?;
    }

    // Manual stock entry at the warehouse
    board.add_containers(AddContainersInput {
        product_name: "Dry Cider".to_string(),
        container_type: ContainerType::Case,
        quantity: 5,
        location_id: "warehouse-1".to_string(),
        batch_id: "B-2024-061".to_string(),
        order_id: None,
        customer: None,
        volume_liters: None,
    })?;

    for (status, count) in board.count_by_status() {
        tracing::info!(count, "stage {status}");
    }
    for alert in board.alerts() {
        tracing::info!(severity = %alert.severity, "{}: {}", alert.title, alert.message);
    }
    tracing::info!(
        alerts = board.alerts().len(),
        unread = board.notifications().unread_count(),
        "delivery run complete"
    );

    println!("{}", serde_json::to_string_pretty(board.locations())?);

    Ok(())
}
