//! Notification and alert feed tests
//!
//! The board is the only writer of the notification feed and the alert
//! list; these tests drive it through real operations and check what the
//! presentation layer would see.

use chrono::Utc;

use container_tracking_engine::config::BoardConfig;
use container_tracking_engine::seed::{demo_seed, seed_board};
use container_tracking_engine::services::{AddContainersInput, BoardService};
use shared::alerts::compute_alerts;
use shared::models::ContainerType;
use shared::types::NotificationKind;

fn demo_board() -> BoardService {
    BoardService::new(seed_board(&demo_seed()), &BoardConfig::default())
}

#[test]
fn test_blocked_move_notification_carries_first_error() {
    let mut board = demo_board();
    let keg_id = board
        .locations()
        .iter()
        .find(|l| l.id == "tax-zone")
        .and_then(|l| l.containers().next())
        .map(|c| c.id.clone())
        .unwrap();

    board.record_move(&keg_id, "truck-1").unwrap();

    let latest = board.notifications().latest().unwrap();
    assert_eq!(latest.title, "Move Blocked");
    assert_eq!(latest.kind, NotificationKind::Error);
    assert_eq!(latest.message, "must be approved before loading");
}

#[test]
fn test_feed_accumulates_newest_first() {
    let mut board = demo_board();
    board.approve_order("ORD-1001").unwrap();
    board.load_order("ORD-1001", "truck-1").unwrap();
    board.start_route("truck-1").unwrap();

    let feed = board.notifications().all();
    assert_eq!(feed.len(), 3);
    assert_eq!(feed[0].title, "Route Started");
    assert_eq!(feed[1].title, "Loaded to Truck");
    assert_eq!(feed[2].title, "Order Approved");
    assert!(feed[0].created_at >= feed[2].created_at);
}

#[test]
fn test_unread_tracking_through_operations() {
    let mut board = demo_board();
    board.approve_order("ORD-1001").unwrap();
    assert_eq!(board.notifications().unread_count(), 1);

    let id = board.notifications().latest().unwrap().id;
    assert!(board.notifications_mut().mark_read(id));
    assert_eq!(board.notifications().unread_count(), 0);

    board.load_order("ORD-1001", "truck-1").unwrap();
    assert_eq!(board.notifications().unread_count(), 1);
    board.notifications_mut().mark_all_read();
    assert_eq!(board.notifications().unread_count(), 0);
}

#[test]
fn test_filter_feed_by_kind() {
    let mut board = demo_board();
    // One blocked load (error) and one approval (success)
    board.load_order("ORD-1001", "truck-1").unwrap();
    board.approve_order("ORD-1001").unwrap();

    let errors = board.notifications().of_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "Cannot Load");

    let successes = board.notifications().of_kind(NotificationKind::Success);
    assert_eq!(successes.len(), 1);
}

#[test]
fn test_alert_list_matches_fresh_recomputation() {
    // The stored alert list is always the full recomputation over the
    // current snapshot, never a stale or incremental view.
    let mut board = demo_board();
    board
        .add_containers(AddContainersInput {
            product_name: "Dry Cider".to_string(),
            container_type: ContainerType::Case,
            quantity: 2,
            location_id: "warehouse-1".to_string(),
            batch_id: "B-2024-061".to_string(),
            order_id: None,
            customer: None,
            volume_liters: None,
        })
        .unwrap();

    let fresh = compute_alerts(
        board.locations(),
        &BoardConfig::default().thresholds(),
        Utc::now().date_naive(),
    );
    assert_eq!(board.alerts(), fresh.as_slice());
    // The two-case group sits under the default reorder point
    assert!(board
        .alerts()
        .iter()
        .any(|a| a.id == "low_stock:warehouse-1:Dry Cider:case"));
}
