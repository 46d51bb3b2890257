//! Board services for the Beverage Container Tracking Platform

pub mod board;
pub mod notification;

pub use board::{AddContainersInput, BoardObserver, BoardService};
pub use notification::NotificationCenter;
