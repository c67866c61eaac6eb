/// Manual tracker summaries
///
/// The landing page's tracker shows one card per order: the pipeline step, a
/// short message, who is responsible and a colour hint.

use crate::models::{Order, OrderStatus};
use serde::Serialize;

/// Colour hint for the tracker card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerColor {
    Yellow,
    Blue,
}

/// Tracker card for one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerStatus {
    pub order_id: String,
    pub step: String,
    pub message: String,
    pub accountability: String,
    pub color: TrackerColor,
}

impl TrackerStatus {
    /// Builds the card from the order's stored status and accountability
    pub fn for_order(order: &Order) -> Self {
        let (step, message, color) = match order.status {
            OrderStatus::PickupPending => (
                "Pickup Pending",
                "Waiting for seller handover.",
                TrackerColor::Yellow,
            ),
            OrderStatus::Authenticating => (
                "Authentication",
                "Your item is being authenticated.",
                TrackerColor::Blue,
            ),
            OrderStatus::Shipped => ("Shipped", "Your item is on its way.", TrackerColor::Blue),
            OrderStatus::Delivered => (
                "Delivered",
                "Your item has been delivered.",
                TrackerColor::Blue,
            ),
        };

        Self {
            order_id: order.id.clone(),
            step: step.to_string(),
            message: message.to_string(),
            accountability: order.accountability.label().to_string(),
            color,
        }
    }
}
