/// Order model
///
/// An order links a buyer (`user_id`), the seller handing the item over and
/// the shipment carrying it. Status follows the authentication pipeline:
///
/// ```text
/// PICKUP_PENDING -> AUTHENTICATING -> SHIPPED -> DELIVERED
/// ```
///
/// `accountability` names the party currently responsible for a delay. The
/// stored value is what the API reports; `crate::accountability::assess`
/// derives the same value from the order's timeline.
///
/// # Example
///
/// ```
/// use squad1_shared::models::order::{Accountability, OrderStatus};
///
/// assert_eq!(OrderStatus::PickupPending.as_str(), "PICKUP_PENDING");
/// assert_eq!(Accountability::Platform.as_str(), "SQUAD1");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting for the seller to hand the item over
    PickupPending,

    /// Item is with Squad1 for authentication
    Authenticating,

    /// Dispatched to the buyer
    Shipped,

    /// Received by the buyer
    Delivered,
}

impl OrderStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PickupPending => "PICKUP_PENDING",
            OrderStatus::Authenticating => "AUTHENTICATING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    /// Whether the item has left Squad1
    pub fn is_outbound(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PICKUP_PENDING" => Ok(OrderStatus::PickupPending),
            "AUTHENTICATING" => Ok(OrderStatus::Authenticating),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// Party responsible for a delayed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accountability {
    /// Seller missed the pickup
    Seller,

    /// Courier picked up but has not dispatched
    ShippingPartner,

    /// Squad1 itself (authentication, address checks, escalations)
    #[serde(rename = "SQUAD1")]
    Platform,

    /// Nobody, the order is on track
    None,
}

impl Accountability {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Accountability::Seller => "SELLER",
            Accountability::ShippingPartner => "SHIPPING_PARTNER",
            Accountability::Platform => "SQUAD1",
            Accountability::None => "NONE",
        }
    }

    /// Human label shown by the tracker widget (empty when nobody is responsible)
    pub fn label(&self) -> &'static str {
        match self {
            Accountability::Seller => "Resp: Seller",
            Accountability::ShippingPartner => "Resp: Shipping Partner",
            Accountability::Platform => "Resp: Squad1 Team",
            Accountability::None => "",
        }
    }
}

impl fmt::Display for Accountability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID (e.g. `ord_123`)
    pub id: String,

    /// Buyer
    pub user_id: String,

    /// Seller handing the item over
    pub seller_id: String,

    /// Shipment carrying the item
    pub shipment_id: String,

    /// Display name of the product
    pub product_name: String,

    /// Pipeline status
    pub status: OrderStatus,

    /// Party responsible for a delay
    pub accountability: Accountability,

    /// When the seller must hand the item over
    pub pickup_deadline: DateTime<Utc>,

    /// When the item was actually picked up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_actual_time: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether the pickup deadline has passed without a pickup
    pub fn pickup_overdue(&self, now: DateTime<Utc>) -> bool {
        self.pickup_actual_time.is_none() && self.pickup_deadline < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_order_status_roundtrip_str() {
        for status in [
            OrderStatus::PickupPending,
            OrderStatus::Authenticating,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("LOST".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_accountability_wire_names() {
        assert_eq!(
            serde_json::to_string(&Accountability::Platform).unwrap(),
            "\"SQUAD1\""
        );
        assert_eq!(
            serde_json::to_string(&Accountability::ShippingPartner).unwrap(),
            "\"SHIPPING_PARTNER\""
        );
        let parsed: Accountability = serde_json::from_str("\"NONE\"").unwrap();
        assert_eq!(parsed, Accountability::None);
    }

    #[test]
    fn test_pickup_time_omitted_when_absent() {
        let now = Utc::now();
        let order = Order {
            id: "ord_1".to_string(),
            user_id: "u_1".to_string(),
            seller_id: "s1".to_string(),
            shipment_id: "shp_1".to_string(),
            product_name: "Bag".to_string(),
            status: OrderStatus::PickupPending,
            accountability: Accountability::Seller,
            pickup_deadline: now - Duration::hours(1),
            pickup_actual_time: None,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("pickup_actual_time").is_none());
        assert_eq!(json["status"], "PICKUP_PENDING");
        assert!(order.pickup_overdue(now));
    }
}
