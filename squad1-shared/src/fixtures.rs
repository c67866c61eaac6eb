/// Demo fixture generation
///
/// Builds the sample dataset the demo runs on. Every order belongs to one of
/// five scenario groups, each exercising a different support flow:
///
/// | Group | Users    | Scenario                     | Accountability     |
/// |-------|----------|------------------------------|--------------------|
/// | A     | 1..=10   | Seller missed pickup         | `SELLER`           |
/// | B     | 11..=20  | Picked up, not dispatched    | `SHIPPING_PARTNER` |
/// | C     | 21..=30  | Address needs confirmation   | `SQUAD1`           |
/// | D     | 31..=35  | Escalated, callback booked   | `SQUAD1`           |
/// | E     | 36..=50  | Shipped                      | `NONE`             |
///
/// All timestamps are relative to the `now` passed in, so the scenarios stay
/// meaningful whenever the process starts.

use crate::database::Database;
use crate::models::{
    Accountability, IssueType, Order, OrderStatus, Seller, Shipment, Ticket, TicketStatus, User,
};
use chrono::{DateTime, Duration, Utc};
use std::ops::RangeInclusive;

/// Courier used by every fixture shipment
pub const PARTNER_NAME: &str = "FastLogistics";

/// Courier phone used by every fixture shipment
pub const PARTNER_PHONE: &str = "+19999999";

/// Base URL for tracking links of dispatched shipments
pub const TRACKING_BASE_URL: &str = "https://track.squad1.com";

const SELLER_DELAY: RangeInclusive<u32> = 1..=10;
const SHIPPING_DELAY: RangeInclusive<u32> = 11..=20;
const ADDRESS_CHECK: RangeInclusive<u32> = 21..=30;
const ESCALATED: RangeInclusive<u32> = 31..=35;
const SHIPPED: RangeInclusive<u32> = 36..=50;

/// Per-group template
struct Scenario {
    name_prefix: &'static str,
    address: &'static str,
    address_verified: bool,
    seller_id: &'static str,
    product_name: &'static str,
    status: OrderStatus,
    accountability: Accountability,
    deadline_hours_ago: i64,
    picked_up_hours_ago: Option<i64>,
    dispatched: bool,
}

/// Order ID for fixture index `i`
pub fn order_id(i: u32) -> String {
    format!("ord_{}", 100 + i)
}

/// Shipment ID for fixture index `i`
pub fn shipment_id(i: u32) -> String {
    format!("shp_{}", 1000 + i)
}

/// User ID for fixture index `i`
pub fn user_id(i: u32) -> String {
    format!("u_{}", i)
}

fn sellers() -> Vec<Seller> {
    [
        ("s1", "Vintage Vault", "+15550101"),
        ("s2", "Luxe Bags NY", "+15550102"),
        ("s3", "Chronos Watches", "+15550103"),
        ("s4", "Sneaker Headz", "+15550104"),
        ("s5", "Rare Finds", "+15550105"),
    ]
    .into_iter()
    .map(|(id, name, phone)| Seller {
        id: id.to_string(),
        name: name.to_string(),
        contact_phone: phone.to_string(),
    })
    .collect()
}

fn push_group(db: &mut Database, range: RangeInclusive<u32>, scenario: &Scenario, now: DateTime<Utc>) {
    let hours_ago = |h: i64| now - Duration::hours(h);

    for i in range {
        let uid = user_id(i);
        let oid = order_id(i);
        let shp = shipment_id(i);

        db.users.push(User {
            id: uid.clone(),
            name: format!("{} User{}", scenario.name_prefix, i),
            phone: format!("+155500{}", i),
            email: format!("user{}@test.com", i),
            address: scenario.address.to_string(),
            address_verified: scenario.address_verified,
        });

        db.orders.push(Order {
            id: oid.clone(),
            user_id: uid,
            seller_id: scenario.seller_id.to_string(),
            shipment_id: shp.clone(),
            product_name: scenario.product_name.to_string(),
            status: scenario.status,
            accountability: scenario.accountability,
            pickup_deadline: hours_ago(scenario.deadline_hours_ago),
            pickup_actual_time: scenario.picked_up_hours_ago.map(hours_ago),
        });

        db.shipments.push(Shipment {
            id: shp,
            order_id: oid.clone(),
            partner_name: PARTNER_NAME.to_string(),
            partner_phone: PARTNER_PHONE.to_string(),
            is_dispatched: scenario.dispatched,
            tracking_link: scenario
                .dispatched
                .then(|| format!("{}/{}", TRACKING_BASE_URL, oid)),
        });
    }
}

/// Generates the full demo dataset relative to `now`
///
/// # Example
///
/// ```
/// use squad1_shared::fixtures;
///
/// let db = fixtures::generate(chrono::Utc::now());
/// assert_eq!(db.users.len(), 50);
/// assert_eq!(db.sellers.len(), 5);
/// ```
pub fn generate(now: DateTime<Utc>) -> Database {
    let mut db = Database {
        sellers: sellers(),
        ..Database::default()
    };

    push_group(
        &mut db,
        SELLER_DELAY,
        &Scenario {
            name_prefix: "SellerDelay",
            address: "123 Delayed St",
            address_verified: true,
            seller_id: "s1",
            product_name: "Hermes Birkin (Waiting)",
            status: OrderStatus::PickupPending,
            accountability: Accountability::Seller,
            deadline_hours_ago: 5,
            picked_up_hours_ago: None,
            dispatched: false,
        },
        now,
    );

    push_group(
        &mut db,
        SHIPPING_DELAY,
        &Scenario {
            name_prefix: "ShipDelay",
            address: "456 Warehouse Ave",
            address_verified: true,
            seller_id: "s2",
            product_name: "Rolex Submariner",
            status: OrderStatus::Authenticating,
            accountability: Accountability::ShippingPartner,
            deadline_hours_ago: 48,
            picked_up_hours_ago: Some(26),
            dispatched: false,
        },
        now,
    );

    push_group(
        &mut db,
        ADDRESS_CHECK,
        &Scenario {
            name_prefix: "VerifyMe",
            address: "789 Unsure Blvd",
            address_verified: false,
            seller_id: "s3",
            product_name: "Gucci Belt",
            status: OrderStatus::Authenticating,
            accountability: Accountability::Platform,
            deadline_hours_ago: 10,
            picked_up_hours_ago: Some(5),
            dispatched: false,
        },
        now,
    );

    push_group(
        &mut db,
        ESCALATED,
        &Scenario {
            name_prefix: "Angry",
            address: "101 Escalation Rd",
            address_verified: true,
            seller_id: "s4",
            product_name: "Lost Sneaker",
            status: OrderStatus::Authenticating,
            accountability: Accountability::Platform,
            deadline_hours_ago: 50,
            picked_up_hours_ago: None,
            dispatched: false,
        },
        now,
    );

    for i in ESCALATED {
        db.tickets.push(Ticket {
            id: format!("tkt_{}", i),
            order_id: order_id(i),
            user_id: user_id(i),
            issue_type: IssueType::ShippingDelay,
            status: TicketStatus::Open,
            callback_scheduled_for: Some(now + Duration::hours(2)),
        });
    }

    push_group(
        &mut db,
        SHIPPED,
        &Scenario {
            name_prefix: "Happy",
            address: "202 Happy Ln",
            address_verified: true,
            seller_id: "s5",
            product_name: "Louis Vuitton Wallet",
            status: OrderStatus::Shipped,
            accountability: Accountability::None,
            deadline_hours_ago: 100,
            picked_up_hours_ago: Some(98),
            dispatched: true,
        },
        now,
    );

    db
}
