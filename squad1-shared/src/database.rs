/// In-process dataset
///
/// `Database` is the whole dataset as plain vectors, the same shape that is
/// written to disk by the JSON file store. Stores wrap it behind a lock; the
/// methods here are the synchronous queries and mutations they delegate to.
///
/// Collections are small, so every query is a linear scan.

use crate::lookup::{self, MatchKind};
use crate::models::{
    CreateTicket, Order, OrderStatus, Seller, Shipment, Ticket, TicketFilter, TicketStatus, User,
};
use serde::{Deserialize, Serialize};

/// Complete dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub sellers: Vec<Seller>,

    #[serde(default)]
    pub orders: Vec<Order>,

    #[serde(default)]
    pub shipments: Vec<Shipment>,

    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

/// Record counts, reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub users: usize,
    pub sellers: usize,
    pub orders: usize,
    pub shipments: usize,
    pub tickets: usize,
}

impl Database {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn seller(&self, id: &str) -> Option<&Seller> {
        self.sellers.iter().find(|s| s.id == id)
    }

    pub fn shipment(&self, id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.id == id)
    }

    /// Reverse lookup: the shipment pointing at `order_id`
    pub fn shipment_for_order(&self, order_id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.order_id == order_id)
    }

    pub fn order_exact(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Resolves a loose order reference (see [`lookup::resolve_order`])
    pub fn resolve_order(&self, query: &str) -> Option<(MatchKind, &Order)> {
        lookup::resolve_order(&self.orders, query)
    }

    pub fn orders_for_user(&self, user_id: &str) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.user_id == user_id).collect()
    }

    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn tickets(&self, filter: &TicketFilter) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Whether an unresolved ticket exists for the order
    pub fn has_open_ticket(&self, order_id: &str) -> bool {
        self.tickets
            .iter()
            .any(|t| t.order_id == order_id && t.is_open())
    }

    /// Sets the status of the order with exactly this id
    ///
    /// Returns the updated order, or `None` if no order has that id.
    pub fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> Option<&Order> {
        let order = self.orders.iter_mut().find(|o| o.id == order_id)?;
        order.status = status;
        Some(order)
    }

    /// Appends a new open ticket with the given id
    pub fn insert_ticket(&mut self, id: String, data: CreateTicket) -> &Ticket {
        self.tickets.push(Ticket {
            id,
            order_id: data.order_id,
            user_id: data.user_id,
            issue_type: data.issue_type,
            status: TicketStatus::Open,
            callback_scheduled_for: data.callback_scheduled_for,
        });
        // just pushed
        &self.tickets[self.tickets.len() - 1]
    }

    /// Marks a ticket resolved; returns `None` for an unknown id
    pub fn resolve_ticket(&mut self, id: &str) -> Option<&Ticket> {
        let ticket = self.tickets.iter_mut().find(|t| t.id == id)?;
        ticket.status = TicketStatus::Resolved;
        Some(ticket)
    }

    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            users: self.users.len(),
            sellers: self.sellers.len(),
            orders: self.orders.len(),
            shipments: self.shipments.len(),
            tickets: self.tickets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::IssueType;
    use chrono::Utc;

    #[test]
    fn test_shipment_reverse_lookup() {
        let db = fixtures::generate(Utc::now());
        let shipment = db.shipment_for_order("ord_115").unwrap();
        assert_eq!(shipment.id, "shp_1015");
        assert!(db.shipment_for_order("ord_999").is_none());
    }

    #[test]
    fn test_orders_for_user() {
        let db = fixtures::generate(Utc::now());
        let orders = db.orders_for_user("u_12");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "ord_112");
        assert!(db.orders_for_user("u_999").is_empty());
    }

    #[test]
    fn test_update_order_status() {
        let mut db = fixtures::generate(Utc::now());
        let updated = db
            .update_order_status("ord_121", OrderStatus::Shipped)
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(
            db.order_exact("ord_121").unwrap().status,
            OrderStatus::Shipped
        );

        // partial ids are not accepted for writes
        assert!(db.update_order_status("121", OrderStatus::Shipped).is_none());
    }

    #[test]
    fn test_ticket_lifecycle() {
        let mut db = fixtures::generate(Utc::now());
        assert!(!db.has_open_ticket("ord_101"));

        let ticket = db.insert_ticket(
            "tkt_new".to_string(),
            CreateTicket {
                order_id: "ord_101".to_string(),
                user_id: "u_1".to_string(),
                issue_type: IssueType::PickupDelay,
                callback_scheduled_for: None,
            },
        );
        assert!(ticket.is_open());
        assert!(db.has_open_ticket("ord_101"));

        let resolved = db.resolve_ticket("tkt_new").unwrap();
        assert_eq!(resolved.status, TicketStatus::Resolved);
        assert!(!db.has_open_ticket("ord_101"));
        assert!(db.resolve_ticket("tkt_missing").is_none());
    }

    #[test]
    fn test_ticket_filter() {
        let db = fixtures::generate(Utc::now());
        let filter = TicketFilter {
            user_id: Some("u_34".to_string()),
            order_id: None,
        };
        let tickets = db.tickets(&filter);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id, "tkt_34");
    }
}
