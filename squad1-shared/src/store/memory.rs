/// In-memory store
///
/// Holds the dataset behind a `tokio::sync::RwLock`. Readers run
/// concurrently; each mutation takes the write lock for its whole
/// read-modify-write.

use super::{new_ticket_id, OrderLookup, Store, StoreResult};
use crate::database::{Database, DatabaseStats};
use crate::fixtures;
use crate::models::{
    CreateTicket, Order, OrderStatus, Seller, Shipment, Ticket, TicketFilter, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: RwLock<Database>,
}

impl MemoryStore {
    /// Wraps an existing dataset
    pub fn new(db: Database) -> Self {
        Self {
            db: RwLock::new(db),
        }
    }

    /// Creates a store seeded with the demo fixtures relative to `now`
    pub fn with_fixtures(now: DateTime<Utc>) -> Self {
        Self::new(fixtures::generate(now))
    }

    /// Underlying lock, for stores layering persistence on top
    pub(crate) fn lock(&self) -> &RwLock<Database> {
        &self.db
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.db.read().await.user(id).cloned())
    }

    async fn seller(&self, id: &str) -> StoreResult<Option<Seller>> {
        Ok(self.db.read().await.seller(id).cloned())
    }

    async fn shipment(&self, id: &str) -> StoreResult<Option<Shipment>> {
        Ok(self.db.read().await.shipment(id).cloned())
    }

    async fn find_order(&self, query: &str) -> StoreResult<Option<OrderLookup>> {
        let db = self.db.read().await;
        Ok(db
            .resolve_order(query)
            .map(|(kind, order)| OrderLookup::build(&db, kind, order)))
    }

    async fn orders_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        Ok(self
            .db
            .read()
            .await
            .orders_for_user(user_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn ticket(&self, id: &str) -> StoreResult<Option<Ticket>> {
        Ok(self.db.read().await.ticket(id).cloned())
    }

    async fn tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        Ok(self
            .db
            .read()
            .await
            .tickets(filter)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>> {
        Ok(self
            .db
            .write()
            .await
            .update_order_status(order_id, status)
            .cloned())
    }

    async fn create_ticket(&self, data: CreateTicket) -> StoreResult<Ticket> {
        Ok(self
            .db
            .write()
            .await
            .insert_ticket(new_ticket_id(), data)
            .clone())
    }

    async fn resolve_ticket(&self, id: &str) -> StoreResult<Option<Ticket>> {
        Ok(self.db.write().await.resolve_ticket(id).cloned())
    }

    async fn stats(&self) -> StoreResult<DatabaseStats> {
        Ok(self.db.read().await.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MatchKind;
    use crate::models::IssueType;

    #[tokio::test]
    async fn test_find_order_embeds_related_records() {
        let store = MemoryStore::with_fixtures(Utc::now());
        let lookup = store.find_order("ord_125").await.unwrap().unwrap();

        assert_eq!(lookup.kind, MatchKind::Exact);
        assert_eq!(lookup.shipment.unwrap().id, "shp_1025");
        assert_eq!(lookup.user.unwrap().id, "u_25");
        assert!(!lookup.has_open_ticket);
    }

    #[tokio::test]
    async fn test_escalated_order_has_open_ticket() {
        let store = MemoryStore::with_fixtures(Utc::now());
        let lookup = store.find_order("ord_132").await.unwrap().unwrap();
        assert!(lookup.has_open_ticket);
    }

    #[tokio::test]
    async fn test_create_ticket_generates_unique_ids() {
        let store = MemoryStore::with_fixtures(Utc::now());
        let data = CreateTicket {
            order_id: "ord_105".to_string(),
            user_id: "u_5".to_string(),
            issue_type: IssueType::PickupDelay,
            callback_scheduled_for: None,
        };

        let a = store.create_ticket(data.clone()).await.unwrap();
        let b = store.create_ticket(data).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("tkt_"));

        let filter = TicketFilter {
            order_id: Some("ord_105".to_string()),
            user_id: None,
        };
        assert_eq!(store.tickets(&filter).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_stats() {
        let store = MemoryStore::with_fixtures(Utc::now());
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.orders, 50);
        assert_eq!(stats.tickets, 5);
        assert_eq!(store.kind(), "memory");
    }
}
