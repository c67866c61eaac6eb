/// Repository layer
///
/// Request handlers never touch the dataset directly; they go through the
/// [`Store`] trait, injected as `Arc<dyn Store>`.
///
/// # Implementations
///
/// - [`MemoryStore`]: fixtures held in memory, lost on restart
/// - [`JsonFileStore`]: same data, rewritten to a JSON file after every
///   mutation
///
/// # Example
///
/// ```
/// use squad1_shared::store::{MemoryStore, Store};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), squad1_shared::store::StoreError> {
/// let store = MemoryStore::with_fixtures(chrono::Utc::now());
/// let lookup = store.find_order("ord_123").await?.unwrap();
/// assert_eq!(lookup.order.id, "ord_123");
/// assert!(lookup.shipment.is_some());
/// # Ok(())
/// # }
/// ```

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::accountability::{self, OrderContext};
use crate::database::{Database, DatabaseStats};
use crate::lookup::MatchKind;
use crate::models::{
    Accountability, CreateTicket, Order, OrderStatus, Seller, Shipment, Ticket, TicketFilter,
    User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid dataset
    #[error("Storage format error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// A resolved order together with the records around it
#[derive(Debug, Clone)]
pub struct OrderLookup {
    /// How the query matched
    pub kind: MatchKind,

    /// The order
    pub order: Order,

    /// Shipment pointing at the order, if any
    pub shipment: Option<Shipment>,

    /// Buyer, if the user id resolves
    pub user: Option<User>,

    /// Whether an unresolved ticket exists for the order
    pub has_open_ticket: bool,
}

impl OrderLookup {
    pub(crate) fn build(db: &Database, kind: MatchKind, order: &Order) -> Self {
        Self {
            kind,
            order: order.clone(),
            shipment: db.shipment_for_order(&order.id).cloned(),
            user: db.user(&order.user_id).cloned(),
            has_open_ticket: db.has_open_ticket(&order.id),
        }
    }

    /// Re-derives accountability from the order's timeline
    pub fn assess(&self, now: DateTime<Utc>) -> Accountability {
        accountability::assess(
            OrderContext {
                order: &self.order,
                shipment: self.shipment.as_ref(),
                user: self.user.as_ref(),
                has_open_ticket: self.has_open_ticket,
            },
            now,
        )
    }
}

/// Repository over the support dataset
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and health checks
    fn kind(&self) -> &'static str;

    async fn user(&self, id: &str) -> StoreResult<Option<User>>;

    async fn seller(&self, id: &str) -> StoreResult<Option<Seller>>;

    async fn shipment(&self, id: &str) -> StoreResult<Option<Shipment>>;

    /// Resolves a loose order reference (exact, partial, then by user)
    async fn find_order(&self, query: &str) -> StoreResult<Option<OrderLookup>>;

    async fn orders_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>>;

    async fn ticket(&self, id: &str) -> StoreResult<Option<Ticket>>;

    async fn tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>>;

    /// Updates the status of the order with exactly this id
    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>>;

    /// Opens a ticket and returns it with its generated id
    async fn create_ticket(&self, data: CreateTicket) -> StoreResult<Ticket>;

    async fn resolve_ticket(&self, id: &str) -> StoreResult<Option<Ticket>>;

    async fn stats(&self) -> StoreResult<DatabaseStats>;
}

/// Generates an id for a new ticket
pub(crate) fn new_ticket_id() -> String {
    format!("tkt_{}", uuid::Uuid::new_v4().simple())
}
