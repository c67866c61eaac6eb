/// JSON file store
///
/// Keeps the dataset in memory and rewrites the whole file after every
/// successful mutation. The write lock is held until the file is on disk, so
/// two updates in this process cannot interleave and drop each other. The
/// file is written to a sibling `*.tmp` path and renamed into place.
///
/// Nothing guards against a second process writing the same file.
///
/// # File format
///
/// ```json
/// {
///   "users": [...],
///   "sellers": [...],
///   "orders": [...],
///   "shipments": [...],
///   "tickets": [...]
/// }
/// ```

use super::{new_ticket_id, MemoryStore, OrderLookup, Store, StoreError, StoreResult};
use crate::database::{Database, DatabaseStats};
use crate::fixtures;
use crate::models::{
    CreateTicket, Order, OrderStatus, Seller, Shipment, Ticket, TicketFilter, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Store persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens the dataset at `path`
    ///
    /// When the file does not exist it is created from the demo fixtures,
    /// generated relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or does not
    /// contain a valid dataset.
    pub async fn open(path: impl Into<PathBuf>, now: DateTime<Utc>) -> StoreResult<Self> {
        let path = path.into();

        let db = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let db: Database = serde_json::from_slice(&bytes)?;
                tracing::info!(
                    path = %path.display(),
                    orders = db.orders.len(),
                    "Loaded dataset from file"
                );
                db
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let db = fixtures::generate(now);
                write_atomic(&path, &db).await?;
                tracing::info!(path = %path.display(), "Seeded new dataset file from fixtures");
                db
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            inner: MemoryStore::new(db),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializes `db` to a temp file next to `path`, then renames it over `path`
async fn write_atomic(path: &Path, db: &Database) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(db)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Dataset written");
    Ok(())
}

#[async_trait]
impl Store for JsonFileStore {
    fn kind(&self) -> &'static str {
        "json_file"
    }

    async fn user(&self, id: &str) -> StoreResult<Option<User>> {
        self.inner.user(id).await
    }

    async fn seller(&self, id: &str) -> StoreResult<Option<Seller>> {
        self.inner.seller(id).await
    }

    async fn shipment(&self, id: &str) -> StoreResult<Option<Shipment>> {
        self.inner.shipment(id).await
    }

    async fn find_order(&self, query: &str) -> StoreResult<Option<OrderLookup>> {
        self.inner.find_order(query).await
    }

    async fn orders_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        self.inner.orders_for_user(user_id).await
    }

    async fn ticket(&self, id: &str) -> StoreResult<Option<Ticket>> {
        self.inner.ticket(id).await
    }

    async fn tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        self.inner.tickets(filter).await
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>> {
        let mut db = self.inner.lock().write().await;

        let previous = match db.order_exact(order_id) {
            Some(order) => order.status,
            None => return Ok(None),
        };

        let updated = db.update_order_status(order_id, status).cloned();
        if let Err(e) = write_atomic(&self.path, &db).await {
            // keep memory and disk in agreement
            db.update_order_status(order_id, previous);
            return Err(e);
        }

        Ok(updated)
    }

    async fn create_ticket(&self, data: CreateTicket) -> StoreResult<Ticket> {
        let mut db = self.inner.lock().write().await;

        let ticket = db.insert_ticket(new_ticket_id(), data).clone();
        if let Err(e) = write_atomic(&self.path, &db).await {
            db.tickets.pop();
            return Err(e);
        }

        Ok(ticket)
    }

    async fn resolve_ticket(&self, id: &str) -> StoreResult<Option<Ticket>> {
        let mut db = self.inner.lock().write().await;

        let previous = match db.ticket(id) {
            Some(ticket) => ticket.status,
            None => return Ok(None),
        };

        let resolved = db.resolve_ticket(id).cloned();
        if let Err(e) = write_atomic(&self.path, &db).await {
            if let Some(ticket) = db.tickets.iter_mut().find(|t| t.id == id) {
                ticket.status = previous;
            }
            return Err(e);
        }

        Ok(resolved)
    }

    async fn stats(&self) -> StoreResult<DatabaseStats> {
        self.inner.stats().await
    }
}
