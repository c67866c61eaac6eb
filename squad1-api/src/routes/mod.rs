/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`, `sellers`, `shipments`, `orders`, `tickets`: Dataset lookups
/// - `tracker`: Manual tracker cards
/// - `chat`: Scripted support assistant
/// - `token`: Nugget access-token relay
/// - `pages`: Landing page, widget loader and widget configuration

pub mod chat;
pub mod health;
pub mod orders;
pub mod pages;
pub mod sellers;
pub mod shipments;
pub mod tickets;
pub mod token;
pub mod tracker;
pub mod users;

use crate::error::{ApiError, ApiResult};
use serde::Deserialize;
use squad1_shared::lookup::normalize_query;

/// `?id=` query shared by the lookup endpoints
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Returns the trimmed id, or 400 `"<entity> ID required"`
    pub fn require(&self, entity: &str) -> ApiResult<&str> {
        normalize_query(self.id.as_deref())
            .ok_or_else(|| ApiError::BadRequest(format!("{} ID required", entity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        let q = IdQuery {
            id: Some(" u_1 ".to_string()),
        };
        assert_eq!(q.require("User").unwrap(), "u_1");

        let err = IdQuery::default().require("Order").unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Order ID required");

        let blank = IdQuery {
            id: Some("  ".to_string()),
        };
        assert!(blank.require("Seller").is_err());
    }
}
