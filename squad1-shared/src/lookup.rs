/// Order resolution
///
/// Support agents and the chat bot refer to orders loosely: a full id
/// (`ord_123`), a fragment (`123`) or the buyer's id (`u_23`). Resolution
/// tries, in order:
///
/// 1. exact order id
/// 2. first order whose id contains the query
/// 3. first order placed by a user with that exact id
///
/// An exact match always wins, so a fragment that also happens to be a full
/// id never resolves to a different order.

use crate::models::Order;
use serde::Serialize;

/// How an order query was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Query equals the order id
    Exact,

    /// Query is a substring of the order id
    Partial,

    /// Query equals the buyer's user id
    ByUser,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Partial => "partial",
            MatchKind::ByUser => "by_user",
        }
    }
}

/// Normalizes a raw query parameter
///
/// Returns `None` for missing, empty or whitespace-only input. An empty
/// fragment would otherwise match every order.
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|q| !q.is_empty())
}

/// Resolves an order query against `orders`
///
/// # Example
///
/// ```
/// use squad1_shared::{fixtures, lookup::{resolve_order, MatchKind}};
///
/// let db = fixtures::generate(chrono::Utc::now());
/// let (kind, order) = resolve_order(&db.orders, "123").unwrap();
/// assert_eq!(kind, MatchKind::Partial);
/// assert_eq!(order.id, "ord_123");
/// ```
pub fn resolve_order<'a>(orders: &'a [Order], query: &str) -> Option<(MatchKind, &'a Order)> {
    if query.is_empty() {
        return None;
    }

    orders
        .iter()
        .find(|o| o.id == query)
        .map(|o| (MatchKind::Exact, o))
        .or_else(|| {
            orders
                .iter()
                .find(|o| o.id.contains(query))
                .map(|o| (MatchKind::Partial, o))
        })
        .or_else(|| {
            orders
                .iter()
                .find(|o| o.user_id == query)
                .map(|o| (MatchKind::ByUser, o))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Utc;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some("")), None);
        assert_eq!(normalize_query(Some("   ")), None);
        assert_eq!(normalize_query(Some(" ord_101 ")), Some("ord_101"));
    }

    #[test]
    fn test_exact_match() {
        let db = fixtures::generate(Utc::now());
        let (kind, order) = resolve_order(&db.orders, "ord_142").unwrap();
        assert_eq!(kind, MatchKind::Exact);
        assert_eq!(order.id, "ord_142");
    }

    #[test]
    fn test_exact_match_beats_earlier_partial() {
        let db = fixtures::generate(Utc::now());
        let mut orders = db.orders.clone();
        // "ord_11" is a prefix of ord_110..ord_119, which precede it here
        let mut short = orders[0].clone();
        short.id = "ord_11".to_string();
        orders.push(short);

        let (kind, order) = resolve_order(&orders, "ord_11").unwrap();
        assert_eq!(kind, MatchKind::Exact);
        assert_eq!(order.id, "ord_11");
    }

    #[test]
    fn test_partial_match_returns_first() {
        let db = fixtures::generate(Utc::now());
        let (kind, order) = resolve_order(&db.orders, "ord_11").unwrap();
        assert_eq!(kind, MatchKind::Partial);
        assert_eq!(order.id, "ord_110");
    }

    #[test]
    fn test_user_fallback() {
        let db = fixtures::generate(Utc::now());
        let (kind, order) = resolve_order(&db.orders, "u_7").unwrap();
        assert_eq!(kind, MatchKind::ByUser);
        assert_eq!(order.id, "ord_107");
    }

    #[test]
    fn test_no_match() {
        let db = fixtures::generate(Utc::now());
        assert!(resolve_order(&db.orders, "ord_999").is_none());
        assert!(resolve_order(&db.orders, "").is_none());
    }
}
