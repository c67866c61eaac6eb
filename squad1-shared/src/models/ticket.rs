/// Support ticket model
///
/// Tickets are opened when a buyer escalates ("talk to someone") and carry an
/// optional scheduled callback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reason the ticket was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    /// Seller has not handed the item over
    PickupDelay,

    /// Shipping partner has not dispatched
    ShippingDelay,

    /// Buyer is unsure about the delivery address
    AddressConcern,
}

impl IssueType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::PickupDelay => "PICKUP_DELAY",
            IssueType::ShippingDelay => "SHIPPING_DELAY",
            IssueType::AddressConcern => "ADDRESS_CONCERN",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PICKUP_DELAY" => Ok(IssueType::PickupDelay),
            "SHIPPING_DELAY" => Ok(IssueType::ShippingDelay),
            "ADDRESS_CONCERN" => Ok(IssueType::AddressConcern),
            other => Err(format!("unknown issue type: {}", other)),
        }
    }
}

/// Ticket lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Resolved,
}

impl TicketStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::Resolved => "RESOLVED",
        }
    }
}

/// Support ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket ID (e.g. `tkt_31`)
    pub id: String,

    /// Order the ticket is about
    pub order_id: String,

    /// Buyer who escalated
    pub user_id: String,

    /// Reason for the escalation
    pub issue_type: IssueType,

    /// Open or resolved
    pub status: TicketStatus,

    /// When a human agent will call back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_scheduled_for: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Whether the ticket still needs attention
    pub fn is_open(&self) -> bool {
        self.status == TicketStatus::Open
    }
}

/// Input for opening a ticket
#[derive(Debug, Clone)]
pub struct CreateTicket {
    /// Order the ticket is about
    pub order_id: String,

    /// Buyer, taken from the order
    pub user_id: String,

    /// Reason for the escalation
    pub issue_type: IssueType,

    /// Optional callback time
    pub callback_scheduled_for: Option<DateTime<Utc>>,
}

/// Filter for listing tickets
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Only tickets for this order
    pub order_id: Option<String>,

    /// Only tickets for this user
    pub user_id: Option<String>,
}

impl TicketFilter {
    /// Whether the ticket satisfies every set criterion
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.order_id.as_deref().map_or(true, |id| ticket.order_id == id)
            && self.user_id.as_deref().map_or(true, |id| ticket.user_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket {
            id: "tkt_1".to_string(),
            order_id: "ord_131".to_string(),
            user_id: "u_31".to_string(),
            issue_type: IssueType::ShippingDelay,
            status: TicketStatus::Open,
            callback_scheduled_for: None,
        }
    }

    #[test]
    fn test_filter_matches() {
        let t = ticket();
        assert!(TicketFilter::default().matches(&t));
        assert!(TicketFilter {
            order_id: Some("ord_131".to_string()),
            user_id: None,
        }
        .matches(&t));
        assert!(!TicketFilter {
            order_id: Some("ord_131".to_string()),
            user_id: Some("u_1".to_string()),
        }
        .matches(&t));
    }

    #[test]
    fn test_issue_type_parse() {
        assert_eq!(
            "address_concern".parse::<IssueType>().unwrap(),
            IssueType::AddressConcern
        );
        assert!("LOST_PARCEL".parse::<IssueType>().is_err());
    }

    #[test]
    fn test_ticket_serialization() {
        let json = serde_json::to_value(ticket()).unwrap();
        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["issue_type"], "SHIPPING_DELAY");
        assert!(json.get("callback_scheduled_for").is_none());
    }
}
