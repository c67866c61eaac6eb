/// Scripted support assistant
///
/// Canned-response chat used by the landing page when the vendor widget is
/// disabled. Messages are classified by keyword; order questions are answered
/// from the store and escalations open a ticket with a callback.

use crate::lookup::normalize_query;
use crate::models::{Accountability, CreateTicket, IssueType, TicketFilter};
use crate::store::{OrderLookup, Store, StoreResult};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Hours until a human agent calls back after an escalation
pub const CALLBACK_DELAY_HOURS: i64 = 2;

const ESCALATION_WORDS: &[&str] = &[
    "human",
    "agent",
    "someone",
    "representative",
    "call me",
    "escalate",
];
const ADDRESS_WORDS: &[&str] = &["address", "deliver to", "wrong house"];
const GREETING_WORDS: &[&str] = &["hi", "hello", "hey"];

/// What the buyer is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Wants a person, optionally about a specific order
    Escalate(Option<String>),

    /// Asks about an order
    OrderStatus(String),

    /// Asks about the delivery address
    Address,

    Greeting,

    /// Anything else
    Help,
}

/// Assistant answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Text shown in the chat bubble
    pub reply: String,

    /// Order the answer is about, when one was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Ticket opened by this message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

impl Reply {
    fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            order_id: None,
            ticket_id: None,
        }
    }
}

/// Finds an order reference: an `ord_` token or a bare number of 3+ digits
pub fn extract_order_ref(message: &str) -> Option<String> {
    message
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map(|token| token.to_ascii_lowercase())
        .find(|token| {
            let digits = token.strip_prefix("ord_").unwrap_or(token);
            digits.len() >= 3 && digits.chars().all(|c| c.is_ascii_digit())
        })
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn has_word(haystack: &str, words: &[&str]) -> bool {
    haystack
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| words.contains(&token))
}

/// Classifies a chat message
pub fn classify(message: &str) -> Intent {
    let lower = message.to_ascii_lowercase();
    let order_ref = extract_order_ref(&lower);

    if contains_any(&lower, ESCALATION_WORDS) {
        return Intent::Escalate(order_ref);
    }
    if let Some(order_ref) = order_ref {
        return Intent::OrderStatus(order_ref);
    }
    if contains_any(&lower, ADDRESS_WORDS) {
        return Intent::Address;
    }
    if has_word(&lower, GREETING_WORDS) {
        return Intent::Greeting;
    }
    Intent::Help
}

/// Describes where an order stands and who is on the hook
fn narrate(lookup: &OrderLookup, now: DateTime<Utc>) -> String {
    let order = &lookup.order;
    let head = format!("Order {} ({})", order.id, order.product_name);

    match order.accountability {
        Accountability::Seller => {
            let late = (now - order.pickup_deadline).num_hours().max(0);
            format!(
                "{head} is waiting for the seller to hand it over. The pickup deadline passed {late}h ago and we are chasing the seller."
            )
        }
        Accountability::ShippingPartner => {
            let partner = lookup
                .shipment
                .as_ref()
                .map_or("our shipping partner", |s| s.partner_name.as_str());
            format!(
                "{head} was picked up but {partner} has not dispatched it yet. We have escalated with them."
            )
        }
        Accountability::Platform if lookup.has_open_ticket => format!(
            "{head} is with our team and a support agent is already handling your case."
        ),
        Accountability::Platform => match &lookup.user {
            Some(user) if !user.address_verified => format!(
                "{head} is being authenticated. Before we ship, please confirm your delivery address: {}.",
                user.address
            ),
            _ => format!("{head} is being authenticated by the Squad1 team."),
        },
        Accountability::None => match lookup.shipment.as_ref().and_then(|s| s.tracking_link.as_ref()) {
            Some(link) => format!("{head} is on its way. Track it here: {link}"),
            None => format!("{head} is on track. Status: {}.", order.status),
        },
    }
}

/// Issue type for an escalation about this order
fn issue_for(lookup: &OrderLookup) -> IssueType {
    match lookup.order.accountability {
        Accountability::Seller => IssueType::PickupDelay,
        _ if lookup.user.as_ref().map_or(false, |u| !u.address_verified) => {
            IssueType::AddressConcern
        }
        _ => IssueType::ShippingDelay,
    }
}

/// Opens a callback ticket for the resolved order
async fn open_escalation(
    store: &dyn Store,
    lookup: OrderLookup,
    now: DateTime<Utc>,
) -> StoreResult<Reply> {
    let callback = now + Duration::hours(CALLBACK_DELAY_HOURS);
    let ticket = store
        .create_ticket(CreateTicket {
            order_id: lookup.order.id.clone(),
            user_id: lookup.order.user_id.clone(),
            issue_type: issue_for(&lookup),
            callback_scheduled_for: Some(callback),
        })
        .await?;
    tracing::info!(
        ticket_id = %ticket.id,
        order_id = %lookup.order.id,
        "Opened escalation ticket from chat"
    );

    Ok(Reply {
        reply: format!(
            "I've opened ticket {} for order {}. A support agent will call you back around {} UTC.",
            ticket.id,
            lookup.order.id,
            callback.format("%H:%M")
        ),
        order_id: Some(lookup.order.id),
        ticket_id: Some(ticket.id),
    })
}

/// Answers one chat message
///
/// # Errors
///
/// Propagates store failures; an unknown order is an ordinary reply.
pub async fn respond(store: &dyn Store, message: &str, now: DateTime<Utc>) -> StoreResult<Reply> {
    let intent = classify(message);
    tracing::debug!(intent = ?intent, "Classified chat message");

    let reply = match intent {
        Intent::Escalate(order_ref) => {
            let lookup = match normalize_query(order_ref.as_deref()) {
                Some(q) => store.find_order(q).await?,
                None => None,
            };

            match lookup {
                Some(lookup) if lookup.has_open_ticket => {
                    let filter = TicketFilter {
                        order_id: Some(lookup.order.id.clone()),
                        user_id: None,
                    };
                    let existing = store
                        .tickets(&filter)
                        .await?
                        .into_iter()
                        .find(|t| t.is_open());

                    match existing {
                        Some(ticket) => {
                            tracing::debug!(
                                ticket_id = %ticket.id,
                                order_id = %lookup.order.id,
                                "Escalation matched an open ticket"
                            );
                            let when = ticket
                                .callback_scheduled_for
                                .map(|at| format!("around {} UTC", at.format("%H:%M")))
                                .unwrap_or_else(|| "shortly".to_string());
                            Reply {
                                reply: format!(
                                    "Ticket {} is already open for order {}. A support agent will call you back {}.",
                                    ticket.id, lookup.order.id, when
                                ),
                                order_id: Some(lookup.order.id),
                                ticket_id: Some(ticket.id),
                            }
                        }
                        None => open_escalation(store, lookup, now).await?,
                    }
                }
                Some(lookup) => open_escalation(store, lookup, now).await?,
                None => Reply::text(
                    "I can connect you with a support agent. Please share your order number first (for example ord_123).",
                ),
            }
        }
        Intent::OrderStatus(order_ref) => match store.find_order(&order_ref).await? {
            Some(lookup) => Reply {
                reply: narrate(&lookup, now),
                order_id: Some(lookup.order.id),
                ticket_id: None,
            },
            None => Reply::text(format!(
                "I couldn't find an order matching \"{}\". Please check the number and try again.",
                order_ref
            )),
        },
        Intent::Address => Reply::text(
            "We confirm delivery addresses before shipping. Share your order number and I'll check whether yours still needs confirmation.",
        ),
        Intent::Greeting => Reply::text(
            "Hi! I'm the Squad1 support assistant. Ask me about an order, for example \"where is order 123?\".",
        ),
        Intent::Help => Reply::text(
            "I can check an order's status, confirm delivery details, or get a person to call you back. Try \"status of ord_123\".",
        ),
    };

    Ok(reply)
}
