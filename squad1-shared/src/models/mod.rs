/// Domain models for Squad1
///
/// Flat records mirroring the support team's view of an order. References
/// between records are plain string ids and are not enforced.
///
/// # Models
///
/// - `user`: Buyers
/// - `seller`: Sellers handing items over
/// - `order`: Orders, pipeline status and accountability
/// - `shipment`: Courier shipments
/// - `ticket`: Support escalations

pub mod order;
pub mod seller;
pub mod shipment;
pub mod ticket;
pub mod user;

pub use order::{Accountability, Order, OrderStatus};
pub use seller::Seller;
pub use shipment::Shipment;
pub use ticket::{CreateTicket, IssueType, Ticket, TicketFilter, TicketStatus};
pub use user::User;
