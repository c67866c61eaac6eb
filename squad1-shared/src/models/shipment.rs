/// Shipment model
///
/// One shipment per order. `is_dispatched` flips once the shipping partner
/// hands the parcel to the courier network; a tracking link is only issued
/// at that point.

use serde::{Deserialize, Serialize};

/// Shipment of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment ID (e.g. `shp_1042`)
    pub id: String,

    /// Order carried by this shipment
    pub order_id: String,

    /// Courier company
    pub partner_name: String,

    /// Courier phone
    pub partner_phone: String,

    /// Whether the parcel has left the partner's warehouse
    pub is_dispatched: bool,

    /// Public tracking URL, once dispatched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_link: Option<String>,
}
