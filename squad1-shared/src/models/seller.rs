/// Seller model

use serde::{Deserialize, Serialize};

/// Seller handing items over for authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    /// Seller ID (e.g. `s1`)
    pub id: String,

    /// Shop name
    pub name: String,

    /// Phone used for pickup follow-ups
    pub contact_phone: String,
}
