/// User model
///
/// Buyers of authenticated goods. `address_verified` drives the address
/// confirmation flow: unverified buyers are held by Squad1 until the address
/// is confirmed.

use serde::{Deserialize, Serialize};

/// Buyer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID (e.g. `u_7`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Contact email
    pub email: String,

    /// Short delivery address
    pub address: String,

    /// Whether the delivery address has been confirmed
    pub address_verified: bool,
}
