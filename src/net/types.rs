//! Wire DTOs for the marketplace REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON verbatim so serde needs no renames.
//! Listings and orders are server-owned and read-only here; optional fields
//! default instead of failing so a sparse record still renders.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categories offered by the listing search form.
pub const LISTING_CATEGORIES: [&str; 6] = ["grains", "vegetables", "fruits", "legumes", "roots", "other"];

/// Marketplace role attached to every account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Buyer,
    /// Field officer.
    Officer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Buyer => "buyer",
            Self::Officer => "officer",
        }
    }

    /// Buyers are the only role allowed to see orders.
    #[must_use]
    pub fn sees_orders(self) -> bool {
        matches!(self, Self::Buyer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}` (expected farmer, buyer or officer)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Self::Farmer),
            "buyer" => Ok(Self::Buyer),
            "officer" => Ok(Self::Officer),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

/// Backend record identifier. The API hands out integers today but strings
/// are accepted so a backend switch to UUIDs does not break sessions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A money or quantity value. FastAPI serializes `Decimal` columns as
/// strings, so both JSON numbers and strings are accepted and shown as sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The authenticated user as persisted in the session store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: RecordId,
    pub name: String,
    pub role: Role,
}

/// A produce listing as returned by `GET /listings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub unit_price: Amount,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity_available: Amount,
    /// Grade assigned by a field officer, if inspected.
    #[serde(default)]
    pub quality_grade: Option<String>,
}

/// A single line item within an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub title: Option<String>,
}

/// A buyer order as returned by `GET /orders`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: Amount,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: RecordId,
    pub name: String,
    pub role: Role,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub region: String,
}

/// Body of a successful `POST /auth/signup`. Name and role are not echoed
/// back, so the caller takes them from the submitted form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub id: RecordId,
    pub token: String,
}
