//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datetime::DateStyle;

/// Amount fields default to this many digits when the client sends no `max`.
pub const DEFAULT_AMOUNT_MAX: usize = 12;

/// Which mask to apply in `POST /api/v1/mask`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    Date,
    HourMinute,
    Hour,
    PostalCode,
    CreditCard,
    Phone,
    Amount,
}

#[derive(Debug, Deserialize)]
pub struct MaskIn {
    pub shape: MaskKind,
    /// `null` is accepted; only `phone` answers it with `null`.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub max: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskOut {
    pub formatted: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateIn {
    pub style: DateStyle,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateOut {
    pub formatted: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterIn {
    pub term: String,
    pub data: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterOut {
    pub data: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}
