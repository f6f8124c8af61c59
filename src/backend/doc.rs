//! Base document helpers shared by every concept: ids, timestamps and the
//! `{ "msg": ... }` acknowledgement body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;

/// Acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Msg {
    pub msg: String,
}

impl Msg {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Parse a record id taken from a path or query string
pub fn parse_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| BackendError::bad_values(format!("{raw} is not a valid id!")))
}

/// Fresh id for a new record
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Timestamp used for `date_created` / `date_updated`
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
