//! Corporation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id_serde;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corporation {
    #[serde(with = "id_serde")]
    pub id: String,

    pub name: String,

    /// Parent corporation for nested corporations
    #[serde(default, with = "id_serde::option", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Update corporation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCorporationRequest {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
