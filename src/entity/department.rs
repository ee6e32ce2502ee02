//! Department records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id_serde;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(with = "id_serde")]
    pub id: String,

    pub name: String,

    /// Owning corporation
    #[serde(with = "id_serde")]
    pub corp_id: String,

    /// Parent department (None for departments directly under the corporation)
    #[serde(default, with = "id_serde::option", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Slash-delimited ancestor names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Update department request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}
