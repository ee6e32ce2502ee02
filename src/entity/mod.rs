//! Entity module - organization data model
//!
//! Wire types exchanged with the organization service and the UI tree model

pub mod corporation;
pub mod department;
pub mod employee;
pub mod org_node;
pub mod role;
pub mod tree_node;

pub use corporation::{Corporation, UpdateCorporationRequest};
pub use department::{Department, UpdateDepartmentRequest};
pub use employee::{Employee, EmployeeDepartmentInfo, EmployeeQuery};
pub use org_node::{CreateOrgUnitRequest, NodeType, OrgApiNode};
pub use role::{RoleRequest, RoleTemplate};
pub use tree_node::{CorpNameMap, TreeNode};

use serde::{Deserialize, Serialize};

/// One page of a list query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Keyword and paging filter shared by list endpoints
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size", alias = "pageSize")]
    pub page_size: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

pub(crate) fn default_page() -> u64 {
    1
}

pub(crate) fn default_page_size() -> u64 {
    20
}

/// Ids arrive as JSON strings or numbers depending on the endpoint
pub(crate) mod id_serde {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
        Uint(u64),
    }

    impl From<RawId> for String {
        fn from(raw: RawId) -> Self {
            match raw {
                RawId::Str(s) => s,
                RawId::Int(n) => n.to_string(),
                RawId::Uint(n) => n.to_string(),
            }
        }
    }

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer)
            .map(String::from)
            .map_err(|_| de::Error::custom("id must be a string or an integer"))
    }

    pub mod option {
        use super::RawId;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            id: &Option<String>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match id {
                Some(id) => serializer.serialize_some(id),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<String>, D::Error> {
            let raw = Option::<RawId>::deserialize(deserializer)?;
            Ok(raw.map(String::from).filter(|s| !s.is_empty()))
        }
    }
}
