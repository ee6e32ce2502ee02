//! Permission template catalogue
//!
//! Role templates grant a subset of these keys.

use serde::{Deserialize, Serialize};

/// Permission constants
pub mod perm {
    pub const ORG: &str = "org";
    pub const EMPLOYEE: &str = "employee";
    pub const ROLE: &str = "role";
    pub const AUDIT: &str = "audit";
    pub const SETTINGS: &str = "settings";

    /// All permissions
    pub const ALL: [&str; 5] = [ORG, EMPLOYEE, ROLE, AUDIT, SETTINGS];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Catalogue shown by the role editor
pub fn catalogue() -> Vec<PermissionInfo> {
    vec![
        PermissionInfo {
            key: perm::ORG,
            name: "Organization",
            description: "Create, edit and delete corporations and departments",
        },
        PermissionInfo {
            key: perm::EMPLOYEE,
            name: "Directory",
            description: "Manage employees and their department memberships",
        },
        PermissionInfo {
            key: perm::ROLE,
            name: "Roles",
            description: "Manage role templates and their permissions",
        },
        PermissionInfo {
            key: perm::AUDIT,
            name: "Audit",
            description: "View operation logs",
        },
        PermissionInfo {
            key: perm::SETTINGS,
            name: "Settings",
            description: "Change system settings",
        },
    ]
}

pub fn is_known(key: &str) -> bool {
    perm::ALL.contains(&key)
}

/// Permissions as submitted by a form: comma-separated or a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PermissionInput {
    Csv(String),
    List(Vec<String>),
}

impl Default for PermissionInput {
    fn default() -> Self {
        PermissionInput::List(Vec::new())
    }
}

impl PermissionInput {
    pub fn normalize(&self) -> Vec<String> {
        match self {
            PermissionInput::Csv(csv) => normalize_permissions(csv.split(',')),
            PermissionInput::List(list) => normalize_permissions(list.iter().map(String::as_str)),
        }
    }
}

/// Trim, drop empties, dedupe keeping first occurrence
pub fn normalize_permissions<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in raw.into_iter().map(str::trim).filter(|k| !k.is_empty()) {
        if !out.iter().any(|k| k == key) {
            out.push(key.to_string());
        }
    }
    out
}

/// Keys not in the catalogue
pub fn unknown_permissions(keys: &[String]) -> Vec<&str> {
    keys.iter()
        .map(String::as_str)
        .filter(|k| !is_known(k))
        .collect()
}
