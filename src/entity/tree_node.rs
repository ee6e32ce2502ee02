//! UI tree model derived from the organization API response

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Corporation id to display name, rebuilt on every tree fetch
pub type CorpNameMap = HashMap<String, String>;

/// Tree node consumed by the console's tree and picker widgets
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// `org_<id>` or `dept_<id>`
    pub key: String,
    pub label: String,
    pub title: String,
    pub value: String,
    pub is_org: bool,
    pub corp_id: String,
    pub corp_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dept_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u64>,
    /// Corporations are not selectable in pickers
    pub disabled: bool,
    /// Absent for leaves; never an empty list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn child_nodes(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}
