//! Organization node as returned by the remote tree API

use serde::{Deserialize, Serialize};

use super::id_serde;

/// Kind of an organization node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Corp,
    Dept,
}

impl NodeType {
    /// Tree key prefix, keeps corp and dept ids from colliding
    pub fn key_prefix(self) -> &'static str {
        match self {
            NodeType::Corp => "org_",
            NodeType::Dept => "dept_",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgApiNode {
    #[serde(with = "id_serde")]
    pub id: String,

    pub name: String,

    pub node_type: NodeType,

    /// Owning corporation; often missing on deep department nodes
    #[serde(default, with = "id_serde::option", skip_serializing_if = "Option::is_none")]
    pub corp_id: Option<String>,

    #[serde(default, with = "id_serde::option", skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<String>,

    /// Slash-delimited ancestor names, e.g. "Acme/Eng/Backend"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_path: Option<String>,

    /// Only present when the tree was requested with employee counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<OrgApiNode>>,
}

impl OrgApiNode {
    pub fn corp(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Corp)
    }

    pub fn dept(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Dept)
    }

    fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            corp_id: None,
            dept_id: None,
            business_path: None,
            employee_count: None,
            children: None,
        }
    }

    pub fn with_corp_id(mut self, corp_id: impl Into<String>) -> Self {
        self.corp_id = Some(corp_id.into());
        self
    }

    pub fn with_business_path(mut self, path: impl Into<String>) -> Self {
        self.business_path = Some(path.into());
        self
    }

    pub fn with_children(mut self, children: Vec<OrgApiNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_corp(&self) -> bool {
        self.node_type == NodeType::Corp
    }

    /// Children, treating an absent list as empty
    pub fn child_nodes(&self) -> &[OrgApiNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Create request for a corporation or a department
///
/// Serialized snake_case for the organization service; the console's
/// camelCase field names are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrgUnitRequest {
    pub name: String,
    /// Required; the form may submit without picking one
    #[serde(default, alias = "nodeType")]
    pub node_type: Option<NodeType>,
    /// Parent corporation (for corps) or parent department (for depts)
    #[serde(default, alias = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Owning corporation, departments only
    #[serde(default, alias = "corpId", skip_serializing_if = "Option::is_none")]
    pub corp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_ids() {
        let json = r#"{"id": 7, "name": "Eng", "node_type": "dept", "corp_id": 1}"#;
        let node: OrgApiNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, "7");
        assert_eq!(node.corp_id.as_deref(), Some("1"));
        assert_eq!(node.node_type, NodeType::Dept);
        assert!(node.children.is_none());
    }

    #[test]
    fn test_deserialize_nested() {
        let json = r#"[{"id": "1", "name": "Acme", "node_type": "corp",
            "children": [{"id": "2", "name": "Eng", "node_type": "dept", "corp_id": null}]}]"#;
        let nodes: Vec<OrgApiNode> = serde_json::from_str(json).unwrap();
        assert!(nodes[0].is_corp());
        assert_eq!(nodes[0].child_nodes().len(), 1);
        assert_eq!(nodes[0].child_nodes()[0].corp_id, None);
    }

    #[test]
    fn test_unknown_node_type_rejected() {
        let json = r#"{"id": "1", "name": "x", "node_type": "team"}"#;
        assert!(serde_json::from_str::<OrgApiNode>(json).is_err());
    }
}
