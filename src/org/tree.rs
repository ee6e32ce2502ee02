//! Organization tree conversion
//!
//! Turns the nested node list of the organization API into the UI tree model.
//! Department nodes deep in the hierarchy often come without corporation
//! context, so the corporation of every department is resolved from the
//! nearest ancestor context, the pre-built [`CorpNameMap`], or the node's
//! business path.

use crate::entity::{CorpNameMap, OrgApiNode, TreeNode};

/// Ancestor context threaded through the recursion
#[derive(Debug, Clone, Copy)]
pub struct ConvertContext<'a> {
    pub corp_name_map: &'a CorpNameMap,
    pub parent_corp_id: Option<&'a str>,
    pub parent_corp_name: Option<&'a str>,
}

impl<'a> ConvertContext<'a> {
    /// Root context: no ancestor corporation yet
    pub fn root(corp_name_map: &'a CorpNameMap) -> Self {
        Self {
            corp_name_map,
            parent_corp_id: None,
            parent_corp_name: None,
        }
    }

    fn descend<'b>(&self, corp_id: &'b str, corp_name: &'b str) -> ConvertContext<'b>
    where
        'a: 'b,
    {
        ConvertContext {
            corp_name_map: self.corp_name_map,
            parent_corp_id: Some(corp_id),
            parent_corp_name: Some(corp_name),
        }
    }
}

/// Collect the name of every corporation node, at any depth
pub fn build_corp_name_map(nodes: &[OrgApiNode]) -> CorpNameMap {
    let mut map = CorpNameMap::new();
    collect_corp_names(nodes, &mut map);
    map
}

fn collect_corp_names(nodes: &[OrgApiNode], map: &mut CorpNameMap) {
    for node in nodes {
        if node.is_corp() {
            map.insert(node.id.clone(), node.name.clone());
        }
        collect_corp_names(node.child_nodes(), map);
    }
}

/// Convert API nodes into tree nodes
pub fn convert_to_tree_data(nodes: &[OrgApiNode], ctx: ConvertContext<'_>) -> Vec<TreeNode> {
    nodes.iter().map(|node| convert_node(node, ctx)).collect()
}

fn convert_node(node: &OrgApiNode, ctx: ConvertContext<'_>) -> TreeNode {
    let is_org = node.is_corp();
    // Department keys use the department id so memberships map back to them
    let dept_id = (!is_org).then(|| node.dept_id.clone().unwrap_or_else(|| node.id.clone()));
    let key = format!(
        "{}{}",
        node.node_type.key_prefix(),
        dept_id.as_deref().unwrap_or(&node.id)
    );

    let (corp_id, corp_name) = if is_org {
        (node.id.clone(), node.name.clone())
    } else {
        let corp_id = resolve_corp_id(node, &ctx);
        let corp_name = resolve_corp_name(node, &corp_id, &ctx);
        (corp_id, corp_name)
    };

    let children = match node.child_nodes() {
        [] => None,
        kids => Some(convert_to_tree_data(kids, ctx.descend(&corp_id, &corp_name))),
    };

    let dept_name = (!is_org).then(|| node.name.clone());

    TreeNode {
        value: key.clone(),
        key,
        label: node.name.clone(),
        title: node.name.clone(),
        is_org,
        corp_id,
        corp_name,
        dept_id,
        dept_name,
        employee_count: node.employee_count,
        disabled: is_org,
        children,
    }
}

fn resolve_corp_id(node: &OrgApiNode, ctx: &ConvertContext<'_>) -> String {
    node.corp_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .or(ctx.parent_corp_id)
        .unwrap_or_default()
        .to_string()
}

fn resolve_corp_name(node: &OrgApiNode, corp_id: &str, ctx: &ConvertContext<'_>) -> String {
    let from_map = if corp_id.is_empty() {
        None
    } else {
        ctx.corp_name_map.get(corp_id).map(String::as_str)
    };

    from_map
        .filter(|name| !name.is_empty())
        .or(ctx.parent_corp_name.filter(|name| !name.is_empty()))
        .map(str::to_string)
        .or_else(|| node.business_path.as_deref().and_then(first_path_segment))
        .unwrap_or_default()
}

/// First non-empty segment of a business path
fn first_path_segment(path: &str) -> Option<String> {
    path.split('/')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Build the corp name map and convert in one pass
pub fn build_tree(nodes: &[OrgApiNode]) -> (Vec<TreeNode>, CorpNameMap) {
    let corp_names = build_corp_name_map(nodes);
    let tree = convert_to_tree_data(nodes, ConvertContext::root(&corp_names));
    (tree, corp_names)
}

/// Every key in pre-order; used to expand the whole tree on load
pub fn get_all_keys(nodes: &[TreeNode]) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(nodes, &mut keys);
    keys
}

fn collect_keys(nodes: &[TreeNode], keys: &mut Vec<String>) {
    for node in nodes {
        keys.push(node.key.clone());
        collect_keys(node.child_nodes(), keys);
    }
}

/// Depth-first lookup by key
pub fn find_node<'a>(nodes: &'a [TreeNode], key: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = find_node(node.child_nodes(), key) {
            return Some(found);
        }
    }
    None
}

/// Result of filtering the tree by a search keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredTree {
    pub nodes: Vec<TreeNode>,
    /// Ancestors of every match, so matches are visible
    pub expanded_keys: Vec<String>,
}

/// Keep nodes whose label contains `keyword` (case-insensitive) and their
/// ancestors. A matching node keeps its whole subtree. A blank keyword keeps
/// everything.
pub fn filter_tree(nodes: &[TreeNode], keyword: &str) -> FilteredTree {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return FilteredTree {
            nodes: nodes.to_vec(),
            expanded_keys: get_all_keys(nodes),
        };
    }

    let mut expanded_keys = Vec::new();
    let nodes = filter_nodes(nodes, &needle, &mut expanded_keys);
    FilteredTree {
        nodes,
        expanded_keys,
    }
}

fn filter_nodes(nodes: &[TreeNode], needle: &str, expanded: &mut Vec<String>) -> Vec<TreeNode> {
    let mut kept = Vec::new();
    for node in nodes {
        if node.label.to_lowercase().contains(needle) {
            kept.push(node.clone());
            continue;
        }

        let children = filter_nodes(node.child_nodes(), needle, expanded);
        if !children.is_empty() {
            expanded.push(node.key.clone());
            kept.push(TreeNode {
                children: Some(children),
                ..node.clone()
            });
        }
    }
    kept
}
