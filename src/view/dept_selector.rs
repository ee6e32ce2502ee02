//! Department selector session
//!
//! Backs the modal used to edit an employee's department memberships. The
//! externally supplied value is the only source of truth between sessions:
//! the working selection is seeded from it on open and thrown away on close
//! unless the user confirms.

use serde::Serialize;

use crate::entity::{EmployeeDepartmentInfo, TreeNode};
use crate::org::{
    ensure_primary_department, filter_tree, find_node, handle_dept_removal,
    handle_node_selection, handle_primary_dept_setting, DeptRemoval, FilteredTree, NodeSelection,
    SelectionUpdate,
};
use crate::view::org_tree::{OrgTreeState, OrgTreeStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSelector {
    visible: bool,
    selected_keys: Vec<String>,
    selected_depts: Vec<EmployeeDepartmentInfo>,
    search: String,
}

impl DepartmentSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected_keys(&self) -> &[String] {
        &self.selected_keys
    }

    pub fn selected_depts(&self) -> &[EmployeeDepartmentInfo] {
        &self.selected_depts
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Show the modal seeded with `value`. The tree is fetched only if the
    /// store has nothing cached yet.
    pub async fn open(
        &mut self,
        value: Vec<EmployeeDepartmentInfo>,
        store: &OrgTreeStore,
    ) -> OrgTreeState {
        let tree_state = store.ensure_loaded().await;
        self.show(value);
        tree_state
    }

    /// Show the modal seeded with `value` when the caller already holds the
    /// tree
    pub fn show(&mut self, value: Vec<EmployeeDepartmentInfo>) {
        let depts = ensure_primary_department(value);
        self.selected_keys = depts.iter().map(EmployeeDepartmentInfo::tree_key).collect();
        self.selected_depts = depts;
        self.search.clear();
        self.visible = true;
    }

    fn apply(&mut self, update: SelectionUpdate) {
        self.selected_keys = update.keys;
        self.selected_depts = update.depts;
    }

    /// Check or uncheck a tree node. Unknown keys are ignored.
    pub fn check(&mut self, key: &str, checked: bool, tree: &[TreeNode]) {
        let Some(node) = find_node(tree, key) else {
            tracing::debug!("selector ignored unknown node {}", key);
            return;
        };
        let update = handle_node_selection(NodeSelection {
            key,
            checked,
            node,
            selected_keys: std::mem::take(&mut self.selected_keys),
            selected_depts: std::mem::take(&mut self.selected_depts),
        });
        self.apply(update);
    }

    pub fn remove(&mut self, dept_id: &str) {
        let update = handle_dept_removal(DeptRemoval {
            dept_id,
            selected_keys: std::mem::take(&mut self.selected_keys),
            selected_depts: std::mem::take(&mut self.selected_depts),
        });
        self.apply(update);
    }

    pub fn set_primary(&mut self, dept_id: &str) {
        self.selected_depts =
            handle_primary_dept_setting(dept_id, std::mem::take(&mut self.selected_depts));
    }

    /// Filter the tree by `keyword`, remembering it for the session
    pub fn search(&mut self, keyword: &str, tree: &[TreeNode]) -> FilteredTree {
        self.search = keyword.trim().to_string();
        filter_tree(tree, &self.search)
    }

    pub fn clear(&mut self) {
        self.selected_keys.clear();
        self.selected_depts.clear();
    }

    /// Hand the selection to `on_change` and close. Returns `None` when the
    /// modal was not open.
    pub fn confirm<F, R>(&mut self, on_change: F) -> Option<R>
    where
        F: FnOnce(Vec<EmployeeDepartmentInfo>) -> R,
    {
        if !self.visible {
            return None;
        }
        let depts = std::mem::take(&mut self.selected_depts);
        self.reset();
        Some(on_change(depts))
    }

    /// Close without saving
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client, FakeTransport};
    use crate::client::{method, OrgTreeQuery};
    use serde_json::json;

    fn store(transport: &std::sync::Arc<FakeTransport>) -> OrgTreeStore {
        transport.respond(
            method::GET_ORGANIZATION_TREE,
            json!([{"id": "1", "name": "Acme", "node_type": "corp", "children": [
                {"id": "A", "name": "Eng", "node_type": "dept"},
                {"id": "B", "name": "Sales", "node_type": "dept"}
            ]}]),
        );
        OrgTreeStore::new(client(transport), OrgTreeQuery::default())
    }

    fn member(id: &str, primary: bool) -> EmployeeDepartmentInfo {
        EmployeeDepartmentInfo::new(id, id, "Acme").primary(primary)
    }

    #[tokio::test]
    async fn test_open_seeds_and_normalizes() {
        let transport = FakeTransport::new();
        let store = store(&transport);
        let mut selector = DepartmentSelector::new();

        selector
            .open(vec![member("A", false), member("B", false)], &store)
            .await;
        assert!(selector.is_visible());
        assert_eq!(selector.selected_keys(), ["dept_A", "dept_B"]);
        assert!(selector.selected_depts()[0].is_primary);
        assert!(!selector.selected_depts()[1].is_primary);
    }

    #[tokio::test]
    async fn test_open_fetches_tree_once() {
        let transport = FakeTransport::new();
        let store = store(&transport);

        DepartmentSelector::new().open(vec![], &store).await;
        DepartmentSelector::new().open(vec![], &store).await;
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_select_and_confirm() {
        let transport = FakeTransport::new();
        let store = store(&transport);
        let mut selector = DepartmentSelector::new();
        let tree = selector.open(vec![], &store).await.tree;

        selector.check("dept_A", true, &tree);
        selector.check("dept_B", true, &tree);
        selector.check("org_1", true, &tree);
        selector.check("dept_missing", true, &tree);
        selector.set_primary("B");
        assert_eq!(selector.selected_keys(), ["dept_A", "dept_B"]);

        let mut confirmed = Vec::new();
        let out = selector.confirm(|depts| {
            confirmed = depts;
            "saved"
        });
        assert_eq!(out, Some("saved"));
        assert_eq!(confirmed.len(), 2);
        assert_eq!(confirmed[0].corp_name, "Acme");
        assert!(!confirmed[0].is_primary);
        assert!(confirmed[1].is_primary);
        assert!(!selector.is_visible());
        assert!(selector.selected_depts().is_empty());
    }

    #[tokio::test]
    async fn test_remove_primary_promotes() {
        let transport = FakeTransport::new();
        let store = store(&transport);
        let mut selector = DepartmentSelector::new();
        selector
            .open(vec![member("A", true), member("B", false)], &store)
            .await;

        selector.remove("A");
        assert_eq!(selector.selected_keys(), ["dept_B"]);
        assert!(selector.selected_depts()[0].is_primary);

        selector.remove("A");
        assert_eq!(selector.selected_depts().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_discards() {
        let transport = FakeTransport::new();
        let store = store(&transport);
        let mut selector = DepartmentSelector::new();
        let tree = selector.open(vec![member("A", true)], &store).await.tree;

        selector.check("dept_B", true, &tree);
        selector.cancel();
        assert!(!selector.is_visible());
        assert_eq!(selector.confirm(|d| d.len()), None);

        // Reopening starts from the external value again
        selector.open(vec![member("A", true)], &store).await;
        assert_eq!(selector.selected_keys(), ["dept_A"]);
    }

    #[tokio::test]
    async fn test_explicit_dept_id_round_trips() {
        let transport = FakeTransport::new();
        transport.respond(
            method::GET_ORGANIZATION_TREE,
            json!([{"id": "1", "name": "Acme", "node_type": "corp", "children": [
                {"id": "20", "dept_id": "D-20", "name": "Ops", "node_type": "dept"}
            ]}]),
        );
        let store = OrgTreeStore::new(client(&transport), OrgTreeQuery::default());
        let mut selector = DepartmentSelector::new();

        // Seeded membership lines up with the tree node
        let tree = selector.open(vec![member("D-20", true)], &store).await.tree;
        let key = &selector.selected_keys()[0];
        assert_eq!(find_node(&tree, key).unwrap().dept_id.as_deref(), Some("D-20"));

        selector.remove("D-20");
        assert!(selector.selected_keys().is_empty());

        selector.check(&tree[0].child_nodes()[0].key, true, &tree);
        assert_eq!(selector.selected_depts()[0].department_id, "D-20");
        selector.remove("D-20");
        assert!(selector.selected_keys().is_empty());
        assert!(selector.selected_depts().is_empty());
    }

    #[tokio::test]
    async fn test_search_and_clear() {
        let transport = FakeTransport::new();
        let store = store(&transport);
        let mut selector = DepartmentSelector::new();
        let tree = selector.open(vec![member("A", true)], &store).await.tree;

        let filtered = selector.search(" sal ", &tree);
        assert_eq!(selector.search_text(), "sal");
        assert_eq!(filtered.expanded_keys, vec!["org_1"]);

        selector.clear();
        assert!(selector.selected_keys().is_empty());
        assert!(selector.selected_depts().is_empty());
        assert!(selector.is_visible());
    }
}
