//! Stateful view models consumed by the console

pub mod dept_selector;
pub mod org_tree;

pub use dept_selector::DepartmentSelector;
pub use org_tree::{FetchStatus, OrgTreeState, OrgTreeStore};
