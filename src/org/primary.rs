//! Primary department bookkeeping
//!
//! An employee may belong to several departments; when the list is non-empty
//! exactly one of them is flagged primary. Every mutation here returns a list
//! that satisfies that rule.

use crate::entity::{EmployeeDepartmentInfo, TreeNode};
use crate::error::{AppError, AppResult};

/// Normalize the primary flag: none flagged promotes the first entry, several
/// flagged keeps only the first.
pub fn ensure_primary_department(
    mut depts: Vec<EmployeeDepartmentInfo>,
) -> Vec<EmployeeDepartmentInfo> {
    match depts.iter().position(|d| d.is_primary) {
        None => {
            if let Some(first) = depts.first_mut() {
                first.is_primary = true;
            }
        }
        Some(idx) => {
            for dept in depts.iter_mut().skip(idx + 1) {
                dept.is_primary = false;
            }
        }
    }
    depts
}

/// Error unless the list satisfies the primary rule
pub fn validate_primary_invariant(depts: &[EmployeeDepartmentInfo]) -> AppResult<()> {
    let primaries = depts.iter().filter(|d| d.is_primary).count();
    match (depts.is_empty(), primaries) {
        (true, _) | (false, 1) => Ok(()),
        (false, 0) => Err(AppError::validation("a primary department is required")),
        (false, n) => Err(AppError::validation(format!(
            "only one primary department allowed, got {}",
            n
        ))),
    }
}

/// Selection state shared by the selector mutations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub keys: Vec<String>,
    pub depts: Vec<EmployeeDepartmentInfo>,
}

/// A check or uncheck on a tree node
#[derive(Debug, Clone)]
pub struct NodeSelection<'a> {
    pub key: &'a str,
    pub checked: bool,
    pub node: &'a TreeNode,
    pub selected_keys: Vec<String>,
    pub selected_depts: Vec<EmployeeDepartmentInfo>,
}

fn membership_from_node(node: &TreeNode) -> EmployeeDepartmentInfo {
    let dept_id = node
        .dept_id
        .clone()
        .unwrap_or_else(|| node.key.trim_start_matches("dept_").to_string());
    let dept_name = node.dept_name.clone().unwrap_or_else(|| node.label.clone());
    EmployeeDepartmentInfo::new(dept_id, dept_name, node.corp_name.clone())
}

pub fn handle_node_selection(selection: NodeSelection<'_>) -> SelectionUpdate {
    let NodeSelection {
        key,
        checked,
        node,
        mut selected_keys,
        mut selected_depts,
    } = selection;

    if checked {
        // Corporations are not selectable
        if node.is_org || node.disabled {
            return SelectionUpdate {
                keys: selected_keys,
                depts: selected_depts,
            };
        }

        let dept = membership_from_node(node);
        if !selected_keys.iter().any(|k| k == key) {
            selected_keys.push(key.to_string());
        }
        if !selected_depts
            .iter()
            .any(|d| d.department_id == dept.department_id)
        {
            let is_first = selected_depts.is_empty();
            selected_depts.push(dept.primary(is_first));
        }

        SelectionUpdate {
            keys: selected_keys,
            depts: selected_depts,
        }
    } else {
        let dept_id = membership_from_node(node).department_id;
        selected_keys.retain(|k| k != key);
        selected_depts.retain(|d| d.department_id != dept_id);

        SelectionUpdate {
            keys: selected_keys,
            depts: ensure_primary_department(selected_depts),
        }
    }
}

/// Removal of a department chip from the selected list
#[derive(Debug, Clone)]
pub struct DeptRemoval<'a> {
    pub dept_id: &'a str,
    pub selected_keys: Vec<String>,
    pub selected_depts: Vec<EmployeeDepartmentInfo>,
}

pub fn handle_dept_removal(removal: DeptRemoval<'_>) -> SelectionUpdate {
    let DeptRemoval {
        dept_id,
        mut selected_keys,
        mut selected_depts,
    } = removal;

    let key = format!("dept_{}", dept_id);
    selected_keys.retain(|k| *k != key);
    selected_depts.retain(|d| d.department_id != dept_id);

    SelectionUpdate {
        keys: selected_keys,
        depts: ensure_primary_department(selected_depts),
    }
}

/// Flag `dept_id` as primary and clear the others. Unknown ids leave the
/// list untouched.
pub fn handle_primary_dept_setting(
    dept_id: &str,
    mut depts: Vec<EmployeeDepartmentInfo>,
) -> Vec<EmployeeDepartmentInfo> {
    if !depts.iter().any(|d| d.department_id == dept_id) {
        return depts;
    }
    for dept in depts.iter_mut() {
        dept.is_primary = dept.department_id == dept_id;
    }
    depts
}
