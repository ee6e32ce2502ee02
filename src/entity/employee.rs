//! Employee directory records and department memberships

use serde::{Deserialize, Serialize};

use super::id_serde;

/// One department membership of an employee
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDepartmentInfo {
    #[serde(with = "id_serde")]
    pub department_id: String,
    pub department_name: String,
    #[serde(default)]
    pub corp_name: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl EmployeeDepartmentInfo {
    pub fn new(
        department_id: impl Into<String>,
        department_name: impl Into<String>,
        corp_name: impl Into<String>,
    ) -> Self {
        Self {
            department_id: department_id.into(),
            department_name: department_name.into(),
            corp_name: corp_name.into(),
            is_primary: false,
        }
    }

    pub fn primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// Tree key of the department this membership points at
    pub fn tree_key(&self) -> String {
        format!("dept_{}", self.department_id)
    }
}

/// Employee directory entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(with = "id_serde")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub departments: Vec<EmployeeDepartmentInfo>,
}

impl Employee {
    pub fn primary_department(&self) -> Option<&EmployeeDepartmentInfo> {
        self.departments.iter().find(|d| d.is_primary)
    }
}

/// Directory list filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeQuery {
    #[serde(default, alias = "departmentId", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default = "super::default_page")]
    pub page: u64,
    #[serde(default = "super::default_page_size", alias = "pageSize")]
    pub page_size: u64,
}
