//! Request validation
//!
//! Runs before any request is sent, so bad form input never costs a round-trip.

use std::collections::HashSet;

use crate::entity::{
    CreateOrgUnitRequest, EmployeeDepartmentInfo, EmployeeQuery, ListQuery, NodeType,
    RoleRequest, UpdateCorporationRequest, UpdateDepartmentRequest,
};
use crate::error::{AppError, AppResult};
use crate::org::validate_primary_invariant;
use crate::permission::{normalize_permissions, unknown_permissions};

/// Longest accepted name, in characters
pub const MAX_NAME_LEN: usize = 32;

pub const MAX_PAGE_SIZE: u64 = 100;

/// Trimmed name, non-empty and within [`MAX_NAME_LEN`]
pub fn validate_name(label: &str, name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{} name is required", label)));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{} name must not exceed {} characters",
            label, MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

pub fn validate_id(label: &str, id: &str) -> AppResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::validation(format!("{} id is required", label)));
    }
    Ok(id.to_string())
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_create_org_unit(req: &CreateOrgUnitRequest) -> AppResult<CreateOrgUnitRequest> {
    let node_type = req
        .node_type
        .ok_or_else(|| AppError::validation("organization type is required"))?;

    let label = match node_type {
        NodeType::Corp => "corporation",
        NodeType::Dept => "department",
    };
    let name = validate_name(label, &req.name)?;
    let parent_id = non_blank(req.parent_id.as_ref());
    let corp_id = non_blank(req.corp_id.as_ref());

    if node_type == NodeType::Dept && corp_id.is_none() && parent_id.is_none() {
        return Err(AppError::validation(
            "department needs a corporation or a parent department",
        ));
    }

    Ok(CreateOrgUnitRequest {
        name,
        node_type: Some(node_type),
        parent_id,
        corp_id: if node_type == NodeType::Dept { corp_id } else { None },
        description: non_blank(req.description.as_ref()),
    })
}

pub fn validate_update_corporation(
    req: &UpdateCorporationRequest,
) -> AppResult<UpdateCorporationRequest> {
    Ok(UpdateCorporationRequest {
        id: validate_id("corporation", &req.id)?,
        name: validate_name("corporation", &req.name)?,
        description: non_blank(req.description.as_ref()),
    })
}

pub fn validate_update_department(
    req: &UpdateDepartmentRequest,
) -> AppResult<UpdateDepartmentRequest> {
    let id = validate_id("department", &req.id)?;
    let parent_id = non_blank(req.parent_id.as_ref());
    if parent_id.as_deref() == Some(id.as_str()) {
        return Err(AppError::validation("department cannot be its own parent"));
    }
    Ok(UpdateDepartmentRequest {
        name: validate_name("department", &req.name)?,
        corp_id: non_blank(req.corp_id.as_ref()),
        parent_id,
        id,
    })
}

/// Normalize a role request. `require_id` is set for updates.
pub fn validate_role(req: &RoleRequest, require_id: bool) -> AppResult<RoleRequest> {
    let id = match (require_id, non_blank(req.id.as_ref())) {
        (true, None) => return Err(AppError::validation("role id is required")),
        (_, id) => id,
    };
    let name = validate_name("role", &req.name)?;
    let permissions = normalize_permissions(req.permissions.iter().map(String::as_str));

    let unknown = unknown_permissions(&permissions);
    if !unknown.is_empty() {
        return Err(AppError::validation(format!(
            "unknown permissions: {}",
            unknown.join(",")
        )));
    }

    Ok(RoleRequest {
        id,
        name,
        description: non_blank(req.description.as_ref()),
        permissions,
    })
}

/// Memberships about to be persisted
pub fn validate_memberships(depts: &[EmployeeDepartmentInfo]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for dept in depts {
        if dept.department_id.trim().is_empty() {
            return Err(AppError::validation("department id is required"));
        }
        if !seen.insert(dept.department_id.as_str()) {
            return Err(AppError::validation(format!(
                "department {} selected twice",
                dept.department_id
            )));
        }
    }
    validate_primary_invariant(depts)
}

pub fn clamp_list_query(query: &ListQuery) -> ListQuery {
    ListQuery {
        keyword: non_blank(query.keyword.as_ref()),
        page: query.page.max(1),
        page_size: query.page_size.clamp(1, MAX_PAGE_SIZE),
    }
}

pub fn clamp_employee_query(query: &EmployeeQuery) -> EmployeeQuery {
    EmployeeQuery {
        department_id: non_blank(query.department_id.as_ref()),
        keyword: non_blank(query.keyword.as_ref()),
        page: query.page.max(1),
        page_size: query.page_size.clamp(1, MAX_PAGE_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, node_type: Option<NodeType>) -> CreateOrgUnitRequest {
        CreateOrgUnitRequest {
            name: name.to_string(),
            node_type,
            parent_id: None,
            corp_id: None,
            description: None,
        }
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_name("corporation", "  Acme ").unwrap(), "Acme");
        assert!(validate_name("corporation", "   ").is_err());
        assert!(validate_name("corporation", &"x".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_name("corporation", &"x".repeat(MAX_NAME_LEN + 1)).is_err());
        // Characters, not bytes
        assert!(validate_name("department", &"研".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_create_requires_type() {
        let err = validate_create_org_unit(&create("Acme", None)).unwrap_err();
        assert!(err.to_string().contains("type is required"));
    }

    #[test]
    fn test_create_department_needs_anchor() {
        assert!(validate_create_org_unit(&create("Eng", Some(NodeType::Dept))).is_err());

        let mut req = create("Eng", Some(NodeType::Dept));
        req.corp_id = Some("1".to_string());
        let ok = validate_create_org_unit(&req).unwrap();
        assert_eq!(ok.corp_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_create_corp_drops_corp_id() {
        let mut req = create(" Acme ", Some(NodeType::Corp));
        req.corp_id = Some("7".to_string());
        req.description = Some("  ".to_string());
        let ok = validate_create_org_unit(&req).unwrap();
        assert_eq!(ok.name, "Acme");
        assert_eq!(ok.corp_id, None);
        assert_eq!(ok.description, None);
    }

    #[test]
    fn test_department_not_own_parent() {
        let req = UpdateDepartmentRequest {
            id: "4".to_string(),
            name: "Eng".to_string(),
            corp_id: None,
            parent_id: Some("4".to_string()),
        };
        assert!(validate_update_department(&req).is_err());
    }

    #[test]
    fn test_role_permissions_checked() {
        let req = RoleRequest {
            id: None,
            name: "Manager".to_string(),
            description: None,
            permissions: vec!["org".to_string(), "org".to_string(), "root".to_string()],
        };
        assert!(validate_role(&req, false).is_err());

        let req = RoleRequest {
            permissions: vec![" org".to_string(), "org".to_string(), "role".to_string()],
            ..req
        };
        assert_eq!(validate_role(&req, false).unwrap().permissions, vec!["org", "role"]);
        assert!(validate_role(&req, true).is_err());
    }

    #[test]
    fn test_memberships() {
        let a = EmployeeDepartmentInfo::new("a", "A", "Acme").primary(true);
        let b = EmployeeDepartmentInfo::new("b", "B", "Acme");
        assert!(validate_memberships(&[a.clone(), b.clone()]).is_ok());
        assert!(validate_memberships(&[a.clone(), a.clone()]).is_err());
        assert!(validate_memberships(&[b]).is_err());
        assert!(validate_memberships(&[]).is_ok());
    }

    #[test]
    fn test_clamp_list_query() {
        let query = ListQuery {
            keyword: Some(" ".to_string()),
            page: 0,
            page_size: 1000,
        };
        let clamped = clamp_list_query(&query);
        assert_eq!(clamped.keyword, None);
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.page_size, MAX_PAGE_SIZE);
    }
}
