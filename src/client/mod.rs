//! Organization service client
//!
//! Typed RPC operations over a pluggable [`RpcTransport`]. Every operation
//! validates its input first; a rejected request never reaches the transport.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::entity::{
    Corporation, CreateOrgUnitRequest, Department, EmployeeDepartmentInfo, Employee,
    EmployeeQuery, ListQuery, NodeType, OrgApiNode, Page, RoleRequest, RoleTemplate,
    UpdateCorporationRequest, UpdateDepartmentRequest,
};
use crate::error::{AppResult, OptionExt};

pub mod http;
pub mod validate;

pub use http::HttpTransport;

/// RPC method names
pub mod method {
    pub const GET_ORGANIZATION_TREE: &str = "organization.getTree";

    pub const CREATE_CORPORATION: &str = "corporation.create";
    pub const UPDATE_CORPORATION: &str = "corporation.update";
    pub const DELETE_CORPORATION: &str = "corporation.delete";
    pub const GET_CORPORATION: &str = "corporation.get";
    pub const LIST_CORPORATIONS: &str = "corporation.list";

    pub const CREATE_DEPARTMENT: &str = "department.create";
    pub const UPDATE_DEPARTMENT: &str = "department.update";
    pub const DELETE_DEPARTMENT: &str = "department.delete";
    pub const GET_DEPARTMENT: &str = "department.get";
    pub const LIST_DEPARTMENTS: &str = "department.list";

    pub const CREATE_ROLE: &str = "role.create";
    pub const UPDATE_ROLE: &str = "role.update";
    pub const DELETE_ROLE: &str = "role.delete";
    pub const GET_ROLE: &str = "role.get";
    pub const LIST_ROLES: &str = "role.list";

    pub const LIST_EMPLOYEES: &str = "employee.list";
    pub const GET_EMPLOYEE_DEPARTMENTS: &str = "employee.getDepartments";
    pub const UPDATE_EMPLOYEE_DEPARTMENTS: &str = "employee.updateDepartments";
}

/// Request/response transport to the organization service
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `method` with JSON params, returning the response payload
    async fn call(&self, method: &str, params: Value) -> AppResult<Value>;
}

/// Organization tree fetch parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgTreeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corp_id: Option<String>,
    pub include_departments: bool,
    pub include_employee_count: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl Default for OrgTreeQuery {
    fn default() -> Self {
        Self {
            corp_id: None,
            include_departments: true,
            include_employee_count: false,
            depth: None,
        }
    }
}

impl From<&crate::config::TreeConfig> for OrgTreeQuery {
    fn from(cfg: &crate::config::TreeConfig) -> Self {
        Self {
            corp_id: cfg.corp_id.clone(),
            include_departments: cfg.include_departments,
            include_employee_count: cfg.include_employee_count,
            depth: cfg.depth,
        }
    }
}

/// A freshly created corporation or department
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node_type", content = "unit", rename_all = "lowercase")]
pub enum OrgUnit {
    Corp(Corporation),
    Dept(Department),
}

#[derive(Clone)]
pub struct OrgClient {
    transport: Arc<dyn RpcTransport>,
}

impl OrgClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    async fn invoke<Req, Resp>(&self, method: &str, req: &Req) -> AppResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let params = serde_json::to_value(req)?;
        tracing::debug!("rpc {} params={}", method, params);
        let data = self.transport.call(method, params).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn invoke_by_id<Resp: DeserializeOwned>(
        &self,
        method: &str,
        label: &str,
        id: &str,
    ) -> AppResult<Resp> {
        let id = validate::validate_id(label, id)?;
        self.invoke(method, &json!({ "id": id })).await
    }

    async fn get_by_id<Resp: DeserializeOwned>(
        &self,
        method: &str,
        label: &str,
        id: &str,
    ) -> AppResult<Resp> {
        let found: Option<Resp> = self.invoke_by_id(method, label, id).await?;
        found.ok_or_not_found(format!("{} {}", label, id))
    }

    pub async fn get_organization_tree(&self, query: &OrgTreeQuery) -> AppResult<Vec<OrgApiNode>> {
        let nodes: Option<Vec<OrgApiNode>> =
            self.invoke(method::GET_ORGANIZATION_TREE, query).await?;
        Ok(nodes.unwrap_or_default())
    }

    /// Create whichever kind of unit the request names
    pub async fn create_org_unit(&self, req: &CreateOrgUnitRequest) -> AppResult<OrgUnit> {
        let req = validate::validate_create_org_unit(req)?;
        match req.node_type {
            Some(NodeType::Dept) => Ok(OrgUnit::Dept(
                self.invoke(method::CREATE_DEPARTMENT, &req).await?,
            )),
            _ => Ok(OrgUnit::Corp(
                self.invoke(method::CREATE_CORPORATION, &req).await?,
            )),
        }
    }

    pub async fn update_corporation(
        &self,
        req: &UpdateCorporationRequest,
    ) -> AppResult<Corporation> {
        let req = validate::validate_update_corporation(req)?;
        self.invoke(method::UPDATE_CORPORATION, &req).await
    }

    pub async fn delete_corporation(&self, id: &str) -> AppResult<()> {
        self.invoke_by_id(method::DELETE_CORPORATION, "corporation", id).await
    }

    pub async fn get_corporation(&self, id: &str) -> AppResult<Corporation> {
        self.get_by_id(method::GET_CORPORATION, "corporation", id).await
    }

    pub async fn list_corporations(&self, query: &ListQuery) -> AppResult<Page<Corporation>> {
        let query = validate::clamp_list_query(query);
        self.invoke(method::LIST_CORPORATIONS, &query).await
    }

    pub async fn update_department(&self, req: &UpdateDepartmentRequest) -> AppResult<Department> {
        let req = validate::validate_update_department(req)?;
        self.invoke(method::UPDATE_DEPARTMENT, &req).await
    }

    pub async fn delete_department(&self, id: &str) -> AppResult<()> {
        self.invoke_by_id(method::DELETE_DEPARTMENT, "department", id).await
    }

    pub async fn get_department(&self, id: &str) -> AppResult<Department> {
        self.get_by_id(method::GET_DEPARTMENT, "department", id).await
    }

    pub async fn list_departments(&self, query: &ListQuery) -> AppResult<Page<Department>> {
        let query = validate::clamp_list_query(query);
        self.invoke(method::LIST_DEPARTMENTS, &query).await
    }

    pub async fn create_role(&self, req: &RoleRequest) -> AppResult<RoleTemplate> {
        let req = validate::validate_role(req, false)?;
        self.invoke(method::CREATE_ROLE, &req).await
    }

    pub async fn update_role(&self, req: &RoleRequest) -> AppResult<RoleTemplate> {
        let req = validate::validate_role(req, true)?;
        self.invoke(method::UPDATE_ROLE, &req).await
    }

    pub async fn delete_role(&self, id: &str) -> AppResult<()> {
        self.invoke_by_id(method::DELETE_ROLE, "role", id).await
    }

    pub async fn get_role(&self, id: &str) -> AppResult<RoleTemplate> {
        self.get_by_id(method::GET_ROLE, "role", id).await
    }

    pub async fn list_roles(&self, query: &ListQuery) -> AppResult<Page<RoleTemplate>> {
        let query = validate::clamp_list_query(query);
        self.invoke(method::LIST_ROLES, &query).await
    }

    pub async fn list_employees(&self, query: &EmployeeQuery) -> AppResult<Page<Employee>> {
        let query = validate::clamp_employee_query(query);
        self.invoke(method::LIST_EMPLOYEES, &query).await
    }

    pub async fn get_employee_departments(
        &self,
        employee_id: &str,
    ) -> AppResult<Vec<EmployeeDepartmentInfo>> {
        let depts: Option<Vec<EmployeeDepartmentInfo>> = self
            .invoke_by_id(method::GET_EMPLOYEE_DEPARTMENTS, "employee", employee_id)
            .await?;
        Ok(depts.unwrap_or_default())
    }

    pub async fn update_employee_departments(
        &self,
        employee_id: &str,
        departments: Vec<EmployeeDepartmentInfo>,
    ) -> AppResult<Vec<EmployeeDepartmentInfo>> {
        let employee_id = validate::validate_id("employee", employee_id)?;
        validate::validate_memberships(&departments)?;

        let saved: Option<Vec<EmployeeDepartmentInfo>> = self
            .invoke(
                method::UPDATE_EMPLOYEE_DEPARTMENTS,
                &json!({ "employee_id": employee_id, "departments": departments }),
            )
            .await?;
        // Services that answer with an empty body accepted the list as sent
        Ok(saved.unwrap_or(departments))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for tests

    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<HashMap<String, Value>>,
        failures: Mutex<HashMap<String, (i64, String)>>,
        pub calls: Mutex<Vec<(String, Value)>>,
        pub call_count: AtomicUsize,
    }

    impl FakeTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn respond(&self, method: &str, data: Value) {
            self.failures.lock().unwrap().remove(method);
            self.responses.lock().unwrap().insert(method.to_string(), data);
        }

        pub fn fail(&self, method: &str, code: i64, message: &str) {
            self.failures
                .lock()
                .unwrap()
                .insert(method.to_string(), (code, message.to_string()));
        }

        pub fn count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn calls_to(&self, method: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(m, _)| m == method)
                .count()
        }

        pub fn last_params(&self, method: &str) -> Option<Value> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(m, _)| m == method)
                .map(|(_, p)| p.clone())
        }
    }

    #[async_trait]
    impl RpcTransport for FakeTransport {
        async fn call(&self, method: &str, params: Value) -> AppResult<Value> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params));

            if let Some((code, message)) = self.failures.lock().unwrap().get(method).cloned() {
                return Err(AppError::Upstream { code, message });
            }
            Ok(self
                .responses
                .lock()
                .unwrap()
                .get(method)
                .cloned()
                .unwrap_or(Value::Null))
        }
    }

    pub fn client(transport: &Arc<FakeTransport>) -> OrgClient {
        OrgClient::new(transport.clone())
    }

    /// Transport whose calls stay pending until the test releases them
    #[derive(Default)]
    pub struct GatedTransport {
        pending: Mutex<Vec<(Value, Option<tokio::sync::oneshot::Sender<Value>>)>>,
    }

    impl GatedTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Number of calls made so far
        pub fn count(&self) -> usize {
            self.pending.lock().unwrap().len()
        }

        /// Resolve the `n`th call (zero-based) with `data`
        pub fn release(&self, n: usize, data: Value) {
            let tx = self.pending.lock().unwrap()[n].1.take().unwrap();
            tx.send(data).unwrap();
        }

        /// Params of the `n`th call
        pub fn params(&self, n: usize) -> Value {
            self.pending.lock().unwrap()[n].0.clone()
        }

        /// Yield until `n` calls have arrived
        pub async fn wait_for(&self, n: usize) {
            while self.count() < n {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl RpcTransport for GatedTransport {
        async fn call(&self, _method: &str, params: Value) -> AppResult<Value> {
            let (tx, rx) = tokio::sync::oneshot::channel();
            self.pending.lock().unwrap().push((params, Some(tx)));
            rx.await.map_err(|_| AppError::Upstream {
                code: -1,
                message: "gate dropped".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{client, FakeTransport};
    use super::*;
    use crate::error::AppError;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_get_tree_sends_query() {
        let transport = FakeTransport::new();
        transport.respond(
            method::GET_ORGANIZATION_TREE,
            json!([{"id": 1, "name": "Acme", "node_type": "corp"}]),
        );

        let query = OrgTreeQuery {
            corp_id: Some("1".to_string()),
            include_employee_count: true,
            ..OrgTreeQuery::default()
        };
        let nodes = assert_ok!(client(&transport).get_organization_tree(&query).await);
        assert_eq!(nodes[0].id, "1");

        let params = transport.last_params(method::GET_ORGANIZATION_TREE).unwrap();
        assert_eq!(params["corp_id"], "1");
        assert_eq!(params["include_departments"], true);
        assert_eq!(params["include_employee_count"], true);
        assert!(params.get("depth").is_none());
    }

    #[tokio::test]
    async fn test_null_tree_is_empty() {
        let transport = FakeTransport::new();
        let nodes = assert_ok!(client(&transport)
            .get_organization_tree(&OrgTreeQuery::default())
            .await);
        assert!(nodes.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_create_never_calls_transport() {
        let transport = FakeTransport::new();
        let req = CreateOrgUnitRequest {
            name: "".to_string(),
            node_type: Some(NodeType::Corp),
            parent_id: None,
            corp_id: None,
            description: None,
        };
        let err = assert_err!(client(&transport).create_org_unit(&req).await);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_create_dispatches_by_type() {
        let transport = FakeTransport::new();
        transport.respond(
            method::CREATE_DEPARTMENT,
            json!({"id": 2, "name": "Eng", "corp_id": 1}),
        );
        let req = CreateOrgUnitRequest {
            name: "Eng".to_string(),
            node_type: Some(NodeType::Dept),
            parent_id: None,
            corp_id: Some("1".to_string()),
            description: None,
        };
        let unit = assert_ok!(client(&transport).create_org_unit(&req).await);
        match unit {
            OrgUnit::Dept(dept) => assert_eq!(dept.corp_id, "1"),
            other => panic!("unexpected unit {:?}", other),
        }
        assert!(transport.last_params(method::CREATE_CORPORATION).is_none());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let transport = FakeTransport::new();
        let err = assert_err!(client(&transport).get_corporation("9").await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let transport = FakeTransport::new();
        transport.fail(method::DELETE_ROLE, 409, "role in use");
        let err = assert_err!(client(&transport).delete_role("3").await);
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_update_memberships_checks_invariant() {
        let transport = FakeTransport::new();
        let depts = vec![EmployeeDepartmentInfo::new("a", "A", "Acme")];
        let err = assert_err!(
            client(&transport)
                .update_employee_departments("e1", depts)
                .await
        );
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(transport.count(), 0);

        let depts = vec![EmployeeDepartmentInfo::new("a", "A", "Acme").primary(true)];
        let saved = assert_ok!(
            client(&transport)
                .update_employee_departments("e1", depts.clone())
                .await
        );
        assert_eq!(saved, depts);
        let params = transport
            .last_params(method::UPDATE_EMPLOYEE_DEPARTMENTS)
            .unwrap();
        assert_eq!(params["employee_id"], "e1");
        assert_eq!(params["departments"][0]["is_primary"], true);
    }
}
