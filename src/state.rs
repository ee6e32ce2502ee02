use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::client::{HttpTransport, OrgClient, OrgTreeQuery, RpcTransport};
use crate::config::Config;
use crate::error::AppResult;
use crate::view::{DepartmentSelector, OrgTreeStore};

/// An open department selector for one employee
#[derive(Debug, Clone)]
pub struct SelectorSession {
    pub employee_id: String,
    pub selector: DepartmentSelector,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Organization service client
    pub client: OrgClient,
    /// Organization tree shown by the console
    pub tree: OrgTreeStore,
    /// Open selector sessions
    pub selectors: Arc<DashMap<Uuid, SelectorSession>>,
}

impl AppState {
    /// Create state talking to the configured organization service
    pub fn new(config: Config) -> AppResult<Self> {
        let transport = HttpTransport::new(&config.upstream)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn RpcTransport>) -> Self {
        let client = OrgClient::new(transport);
        let tree = OrgTreeStore::new(client.clone(), OrgTreeQuery::from(&config.tree));

        Self {
            config: Arc::new(config),
            client,
            tree,
            selectors: Arc::new(DashMap::new()),
        }
    }

    /// Register a selector session, returning its id
    pub fn insert_selector(&self, session: SelectorSession) -> Uuid {
        let id = Uuid::new_v4();
        self.selectors.insert(id, session);
        id
    }

    pub fn remove_selector(&self, id: &Uuid) -> Option<SelectorSession> {
        self.selectors.remove(id).map(|(_, session)| session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_registry() {
        let state = AppState::new(Config::default()).unwrap();
        let id = state.insert_selector(SelectorSession {
            employee_id: "e1".to_string(),
            selector: DepartmentSelector::new(),
        });
        assert!(state.selectors.contains_key(&id));
        assert_eq!(state.remove_selector(&id).unwrap().employee_id, "e1");
        assert!(state.remove_selector(&id).is_none());
    }
}
