//! Organization tree state
//!
//! Holds the converted tree together with its loading and error state and
//! re-fetches whenever the fetch parameters change. Superseded fetches are
//! not cancelled; whichever response resolves last is the one kept.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::{OrgClient, OrgTreeQuery};
use crate::entity::{CorpNameMap, TreeNode};
use crate::error::AppError;
use crate::org::{build_tree, get_all_keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct OrgTreeState {
    pub status: FetchStatus,
    pub loading: bool,
    /// Last fetch failure; cleared when a new fetch starts
    pub error: Option<Arc<AppError>>,
    pub tree: Vec<TreeNode>,
    pub corp_names: CorpNameMap,
    /// Every key, so the whole tree starts expanded
    pub expanded_keys: Vec<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub params: OrgTreeQuery,
}

impl OrgTreeState {
    fn new(params: OrgTreeQuery) -> Self {
        Self {
            status: FetchStatus::Idle,
            loading: false,
            error: None,
            tree: Vec::new(),
            corp_names: CorpNameMap::new(),
            expanded_keys: Vec::new(),
            fetched_at: None,
            params,
        }
    }

    pub fn has_data(&self) -> bool {
        self.fetched_at.is_some()
    }
}

#[derive(Clone)]
pub struct OrgTreeStore {
    client: OrgClient,
    state: Arc<RwLock<OrgTreeState>>,
    issued: Arc<AtomicU64>,
}

impl OrgTreeStore {
    pub fn new(client: OrgClient, params: OrgTreeQuery) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(OrgTreeState::new(params))),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current state for presentation
    pub async fn snapshot(&self) -> OrgTreeState {
        self.state.read().await.clone()
    }

    pub async fn tree(&self) -> Vec<TreeNode> {
        self.state.read().await.tree.clone()
    }

    pub async fn has_data(&self) -> bool {
        self.state.read().await.has_data()
    }

    /// Change the fetch parameters; fetches only when they differ
    pub async fn set_params(&self, params: OrgTreeQuery) -> OrgTreeState {
        // Params are written and read under one lock
        let (seq, params) = {
            let mut state = self.state.write().await;
            if state.params == params && state.status != FetchStatus::Idle {
                return state.clone();
            }
            state.params = params;
            self.begin(&mut state)
        };
        self.fetch(seq, params).await
    }

    /// Fetch once if nothing has been loaded yet
    pub async fn ensure_loaded(&self) -> OrgTreeState {
        if self.has_data().await {
            return self.snapshot().await;
        }
        self.refetch().await
    }

    /// Fetch with the current parameters
    pub async fn refetch(&self) -> OrgTreeState {
        let (seq, params) = {
            let mut state = self.state.write().await;
            self.begin(&mut state)
        };
        self.fetch(seq, params).await
    }

    fn begin(&self, state: &mut OrgTreeState) -> (u64, OrgTreeQuery) {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        state.status = FetchStatus::Loading;
        state.loading = true;
        state.error = None;
        (seq, state.params.clone())
    }

    async fn fetch(&self, seq: u64, params: OrgTreeQuery) -> OrgTreeState {
        tracing::debug!("fetching organization tree #{} {:?}", seq, params);
        let result = self.client.get_organization_tree(&params).await;

        let mut state = self.state.write().await;
        let latest = self.issued.load(Ordering::SeqCst);
        if seq < latest {
            tracing::debug!(
                "applying organization tree #{} while #{} is outstanding",
                seq,
                latest
            );
        }

        match result {
            Ok(nodes) => {
                let (tree, corp_names) = build_tree(&nodes);
                state.expanded_keys = get_all_keys(&tree);
                state.tree = tree;
                state.corp_names = corp_names;
                state.fetched_at = Some(Utc::now());
                state.status = FetchStatus::Success;
                tracing::info!(
                    "organization tree loaded: {} roots, {} corporations",
                    state.tree.len(),
                    state.corp_names.len()
                );
            }
            Err(e) => {
                // Previous tree stays visible
                tracing::warn!("organization tree fetch failed: {}", e);
                state.error = Some(Arc::new(e));
                state.status = FetchStatus::Error;
            }
        }
        state.loading = false;
        state.clone()
    }
}
