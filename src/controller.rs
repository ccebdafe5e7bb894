/// Activation and copy flows; the single owner of application state
use crate::config::{CopierConfig, HISTORY_KEY, OPTIONS_KEY, VISITED_KEY};
use crate::contribution::{Contribution, ContributionId};
use crate::error::{CopyError, PersistenceError};
use crate::gateways::{ClipboardGateway, HostPageGateway, PersistenceGateway};
use crate::page_title::{parse_page, PageMetadata};
use crate::recency::{decode_snapshot, DuplicatePolicy, RecencyStore, RecordOutcome};
use crate::view_model::{current_page_candidates, render, RenderModel};

/// Everything the popup knows for one activation
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub config: CopierConfig,
    pub page: Option<PageMetadata>,
    pub store: RecencyStore,
    /// Issue and pull request pages the popup was opened on
    pub visited: RecencyStore,
    /// Shown to the user when the history could not be saved
    pub warning: Option<String>,
}

/// Result of a successful copy
#[derive(Debug, Clone, PartialEq)]
pub struct CopyReport {
    pub contribution: Contribution,
    pub clipboard_text: String,
    pub outcome: RecordOutcome,
    pub persisted: bool,
}

pub struct Controller<P, C> {
    state: AppState,
    model: RenderModel,
    persistence: P,
    clipboard: C,
}

impl<P: PersistenceGateway, C: ClipboardGateway> Controller<P, C> {
    /// Read the active tab, options and history, then build the first render model
    pub async fn activate<H: HostPageGateway>(host: &H, persistence: P, clipboard: C) -> Self {
        let page = match host.active_tab().await {
            Ok(tab) => match parse_page(&tab.title, &tab.url) {
                Ok(Some(meta)) => {
                    log::info!("Current page: {} #{} in {}", meta.kind.label(), meta.index, meta.repo_name);
                    Some(meta)
                }
                Ok(None) => {
                    log::info!("Not an issue or pull request page: {}", tab.url);
                    None
                }
                Err(e) => {
                    log::warn!("Could not read page metadata: {}", e);
                    None
                }
            },
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };

        let config = match persistence.load(OPTIONS_KEY).await {
            Ok(value) => CopierConfig::from_stored(value),
            Err(e) => {
                log::warn!("Using default options: {}", e);
                CopierConfig::default()
            }
        };

        let store = load_store(&persistence, HISTORY_KEY, config.history_capacity, config.duplicate_policy).await;

        // Visited pages keep the latest title of each page
        let mut visited = load_store(&persistence, VISITED_KEY, config.visited_capacity, DuplicatePolicy::Refresh).await;
        let mut warning = None;
        if let Some(candidate) = page.as_ref().and_then(|meta| current_page_candidates(meta).into_iter().next()) {
            visited.record_use(candidate);
            if let Err(e) = save_list(&persistence, VISITED_KEY, &visited).await {
                log::warn!("Visited pages not saved: {}", e);
                warning = Some("Could not save visited pages.".to_string());
            }
        }

        let state = AppState {
            config,
            page,
            store,
            visited,
            warning,
        };
        let model = build_model(&state);

        Controller {
            state,
            model,
            persistence,
            clipboard,
        }
    }

    /// Copy the entry's markdown link, record the use and persist the history
    ///
    /// A clipboard failure leaves the store untouched. A save failure keeps
    /// the in-memory store and sets a warning.
    pub async fn copy(&mut self, id: &ContributionId) -> Result<CopyReport, CopyError> {
        let contribution = self
            .model
            .resolve(id)
            .cloned()
            .ok_or_else(|| CopyError::UnknownEntry(id.to_string()))?;

        let clipboard_text = contribution.markdown_link();
        self.clipboard.write_text(&clipboard_text).await?;
        log::info!("Copied {}", clipboard_text);

        let outcome = self.state.store.record_use(contribution.clone());

        let persisted = match self.save_history().await {
            Ok(()) => {
                self.state.warning = None;
                true
            }
            Err(e) => {
                log::warn!("History not saved: {}", e);
                self.state.warning = Some("Could not save history; this copy will not be remembered.".to_string());
                false
            }
        };

        self.model = build_model(&self.state);

        Ok(CopyReport {
            contribution,
            clipboard_text,
            outcome,
            persisted,
        })
    }

    async fn save_history(&self) -> Result<(), PersistenceError> {
        save_list(&self.persistence, HISTORY_KEY, &self.state.store).await
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn model(&self) -> &RenderModel {
        &self.model
    }
}

fn build_model(state: &AppState) -> RenderModel {
    let current_url = state.page.as_ref().map(|meta| meta.page_url.as_str());
    render(state.page.as_ref(), &state.store).with_visited(&state.visited, current_url)
}

/// Load a stored list; unavailable storage or bad records degrade to what could be read
async fn load_store<P: PersistenceGateway>(
    persistence: &P,
    key: &str,
    capacity: usize,
    policy: DuplicatePolicy,
) -> RecencyStore {
    let records = match persistence.load(key).await {
        Ok(Some(value)) => {
            let (records, skipped) = decode_snapshot(value);
            if skipped > 0 {
                log::warn!("Skipped {} unreadable records under {}", skipped, key);
            }
            records
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("{} unavailable, starting empty: {}", key, e);
            Vec::new()
        }
    };

    RecencyStore::from_snapshot(records, capacity, policy)
}

async fn save_list<P: PersistenceGateway>(persistence: &P, key: &str, store: &RecencyStore) -> Result<(), PersistenceError> {
    let value = serde_json::to_value(store.to_list()).map_err(|e| PersistenceError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    persistence.save(key, value).await
}
