//! The catalog session: one owned store, one gateway, one sequencer.
//!
//! All reload paths run through here. Network calls are the only suspension
//! points; the store mutex is taken only for single synchronous steps and is
//! never held across an await, so no interleaving of concurrent reloads can
//! observe a partially updated view.

use std::sync::Mutex;

use crate::dashboard::{self, Overview};
use crate::fallback;
use crate::model::{Category, DashboardSnapshot, Template, TemplateView, ViewKind, ViewQuery};
use crate::query::{self, UiState};
use crate::remote::RemoteGateway;
use crate::sequencer::Sequencer;
use crate::store::CatalogStore;

const FEATURED_LIMIT: u32 = 8;

/// What a reload did. `Skipped` covers both a superseded completion and a
/// deduplicated duplicate request; in either case the store was not touched
/// by this call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReloadOutcome {
    Fresh,
    Skipped,
    /// The read failed; this view now shows the static fallback dataset and
    /// an advisory notice was recorded.
    Fallback,
}

pub struct Catalog {
    gateway: RemoteGateway,
    store: Mutex<CatalogStore>,
    sequencer: Sequencer,
    last_query: Mutex<ViewQuery>,
    notice: Mutex<Option<String>>,
}

impl Catalog {
    pub fn new(gateway: RemoteGateway) -> Self {
        Catalog {
            gateway,
            store: Mutex::new(CatalogStore::new()),
            sequencer: Sequencer::new(),
            last_query: Mutex::new(ViewQuery::default()),
            notice: Mutex::new(None),
        }
    }

    pub fn gateway(&self) -> &RemoteGateway {
        &self.gateway
    }

    pub fn featured(&self) -> Vec<Template> {
        self.store().featured().to_vec()
    }

    pub fn search_results(&self) -> Vec<Template> {
        self.store().search_results().to_vec()
    }

    pub fn search_total(&self) -> Option<u64> {
        self.store().search_total()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.store().categories().to_vec()
    }

    pub fn dashboard(&self) -> Option<DashboardSnapshot> {
        self.store().dashboard().cloned()
    }

    pub fn find(&self, id: &str) -> Option<Template> {
        self.store().find(id).cloned()
    }

    pub fn overview(&self) -> Overview {
        dashboard::overview(&self.store())
    }

    /// The advisory notice from the most recent read-path fallback, if one
    /// has not been displayed yet. Non-blocking: the views stay usable.
    pub fn take_notice(&self) -> Option<String> {
        self.notice.lock().expect("notice lock").take()
    }

    pub async fn reload_featured(&self) -> ReloadOutcome {
        let Some(seq) = self.sequencer.begin(ViewKind::Featured, None) else {
            return ReloadOutcome::Skipped;
        };

        match self.gateway.list_featured(FEATURED_LIMIT).await {
            Ok(templates) => {
                if !self.sequencer.complete(ViewKind::Featured, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.store().apply_reload(TemplateView::Featured, templates);
                ReloadOutcome::Fresh
            }
            Err(err) => {
                if !self.sequencer.complete(ViewKind::Featured, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.advise(ViewKind::Featured, &err);
                self.store()
                    .apply_reload(TemplateView::Featured, fallback::templates());
                ReloadOutcome::Fallback
            }
        }
    }

    /// Compose the UI's current filter/sort state into a query and reload
    /// the full-search view with it.
    pub async fn reload_search(&self, ui: &UiState) -> ReloadOutcome {
        self.reload_query(query::compose(ui)).await
    }

    pub async fn reload_query(&self, query: ViewQuery) -> ReloadOutcome {
        self.reload_query_inner(query, false).await
    }

    /// `force` bypasses duplicate suppression so a post-write reload is
    /// always issued; the fresh sequence number then discards any response
    /// to the same query that was requested before the write.
    async fn reload_query_inner(&self, query: ViewQuery, force: bool) -> ReloadOutcome {
        let seq = if force {
            self.sequencer.begin_forced(ViewKind::Search, Some(&query))
        } else {
            match self.sequencer.begin(ViewKind::Search, Some(&query)) {
                Some(seq) => seq,
                None => return ReloadOutcome::Skipped,
            }
        };
        *self.last_query.lock().expect("query lock") = query.clone();

        match self.gateway.search(&query).await {
            Ok(page) => {
                if !self.sequencer.complete(ViewKind::Search, seq) {
                    return ReloadOutcome::Skipped;
                }
                let mut store = self.store();
                store.apply_reload(TemplateView::Search, page.templates);
                store.apply_search_total(page.total);
                ReloadOutcome::Fresh
            }
            Err(err) => {
                if !self.sequencer.complete(ViewKind::Search, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.advise(ViewKind::Search, &err);
                let mut store = self.store();
                store.apply_reload(TemplateView::Search, fallback::templates());
                store.apply_search_total(None);
                ReloadOutcome::Fallback
            }
        }
    }

    pub async fn reload_categories(&self) -> ReloadOutcome {
        let Some(seq) = self.sequencer.begin(ViewKind::Categories, None) else {
            return ReloadOutcome::Skipped;
        };

        match self.gateway.list_categories().await {
            Ok(categories) => {
                if !self.sequencer.complete(ViewKind::Categories, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.store().apply_categories(categories);
                ReloadOutcome::Fresh
            }
            Err(err) => {
                if !self.sequencer.complete(ViewKind::Categories, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.advise(ViewKind::Categories, &err);
                self.store().apply_categories(fallback::categories());
                ReloadOutcome::Fallback
            }
        }
    }

    pub async fn reload_dashboard(&self) -> ReloadOutcome {
        let Some(seq) = self.sequencer.begin(ViewKind::Dashboard, None) else {
            return ReloadOutcome::Skipped;
        };

        match self.gateway.dashboard().await {
            Ok(snapshot) => {
                if !self.sequencer.complete(ViewKind::Dashboard, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.store().apply_dashboard(snapshot);
                ReloadOutcome::Fresh
            }
            Err(err) => {
                if !self.sequencer.complete(ViewKind::Dashboard, seq) {
                    return ReloadOutcome::Skipped;
                }
                self.advise(ViewKind::Dashboard, &err);
                self.store().apply_dashboard(fallback::dashboard());
                ReloadOutcome::Fallback
            }
        }
    }

    /// Initial load: refresh every view and the dashboard. Failures degrade
    /// per view; they never abort the others.
    pub async fn reload_all(&self) {
        self.reload_all_inner(false).await;
    }

    async fn reload_all_inner(&self, force: bool) {
        let last = self.last_query.lock().expect("query lock").clone();
        tokio::join!(
            self.reload_featured(),
            self.reload_query_inner(last, force),
            self.reload_categories(),
            self.reload_dashboard(),
        );
    }

    /// Fire-and-forget usage ping. Failure is logged and swallowed; it must
    /// never block or alter the action that triggered it.
    pub async fn record_usage(&self, id: &str) {
        if let Err(err) = self.gateway.record_usage(id).await {
            tracing::debug!(template = id, error = %err, "usage ping failed, ignoring");
        }
    }

    pub fn apply_local_delete(&self, id: &str) {
        self.store().apply_local_delete(id);
    }

    pub fn apply_local_upsert(&self, template: Template) {
        self.store().apply_local_upsert(template);
    }

    /// A successful write reloads everything instead of merging the returned
    /// entity: slower, but the views are guaranteed to match the server's
    /// authoritative state. Forced, so a search issued before the write can
    /// never stand as the settled result.
    pub(crate) async fn reload_after_write(&self) {
        self.reload_all_inner(true).await;
    }

    /// Re-run the last composed search query, e.g. to reconcile pagination
    /// counts after a delete. Forced for the same reason as
    /// [`Catalog::reload_after_write`].
    pub(crate) async fn reload_search_again(&self) -> ReloadOutcome {
        let last = self.last_query.lock().expect("query lock").clone();
        self.reload_query_inner(last, true).await
    }

    fn store(&self) -> std::sync::MutexGuard<'_, CatalogStore> {
        self.store.lock().expect("store lock")
    }

    fn advise(&self, view: ViewKind, err: &crate::remote::GatewayError) {
        tracing::warn!(view = view.label(), error = %err, "read failed, using fallback dataset");
        *self.notice.lock().expect("notice lock") = Some(format!(
            "Failed to load {} ({err}). Showing sample data.",
            view.label()
        ));
    }
}
