//! The canonical client-side entity cache and its two derived template views.
//!
//! The store performs no I/O and emits no network calls; it is mutated
//! exclusively through the small interface below, each call a single
//! synchronous step, so interleavings across suspended gateway calls can
//! never observe a partially updated view.

use crate::model::{Category, DashboardSnapshot, Template, TemplateView};

#[derive(Debug, Default)]
pub struct CatalogStore {
    featured: Vec<Template>,
    search: Vec<Template>,
    /// Server-reported total for the current search query, for pagination
    /// display; `None` until the first search reload lands.
    search_total: Option<u64>,
    categories: Vec<Category>,
    dashboard: Option<DashboardSnapshot>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn featured(&self) -> &[Template] {
        &self.featured
    }

    pub fn search_results(&self) -> &[Template] {
        &self.search
    }

    pub fn search_total(&self) -> Option<u64> {
        self.search_total
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn dashboard(&self) -> Option<&DashboardSnapshot> {
        self.dashboard.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&Template> {
        self.featured
            .iter()
            .chain(self.search.iter())
            .find(|t| t.id == id)
    }

    /// Fully replace the named template view with what the most recent
    /// accepted response said. No incremental diffing: the view always
    /// matches the response exactly.
    pub fn apply_reload(&mut self, view: TemplateView, templates: Vec<Template>) {
        match view {
            TemplateView::Featured => self.featured = templates,
            TemplateView::Search => self.search = templates,
        }
    }

    pub fn apply_search_total(&mut self, total: Option<u64>) {
        self.search_total = total;
    }

    pub fn apply_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn apply_dashboard(&mut self, snapshot: DashboardSnapshot) {
        self.dashboard = Some(snapshot);
    }

    /// Remove `id` from both template views in one step, so a template
    /// deleted from one view is immediately absent from the other as well.
    pub fn apply_local_delete(&mut self, id: &str) {
        self.featured.retain(|t| t.id != id);
        self.search.retain(|t| t.id != id);
    }

    /// Insert or replace `template` in both views. An id present in either
    /// view resolves to identical field values in both afterwards.
    pub fn apply_local_upsert(&mut self, template: Template) {
        upsert(&mut self.featured, template.clone());
        upsert(&mut self.search, template);
    }
}

fn upsert(view: &mut Vec<Template>, template: Template) {
    match view.iter_mut().find(|t| t.id == template.id) {
        Some(slot) => *slot = template,
        None => view.push(template),
    }
}
