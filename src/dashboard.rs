//! Read-only dashboard projection.

use serde::Serialize;

use crate::model::{ActivityRecord, Category, RatedRecord, UserStats};
use crate::store::CatalogStore;

/// Everything the dashboard panel displays, combined from the cached
/// category counts and the latest snapshot. Recomputed on demand, never
/// cached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overview {
    pub total_templates: u64,
    pub categories: Vec<Category>,
    pub user_stats: UserStats,
    pub recent_updates: Vec<ActivityRecord>,
    pub top_rated: Vec<RatedRecord>,
}

pub fn overview(store: &CatalogStore) -> Overview {
    let snapshot = store.dashboard().cloned().unwrap_or_default();

    // Prefer the category list cache; the snapshot's aggregate stands in
    // until the categories view has loaded once.
    let categories = if store.categories().is_empty() {
        snapshot.categories
    } else {
        store.categories().to_vec()
    };

    let total_templates = if snapshot.total_templates > 0 {
        snapshot.total_templates
    } else {
        categories.iter().map(|c| c.count).sum()
    };

    Overview {
        total_templates,
        categories,
        user_stats: snapshot.user_stats,
        recent_updates: snapshot.recent_updates,
        top_rated: snapshot.top_rated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;
    use crate::model::TemplateView;

    #[test]
    fn overview_combines_snapshot_and_category_cache() {
        let mut store = CatalogStore::new();
        store.apply_dashboard(fallback::dashboard());
        store.apply_categories(fallback::categories());
        store.apply_reload(TemplateView::Featured, fallback::templates());

        let view = overview(&store);
        assert_eq!(view.total_templates, 2847);
        assert_eq!(view.categories.len(), 5);
        assert_eq!(view.user_stats.created, 23);
        assert_eq!(view.recent_updates.len(), 2);
        assert_eq!(view.top_rated.len(), 2);
    }

    #[test]
    fn total_falls_back_to_category_counts() {
        let mut store = CatalogStore::new();
        store.apply_categories(fallback::categories());

        let view = overview(&store);
        let expected: u64 = fallback::categories().iter().map(|c| c.count).sum();
        assert_eq!(view.total_templates, expected);
    }

    #[test]
    fn empty_store_projects_an_empty_overview() {
        let view = overview(&CatalogStore::new());
        assert_eq!(view.total_templates, 0);
        assert!(view.categories.is_empty());
        assert!(view.recent_updates.is_empty());
    }
}
