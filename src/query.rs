//! Query composition from raw UI filter/sort state.

use crate::model::{SortKey, ViewQuery};

/// Filter/sort state as the UI holds it: unvalidated text, the literal
/// category button label, and the chosen sort.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub search_text: String,
    pub category: String,
    pub sort: SortKey,
    pub limit: u32,
    pub offset: u32,
}

impl UiState {
    pub fn new() -> Self {
        UiState {
            search_text: String::new(),
            category: "All".to_string(),
            sort: SortKey::Popular,
            limit: 20,
            offset: 0,
        }
    }
}

/// Pure and deterministic: identical inputs always produce an equal
/// `ViewQuery`, which is what lets the sequencer skip duplicate in-flight
/// requests. "All" is encoded as no category constraint, never sent literally.
pub fn compose(ui: &UiState) -> ViewQuery {
    let search = ui.search_text.trim();
    let search = if search.is_empty() {
        None
    } else {
        Some(search.to_string())
    };

    let category = if ui.category.eq_ignore_ascii_case("all") || ui.category.is_empty() {
        None
    } else {
        Some(ui.category.clone())
    };

    ViewQuery {
        search,
        category,
        sort: ui.sort,
        limit: if ui.limit == 0 { 20 } else { ui.limit },
        offset: ui.offset,
    }
}
