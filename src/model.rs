use serde::{Deserialize, Serialize};

/// Canonical template record as it exists inside the catalog store. Every
/// record crossing the remote boundary is normalized into this shape first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Template body; may contain placeholder markers of the form `[NAME]`.
    pub content: String,
    pub creator: String,
    pub created_at: String,
    pub updated_at: String,
    pub usage_count: u64,
    pub rating: f64,
    pub review_count: u64,
    pub is_featured: bool,
    pub is_public: bool,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Display aggregate reported by the server; not authoritative.
    pub count: u64,
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub created: u64,
    pub saved: u64,
    pub total_uses: u64,
}

/// Lightweight activity record from the dashboard's recent-update feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub title: String,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub variants: Option<u64>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatedRecord {
    pub title: String,
    pub rating: f64,
    pub reviews: u64,
}

/// Immutable dashboard value, replaced wholesale on every refresh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_templates: u64,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub user_stats: UserStats,

    #[serde(default)]
    pub recent_updates: Vec<ActivityRecord>,

    #[serde(default)]
    pub top_rated: Vec<RatedRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Popular,
    Recent,
    Rating,
    Alphabetical,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Recent => "recent",
            SortKey::Rating => "rating",
            SortKey::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(SortKey::Popular),
            "recent" => Some(SortKey::Recent),
            "rating" => Some(SortKey::Rating),
            "alphabetical" => Some(SortKey::Alphabetical),
            _ => None,
        }
    }
}

/// Canonical query for the full-search view. Equality is exact so in-flight
/// duplicates can be detected and skipped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Trimmed search text; `None` means no search constraint.
    pub search: Option<String>,
    /// Category name; `None` means "All" (no constraint).
    pub category: Option<String>,
    pub sort: SortKey,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ViewQuery {
    fn default() -> Self {
        ViewQuery {
            search: None,
            category: None,
            sort: SortKey::default(),
            limit: 20,
            offset: 0,
        }
    }
}

impl ViewQuery {
    /// Wire query pairs for the list/search endpoint. Unconstrained fields
    /// are omitted entirely, never sent as literal "All" or empty strings.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sort_by", self.sort.as_str().to_string()),
        ];
        if let Some(search) = &self.search {
            out.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            out.push(("category", category.clone()));
        }
        out
    }
}

/// The two template result sets a reload can replace. Categories and the
/// dashboard are replaced through their own typed calls on the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateView {
    Featured,
    Search,
}

/// The two independently cached template result sets, plus the auxiliary
/// caches that reload through the same sequencing rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Featured,
    Search,
    Categories,
    Dashboard,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Featured => "featured",
            ViewKind::Search => "search",
            ViewKind::Categories => "categories",
            ViewKind::Dashboard => "dashboard",
        }
    }
}
