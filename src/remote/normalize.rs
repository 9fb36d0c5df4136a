//! Normalization of heterogeneous remote record shapes into the canonical
//! schema.
//!
//! A legacy backend may expose `name` instead of `title`, `template_text`
//! instead of `content`, and an author handle instead of a display creator.
//! Everything except the id gets a safe default; defaulting never fails an
//! operation, and normalizing an already-canonical record changes nothing.

use serde::Deserialize;

use super::GatewayError;
use crate::model::{Category, DashboardSnapshot, Template, UserStats};

#[derive(Debug, Default, Deserialize)]
pub struct RawTemplate {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub template_text: Option<String>,

    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub usage_count: Option<u64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u64>,

    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub is_public: Option<bool>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Map a raw record onto the canonical schema. The id is the only required
/// field; a record without one cannot enter the store and classifies as a
/// malformed response.
pub fn template(raw: RawTemplate) -> Result<Template, GatewayError> {
    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::MalformedResponse("template record has no id".to_string()))?;

    let creator = raw
        .creator
        .or(raw.creator_name)
        .unwrap_or_else(|| format!("@{}", raw.created_by.as_deref().unwrap_or("user")));

    Ok(Template {
        id,
        title: raw.title.or(raw.name).unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        category: raw.category.unwrap_or_else(|| "General".to_string()),
        tags: raw.tags.unwrap_or_default(),
        content: raw.content.or(raw.template_text).unwrap_or_default(),
        creator,
        created_at: raw.created_at.unwrap_or_default(),
        updated_at: raw.updated_at.unwrap_or_default(),
        usage_count: raw.usage_count.unwrap_or(0),
        rating: raw.rating.unwrap_or(0.0),
        review_count: raw.review_count.unwrap_or(0),
        is_featured: raw.is_featured.unwrap_or(false),
        is_public: raw.is_public.unwrap_or(false),
        version: raw.version.unwrap_or_else(|| "1.0".to_string()),
    })
}

pub fn templates(raw: Vec<RawTemplate>) -> Result<Vec<Template>, GatewayError> {
    raw.into_iter().map(template).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCategory {
    pub name: String,

    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub template_count: Option<u64>,

    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
}

const DEFAULT_CATEGORY_COLOR: &str = "#667eea";

pub fn category(raw: RawCategory) -> Category {
    Category {
        name: raw.name,
        count: raw.count.or(raw.template_count).unwrap_or(0),
        color: raw
            .color
            .or(raw.color_hex)
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDashboard {
    #[serde(default)]
    pub total_templates: Option<u64>,

    #[serde(default)]
    pub categories: Vec<RawCategory>,

    #[serde(default)]
    pub user_stats: Option<UserStats>,

    #[serde(default)]
    pub recent_updates: Vec<crate::model::ActivityRecord>,

    #[serde(default)]
    pub top_rated: Vec<crate::model::RatedRecord>,
}

pub fn dashboard(raw: RawDashboard) -> DashboardSnapshot {
    DashboardSnapshot {
        total_templates: raw.total_templates.unwrap_or(0),
        categories: raw.categories.into_iter().map(category).collect(),
        user_stats: raw.user_stats.unwrap_or_default(),
        recent_updates: raw.recent_updates,
        top_rated: raw.top_rated,
    }
}

impl From<Template> for RawTemplate {
    fn from(t: Template) -> Self {
        RawTemplate {
            id: Some(t.id),
            title: Some(t.title),
            name: None,
            description: Some(t.description),
            category: Some(t.category),
            tags: Some(t.tags),
            content: Some(t.content),
            template_text: None,
            creator: Some(t.creator),
            creator_name: None,
            created_by: None,
            created_at: Some(t.created_at),
            updated_at: Some(t.updated_at),
            usage_count: Some(t.usage_count),
            rating: Some(t.rating),
            review_count: Some(t.review_count),
            is_featured: Some(t.is_featured),
            is_public: Some(t.is_public),
            version: Some(t.version),
        }
    }
}
