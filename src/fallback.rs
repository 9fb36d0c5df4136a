//! Static fallback dataset used when the remote service is unreachable.
//!
//! The data requires no network and satisfies the same canonical schema as
//! normalized remote records, so a view backed by it behaves exactly like a
//! view backed by a real response.

use crate::model::{
    ActivityRecord, Category, DashboardSnapshot, RatedRecord, Template, UserStats,
};

pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "fallback-1".to_string(),
            title: "Marketing Email Generator".to_string(),
            description:
                "Create compelling marketing emails for [PRODUCT] targeting [AUDIENCE] with focus on [BENEFIT]."
                    .to_string(),
            category: "Marketing".to_string(),
            tags: vec![
                "email".to_string(),
                "marketing".to_string(),
                "conversion".to_string(),
            ],
            content:
                "Create a compelling marketing email for [PRODUCT] targeting [AUDIENCE] with focus on [BENEFIT]. Include subject line, body, and CTA."
                    .to_string(),
            creator: "@marketing_pro".to_string(),
            created_at: "2024-01-15".to_string(),
            updated_at: "2024-01-20".to_string(),
            usage_count: 1247,
            rating: 4.8,
            review_count: 156,
            is_featured: true,
            is_public: true,
            version: "2.1".to_string(),
        },
        Template {
            id: "fallback-2".to_string(),
            title: "Code Documentation Writer".to_string(),
            description:
                "Generate comprehensive documentation for [CODE_BLOCK]. Include purpose, parameters, return values."
                    .to_string(),
            category: "Coding".to_string(),
            tags: vec![
                "documentation".to_string(),
                "code".to_string(),
                "api".to_string(),
            ],
            content:
                "Generate comprehensive documentation for: [CODE_BLOCK]. Include: purpose, parameters, return values, examples, and error handling."
                    .to_string(),
            creator: "@dev_tools".to_string(),
            created_at: "2024-01-10".to_string(),
            updated_at: "2024-01-18".to_string(),
            usage_count: 892,
            rating: 4.7,
            review_count: 89,
            is_featured: true,
            is_public: true,
            version: "1.5".to_string(),
        },
    ]
}

pub fn categories() -> Vec<Category> {
    let defs = [
        ("Marketing Copy", 847, "#667eea"),
        ("Code Generation", 623, "#764ba2"),
        ("Creative Writing", 456, "#8b5cf6"),
        ("Data Analysis", 334, "#6366f1"),
        ("Support", 278, "#8b9cf7"),
    ];
    defs.iter()
        .map(|(name, count, color)| Category {
            name: name.to_string(),
            count: *count,
            color: color.to_string(),
        })
        .collect()
}

pub fn dashboard() -> DashboardSnapshot {
    DashboardSnapshot {
        total_templates: 2847,
        categories: Vec::new(),
        user_stats: UserStats {
            created: 23,
            saved: 156,
            total_uses: 1200,
        },
        recent_updates: vec![
            ActivityRecord {
                title: "Email Marketing Campaign".to_string(),
                time: Some("2 hours ago".to_string()),
                variants: Some(47),
                kind: Some("updated".to_string()),
            },
            ActivityRecord {
                title: "Python Code Documentation".to_string(),
                time: Some("1 day ago".to_string()),
                variants: None,
                kind: Some("community".to_string()),
            },
        ],
        top_rated: vec![
            RatedRecord {
                title: "Product Description Writer".to_string(),
                rating: 4.8,
                reviews: 247,
            },
            RatedRecord {
                title: "Email Subject Line Generator".to_string(),
                rating: 4.9,
                reviews: 189,
            },
        ],
    }
}
