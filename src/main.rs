use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use promptdeck::catalog::Catalog;
use promptdeck::model::{SortKey, Template, ViewKind};
use promptdeck::mutation::{DeleteOutcome, MutationPipeline, SubmitOutcome, TemplateDraft};
use promptdeck::query::UiState;
use promptdeck::remote::RemoteGateway;

const DEFAULT_URL: &str = "http://localhost:8000/template-library";

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(about = "Prompt template catalog client", long_about = None)]
struct Cli {
    /// Template service base URL (defaults to $PROMPTDECK_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the curated featured templates
    Featured {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the full catalog
    Search {
        /// Search text
        #[arg(long, default_value = "")]
        search: String,
        /// Category filter ("All" means no constraint)
        #[arg(long, default_value = "All")]
        category: String,
        /// Sort key: popular, recent, rating, alphabetical
        #[arg(long, default_value = "popular")]
        sort: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List template categories
    Categories {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the dashboard overview
    Dashboard {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a template
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "General")]
        category: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Make the template public
        #[arg(long)]
        public: bool,
        /// Feature the template
        #[arg(long)]
        featured: bool,
    },

    /// Edit an existing template (unspecified fields keep their value)
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        public: Option<bool>,
        #[arg(long)]
        featured: Option<bool>,
    },

    /// Delete a template
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show a template's content and record a usage
    Use { id: String },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let url = cli
        .url
        .or_else(|| std::env::var("PROMPTDECK_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let catalog = Catalog::new(RemoteGateway::new(url)?);

    match cli.command {
        Commands::Featured { json } => {
            catalog.reload_featured().await;
            print_notice(&catalog);
            let templates = catalog.featured();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&templates).context("serialize templates")?
                );
            } else {
                print_templates(&templates);
            }
        }

        Commands::Search {
            search,
            category,
            sort,
            limit,
            offset,
            json,
        } => {
            let ui = UiState {
                search_text: search,
                category,
                sort: SortKey::parse(&sort)
                    .with_context(|| format!("unknown sort key: {}", sort))?,
                limit,
                offset,
            };
            catalog.reload_search(&ui).await;
            print_notice(&catalog);
            let templates = catalog.search_results();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&templates).context("serialize templates")?
                );
            } else {
                print_templates(&templates);
                if let Some(total) = catalog.search_total() {
                    println!("total: {}", total);
                }
            }
        }

        Commands::Categories { json } => {
            catalog.reload_categories().await;
            print_notice(&catalog);
            let categories = catalog.categories();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&categories).context("serialize categories")?
                );
            } else {
                for c in categories {
                    println!("{} ({} templates)", c.name, c.count);
                }
            }
        }

        Commands::Dashboard { json } => {
            catalog.reload_dashboard().await;
            catalog.reload_categories().await;
            print_notice(&catalog);
            let overview = catalog.overview();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&overview).context("serialize overview")?
                );
            } else {
                println!("templates: {}", overview.total_templates);
                for c in &overview.categories {
                    println!("  {} ({})", c.name, c.count);
                }
                println!(
                    "mine: {} created, {} saved, {} total uses",
                    overview.user_stats.created,
                    overview.user_stats.saved,
                    overview.user_stats.total_uses
                );
                for u in &overview.recent_updates {
                    println!("recent: {} {}", u.title, u.time.as_deref().unwrap_or(""));
                }
                for r in &overview.top_rated {
                    println!("top: {} {} ({} reviews)", r.title, r.rating, r.reviews);
                }
            }
        }

        Commands::Create {
            title,
            description,
            content,
            category,
            tags,
            public,
            featured,
        } => {
            let mut pipeline = MutationPipeline::new();
            pipeline.open_create();
            pipeline.set_draft(TemplateDraft {
                title,
                description,
                content,
                category,
                tags: parse_tags(&tags),
                is_public: public,
                is_featured: featured,
            });
            match pipeline.submit(&catalog).await {
                SubmitOutcome::Saved { id } => println!("Created {}", id),
                SubmitOutcome::Rejected { message } => {
                    anyhow::bail!(
                        "create failed: {}",
                        message.as_deref().unwrap_or("no details")
                    );
                }
                SubmitOutcome::NotEditing => unreachable!("create form was just opened"),
            }
        }

        Commands::Edit {
            id,
            title,
            description,
            content,
            category,
            tags,
            public,
            featured,
        } => {
            let current = catalog
                .gateway()
                .get(&id)
                .await
                .with_context(|| format!("load template {}", id))?;

            let mut pipeline = MutationPipeline::new();
            pipeline.open_edit(&current);

            let mut draft = TemplateDraft::from_template(&current);
            if let Some(v) = title {
                draft.title = v;
            }
            if let Some(v) = description {
                draft.description = v;
            }
            if let Some(v) = content {
                draft.content = v;
            }
            if let Some(v) = category {
                draft.category = v;
            }
            if let Some(v) = tags {
                draft.tags = parse_tags(&v);
            }
            if let Some(v) = public {
                draft.is_public = v;
            }
            if let Some(v) = featured {
                draft.is_featured = v;
            }
            pipeline.set_draft(draft);

            match pipeline.submit(&catalog).await {
                SubmitOutcome::Saved { id } => println!("Updated {}", id),
                SubmitOutcome::Rejected { message } => {
                    anyhow::bail!(
                        "update failed: {}",
                        message.as_deref().unwrap_or("no details")
                    );
                }
                SubmitOutcome::NotEditing => unreachable!("edit form was just opened"),
            }
        }

        Commands::Delete { id, yes } => {
            let current = catalog
                .gateway()
                .get(&id)
                .await
                .with_context(|| format!("load template {}", id))?;

            if !yes {
                anyhow::bail!(
                    "refusing to delete \"{}\" without --yes; this cannot be undone",
                    current.title
                );
            }

            let mut pipeline = MutationPipeline::new();
            pipeline.request_delete(&current);
            match pipeline.confirm_delete(&catalog, ViewKind::Search).await {
                DeleteOutcome::Deleted { id } => println!("Deleted {}", id),
                DeleteOutcome::Rejected { message } => {
                    anyhow::bail!(
                        "delete failed: {}",
                        message.as_deref().unwrap_or("no details")
                    );
                }
                DeleteOutcome::NothingPending => unreachable!("deletion was just requested"),
            }
        }

        Commands::Use { id } => {
            let template = catalog
                .gateway()
                .get(&id)
                .await
                .with_context(|| format!("load template {}", id))?;

            // Best effort; a failed ping never blocks showing the template.
            catalog.record_usage(&id).await;

            println!("{}", template.title);
            if !template.description.is_empty() {
                println!("{}", template.description);
            }
            println!();
            println!("{}", template.content);
        }
    }

    Ok(())
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn print_notice(catalog: &Catalog) {
    if let Some(notice) = catalog.take_notice() {
        eprintln!("note: {}", notice);
    }
}

fn print_templates(templates: &[Template]) {
    for t in templates {
        println!(
            "{}  {}  [{}]  ★{} ({})  by {}",
            t.id, t.title, t.category, t.rating, t.review_count, t.creator
        );
    }
}
