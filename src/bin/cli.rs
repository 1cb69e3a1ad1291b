//! blogctl
//!
//! Command-line front end for the blog content API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use blog_client::{
    BlogClient,
    api::Credential,
    error::{AppError, Result},
    models::{Article, ArticleDraft, Category, CategoryDraft, Config, WriteOutcome},
    services::{SearchQuery, SortBy, catalog::CATEGORY_PREVIEW_SIZE},
    utils::slugify,
};

/// blogctl - Blog content API client
#[derive(Parser, Debug)]
#[command(name = "blogctl", version, about = "Read and manage blog content")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "blog.toml")]
    config: PathBuf,

    /// Override `api.base_url`
    #[arg(long, env = "BLOG_API_URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List published articles
    Articles,

    /// Show one article
    Article { slug: String },

    /// List article slugs
    Slugs,

    /// List categories
    Categories {
        /// Include a preview of each category's articles
        #[arg(long)]
        with_articles: bool,
    },

    /// Show a category and its articles
    Category { name: String },

    /// Search published articles
    Search {
        query: String,

        #[arg(long)]
        category: Option<String>,

        /// Required tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// relevance, date, title or author
        #[arg(long, default_value = "relevance")]
        sort: SortBy,
    },

    /// Check API health
    Health,

    /// Validate configuration
    Validate,

    /// Authenticated operations
    Admin {
        /// Admin password
        #[arg(long, env = "BLOG_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List all articles, drafts included
    List,

    /// Create an article
    Create(ArticleArgs),

    /// Update an article; omitted fields keep their current value
    Update {
        id: String,

        #[command(flatten)]
        fields: ArticleArgs,
    },

    /// Delete an article
    Delete { id: String },

    /// List all categories
    Categories,

    /// Create a category
    CreateCategory(CategoryArgs),

    /// Update a category
    UpdateCategory {
        id: String,

        #[command(flatten)]
        fields: CategoryArgs,
    },

    /// Delete a category
    DeleteCategory { id: String },
}

#[derive(Args, Debug)]
struct ArticleArgs {
    #[arg(long)]
    title: Option<String>,

    /// Defaults to the slugified title
    #[arg(long)]
    slug: Option<String>,

    #[arg(long)]
    author: Option<String>,

    /// Read the content from a file
    #[arg(long)]
    content_file: Option<PathBuf>,

    #[arg(long)]
    summary: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,

    #[arg(long)]
    cover_image: Option<String>,

    #[arg(long, conflicts_with = "draft")]
    publish: bool,

    #[arg(long)]
    draft: bool,
}

impl ArticleArgs {
    /// Apply the given fields over `draft`.
    fn apply(self, mut draft: ArticleDraft) -> Result<ArticleDraft> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(slug) = self.slug {
            draft.slug = slug;
        }
        if draft.slug.trim().is_empty() {
            draft.slug = slugify(&draft.title);
        }
        if let Some(author) = self.author {
            draft.author = author;
        }
        if let Some(path) = self.content_file {
            draft.content = std::fs::read_to_string(path)?;
        }
        if let Some(summary) = self.summary {
            draft.summary = summary;
        }
        if let Some(tags) = self.tags {
            draft.tags = blog_client::services::normalizer::split_tags(&tags);
        }
        if let Some(cover) = self.cover_image {
            draft.cover_image = Some(cover);
        }
        if self.publish {
            draft.is_published = true;
        } else if self.draft {
            draft.is_published = false;
        }

        if draft.title.trim().is_empty() || draft.slug.is_empty() {
            return Err(AppError::validation("an article needs a title and a slug"));
        }
        Ok(draft)
    }
}

#[derive(Args, Debug)]
struct CategoryArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    cover: Option<String>,
}

impl From<CategoryArgs> for CategoryDraft {
    fn from(args: CategoryArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            cover: args.cover,
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = default_log_level(verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Print `value` as pretty JSON, or through `plain` otherwise.
fn emit<V: Serialize>(json: bool, value: &V, plain: impl FnOnce(&V)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        plain(value);
    }
    Ok(())
}

fn print_articles(articles: &[Article]) {
    for article in articles {
        let state = if article.published { "" } else { " [draft]" };
        println!(
            "{:>6}  {:<40}  {}  {}{}",
            article.id, article.slug, article.date, article.title, state
        );
    }
}

fn print_categories(categories: &[Category]) {
    for category in categories {
        println!("{:>6}  {:<24}  {}", category.id, category.name, category.description);
    }
}

fn print_outcome(outcome: &WriteOutcome) {
    match (outcome.message.as_deref(), outcome.id()) {
        (Some(message), Some(id)) => println!("{message} (id {id})"),
        (Some(message), None) => println!("{message}"),
        (None, Some(id)) => println!("ok (id {id})"),
        (None, None) => println!("ok"),
    }
}

async fn run_admin(
    client: &BlogClient,
    json: bool,
    credential: &Credential,
    command: AdminCommand,
) -> Result<()> {
    match command {
        AdminCommand::List => {
            let articles = client.admin_list_articles(credential).await?;
            emit(json, &articles, |a| print_articles(a))
        }
        AdminCommand::Create(fields) => {
            let draft = fields.apply(ArticleDraft::default())?;
            let outcome = client.create_article(credential, &draft).await?;
            log::info!("Created article '{}'", draft.slug);
            emit(json, &outcome.id(), |_| print_outcome(&outcome))
        }
        AdminCommand::Update { id, fields } => {
            let articles = client.admin_list_articles(credential).await?;
            let current = articles
                .iter()
                .find(|a| a.id == id)
                .ok_or_else(|| AppError::validation(format!("no article with id {id}")))?;
            let draft = fields.apply(ArticleDraft::from(current))?;
            let outcome = client.update_article(credential, &id, &draft).await?;
            emit(json, &outcome.id(), |_| print_outcome(&outcome))
        }
        AdminCommand::Delete { id } => {
            let outcome = client.delete_article(credential, &id).await?;
            emit(json, &outcome.id(), |_| print_outcome(&outcome))
        }
        AdminCommand::Categories => {
            let categories = client.admin_list_categories(credential).await?;
            emit(json, &categories, |c| print_categories(c))
        }
        AdminCommand::CreateCategory(fields) => {
            let outcome = client.create_category(credential, &fields.into()).await?;
            emit(json, &outcome.id(), |_| print_outcome(&outcome))
        }
        AdminCommand::UpdateCategory { id, fields } => {
            let outcome = client
                .update_category(credential, &id, &fields.into())
                .await?;
            emit(json, &outcome.id(), |_| print_outcome(&outcome))
        }
        AdminCommand::DeleteCategory { id } => {
            let outcome = client.delete_category(credential, &id).await?;
            emit(json, &outcome.id(), |_| print_outcome(&outcome))
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        log::debug!("No config at {}, using defaults", cli.config.display());
        Config::default()
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    let client = BlogClient::from_config(&config)?;
    let json = cli.json;

    match cli.command {
        Command::Articles => {
            let articles = client.list_articles().await?;
            emit(json, &articles, |a| print_articles(a))?;
        }

        Command::Article { slug } => match client.get_article_by_slug(&slug).await? {
            Some(article) => emit(json, &article, |a| {
                println!("{}\n{} · {} · {}\n", a.title, a.author, a.date, a.read_time);
                println!("{}", a.content);
            })?,
            None => {
                return Err(AppError::validation(format!("article '{slug}' not found")));
            }
        },

        Command::Slugs => {
            let slugs = client.list_article_slugs().await?;
            emit(json, &slugs, |s| s.iter().for_each(|slug| println!("{slug}")))?;
        }

        Command::Categories { with_articles } => {
            if with_articles {
                let groups = client
                    .list_categories_with_articles(CATEGORY_PREVIEW_SIZE)
                    .await?;
                emit(json, &groups, |groups| {
                    for group in groups {
                        println!("{} ({})", group.category.name, group.article_count);
                        for article in &group.articles {
                            println!("  - {}", article.title);
                        }
                    }
                })?;
            } else {
                let categories = client.list_categories().await?;
                emit(json, &categories, |c| print_categories(c))?;
            }
        }

        Command::Category { name } => match client.get_category_with_articles(&name).await? {
            Some(group) => emit(json, &group, |g| {
                println!("{}: {}", g.category.name, g.category.description);
                print_articles(&g.articles);
            })?,
            None => {
                return Err(AppError::validation(format!("category '{name}' not found")));
            }
        },

        Command::Search {
            query,
            category,
            tags,
            sort,
        } => {
            let query = SearchQuery {
                text: query,
                category,
                tags,
                sort,
            };
            let hits = client.search(&query).await?;
            emit(json, &hits, |a| print_articles(a))?;
        }

        Command::Health => {
            let healthy = client.health_check().await;
            emit(json, &healthy, |h| {
                println!("{}", if *h { "OK" } else { "UNHEALTHY" })
            })?;
            if !healthy {
                return Err(AppError::config("API is not healthy"));
            }
        }

        Command::Admin { password, command } => {
            let credential = Credential::new(password);
            run_admin(&client, json, &credential, command).await?;
        }

        Command::Validate => println!("Config OK ({})", config.api.base_url),
    }

    Ok(())
}
