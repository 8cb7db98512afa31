//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shopscout")]
#[command(
    author,
    version,
    about = "Natural-language product and store search over catalog and vector backends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Structured catalog search with filter extraction and fallback
    Search(SearchArgs),

    /// Semantic similarity search with optional reranking
    Similar(SimilarArgs),

    /// Show the structured intent extracted from a query
    Extract(ExtractArgs),

    /// Show the backend query body without executing it
    Plan(PlanArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Vec<String>,

    /// Sort order (relevance, price_asc, price_desc, rating_desc)
    #[arg(long, default_value = "relevance")]
    pub sort: String,

    /// Result offset
    #[arg(long, default_value_t = 0)]
    pub from: usize,

    /// Result count
    #[arg(long, default_value_t = 10)]
    pub size: usize,

    /// Return an honest empty set instead of relaxing the query
    #[arg(long)]
    pub no_fallback: bool,

    /// Use the entity recognizer for extraction (falls back to patterns)
    #[arg(long)]
    pub entities: bool,
}

#[derive(Args)]
pub struct SimilarArgs {
    /// Search query
    pub query: Vec<String>,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Minimum similarity (0.0 - 1.0)
    #[arg(long, default_value_t = 0.5)]
    pub min_similarity: f32,

    /// Rerank candidates with the relevance scorer
    #[arg(long)]
    pub rerank: bool,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Query to extract from
    pub query: Vec<String>,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Query to plan
    pub query: Vec<String>,

    /// Sort order (relevance, price_asc, price_desc, rating_desc)
    #[arg(long, default_value = "relevance")]
    pub sort: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Cli,
    /// JSON
    Json,
}
