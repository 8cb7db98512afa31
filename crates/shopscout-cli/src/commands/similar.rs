//! Semantic similarity search command

use crate::app::{OutputFormat, SimilarArgs};
use crate::output;
use anyhow::Result;
use shopscout_core::{
    rerank, Config, HttpEmbedder, HttpScorer, HttpVectorStore, SimilaritySearch,
};

pub async fn run(args: SimilarArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");

    let embedder = HttpEmbedder::new(config.embedding.clone())?;
    let store = HttpVectorStore::new(config.vectors.clone())?;
    let search = SimilaritySearch::new(&embedder, &store);

    let candidates = search
        .search(&query, args.limit, args.min_similarity)
        .await?;

    let results = if args.rerank {
        match config.scorer.clone().map(HttpScorer::new).transpose() {
            Ok(Some(scorer)) => rerank(&scorer, &query, candidates).await,
            Ok(None) => {
                eprintln!("Warning: no scorer configured, skipping rerank.");
                candidates
            }
            Err(e) => {
                eprintln!("Warning: scorer unavailable ({}), skipping rerank.", e);
                candidates
            }
        }
    } else {
        candidates
    };

    output::print_results(&results, format);
    Ok(())
}
