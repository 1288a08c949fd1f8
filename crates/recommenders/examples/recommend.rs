//! Example: Run every engine for one user and one movie
//!
//! Run with: cargo run --package recommenders --example recommend
//!
//! This example shows how to:
//! 1. Load the dataset from data/raw
//! 2. Build each engine once over a shared catalog
//! 3. Time a request against each engine
//! 4. Display the results

use data_loader::Catalog;
use recommenders::{
    ContentSimilarityEngine, DEFAULT_K, NeighborhoodPredictor, PopularityRanker, Recommendation,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn print_top(label: &str, recs: &[Recommendation]) {
    println!("{label}: {} results", recs.len());
    for rec in recs.iter().take(5) {
        println!(
            "  {:>2}. {:<45} {:?}  score {:.3}",
            rec.rank, rec.title, rec.year, rec.score
        );
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== MyNextMovie Engine Example ===\n");

    println!("Loading dataset...");
    let start = Instant::now();
    let catalog = Arc::new(Catalog::load_from_dir(Path::new("data/raw"))?);
    println!("Loaded dataset in {:?}\n", start.elapsed());

    let Some(&user_id) = catalog.user_ids().first() else {
        anyhow::bail!("Dataset has no ratings");
    };
    let Some(query) = catalog.movies().first().map(|m| m.title.clone()) else {
        anyhow::bail!("Dataset has no movies");
    };

    let start = Instant::now();
    let popularity = PopularityRanker::new(catalog.clone());
    let recs = popularity.recommend(Some("Comedy"), 50, 10);
    println!("Popularity in {:?}", start.elapsed());
    print_top("Top comedies", &recs);

    let start = Instant::now();
    let content = ContentSimilarityEngine::new(catalog.clone());
    let recs = content.recommend(&query, 10);
    println!("Content (incl. build) in {:?}", start.elapsed());
    print_top(&format!("Similar to '{query}'"), &recs);

    let start = Instant::now();
    let collaborative = NeighborhoodPredictor::new(catalog.clone());
    println!("Built rating matrix in {:?}", start.elapsed());
    let start = Instant::now();
    let recs = collaborative.recommend(user_id, 10, DEFAULT_K);
    println!("Collaborative in {:?}", start.elapsed());
    print_top(&format!("Predicted for user {user_id}"), &recs);

    Ok(())
}
