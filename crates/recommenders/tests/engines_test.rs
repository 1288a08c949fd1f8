//! Integration tests for the engines.
//!
//! Each test writes a small dataset to a temporary directory, loads it the
//! way the binary does, and runs an engine over it.

use data_loader::Catalog;
use recommenders::{
    ContentSimilarityEngine, NeighborhoodPredictor, PopularityRanker, RecommendationSource,
};
use std::fmt::Write as _;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn load(movies_csv: &str, ratings_csv: &str) -> anyhow::Result<(TempDir, Arc<Catalog>)> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("movies.csv"), movies_csv)?;
    fs::write(dir.path().join("ratings.csv"), ratings_csv)?;
    let catalog = Catalog::load_from_dir(dir.path())?;
    Ok((dir, Arc::new(catalog)))
}

fn repeated(user_id: u32, movie_id: u32, rating: f32, times: usize) -> String {
    let mut out = String::new();
    for _ in 0..times {
        let _ = writeln!(out, "{user_id},{movie_id},{rating},978300760");
    }
    out
}

fn sample_dataset() -> anyhow::Result<(TempDir, Arc<Catalog>)> {
    let movies = "movieId,title,genres\n\
                  1,Toy Story (1995),Adventure|Animation|Children|Comedy\n\
                  2,Jumanji (1995),Adventure|Children|Fantasy\n\
                  3,Grumpier Old Men (1995),Comedy|Romance\n\
                  4,Waiting to Exhale (1995),Comedy|Drama|Romance\n\
                  5,Heat (1995),Action|Crime|Thriller\n\
                  6,Sabrina (1995),Comedy|Romance\n";
    let ratings = "userId,movieId,rating,timestamp\n\
                   1,1,5.0,964982703\n\
                   1,3,4.0,964981247\n\
                   1,5,2.0,964982224\n\
                   2,1,4.5,964983815\n\
                   2,3,4.0,964982931\n\
                   2,6,5.0,964982400\n\
                   3,1,1.0,964982176\n\
                   3,2,4.0,964984041\n\
                   3,5,5.0,964982653\n\
                   4,4,3.0,964982546\n\
                   4,6,3.5,964980868\n";
    load(movies, ratings)
}

#[test]
fn test_popularity_review_floor() -> anyhow::Result<()> {
    let mut ratings = String::from("userId,movieId,rating,timestamp\n");
    ratings.push_str(&repeated(1, 1, 5.0, 100));
    ratings.push_str(&repeated(1, 2, 3.0, 10));
    let (_dir, catalog) = load(
        "movieId,title,genres\n1,A (2020),Action\n2,B (2019),Action\n",
        &ratings,
    )?;

    let recs = PopularityRanker::new(catalog).recommend(Some("Action"), 50, 5);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].movie_id, 1);
    assert_eq!(recs[0].title, "A");
    assert_eq!(recs[0].year, Some(2020));
    assert_eq!(recs[0].rating_count, 100);
    Ok(())
}

#[test]
fn test_popularity_properties() -> anyhow::Result<()> {
    let (_dir, catalog) = sample_dataset()?;
    let ranker = PopularityRanker::new(catalog);

    for (genre, floor) in [(None, 0), (Some("comedy"), 1), (Some("Rom"), 2), (Some("x"), 0)] {
        let recs = ranker.recommend(genre, floor, 10);
        for rec in &recs {
            assert!(rec.rating_count >= floor);
            if let Some(genre) = genre {
                assert!(rec.genres.to_lowercase().contains(&genre.to_lowercase()));
            }
            assert_eq!(rec.source, RecommendationSource::Popularity);
        }
        for pair in recs.windows(2) {
            assert!(pair[0].avg_rating >= pair[1].avg_rating);
            if pair[0].avg_rating == pair[1].avg_rating {
                assert!(pair[0].rating_count >= pair[1].rating_count);
            }
        }
    }
    Ok(())
}

#[test]
fn test_content_matching_genres() -> anyhow::Result<()> {
    let (_dir, catalog) = sample_dataset()?;
    let engine = ContentSimilarityEngine::new(catalog);

    let recs = engine.recommend("Grumpier Old Men (1995)", 1);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].movie_id, 6);
    assert!((recs[0].score - 1.0).abs() < 1e-6);

    let recs = engine.recommend("sabrina", 10);
    assert!(recs.iter().all(|r| r.title != "Sabrina"));
    assert_eq!(recs.len(), 5);
    Ok(())
}

#[test]
fn test_collaborative_excludes_rated() -> anyhow::Result<()> {
    let (_dir, catalog) = sample_dataset()?;
    let predictor = NeighborhoodPredictor::new(catalog.clone());

    for user_id in catalog.user_ids() {
        let rated: Vec<_> = catalog
            .get_user_ratings(user_id)
            .iter()
            .map(|r| r.movie_id)
            .collect();
        for rec in predictor.recommend(user_id, 10, 3) {
            assert!(!rated.contains(&rec.movie_id));
            assert_eq!(rec.source, RecommendationSource::Collaborative);
        }
    }

    assert!(predictor.recommend(999, 10, 3).is_empty());
    Ok(())
}

#[test]
fn test_collaborative_similar_user() -> anyhow::Result<()> {
    let (_dir, catalog) = load(
        "movieId,title,genres\n1,First (2001),Drama\n2,Second (2002),Drama\n",
        "userId,movieId,rating,timestamp\n1,1,5.0,0\n2,1,5.0,0\n2,2,5.0,0\n",
    )?;

    let recs = NeighborhoodPredictor::new(catalog).recommend(1, 1, 5);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].movie_id, 2);
    assert_eq!(recs[0].title, "Second");
    Ok(())
}
