mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use data_loader::{Catalog, UserId};
use hybrid::{HybridBlender, HybridWeights, RecommendParams, Strategy};
use recommenders::Recommendation;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// MyNextMovie - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "mynextmovie")]
#[command(about = "Movie recommendations by popularity, genre similarity and similar users", long_about = None)]
struct Cli {
    /// Directory containing movies.csv and ratings.csv (overrides MYNEXTMOVIE_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Best-rated movies, optionally within a genre
    Popularity {
        /// Genre text to match (case-insensitive substring); all genres if omitted
        #[arg(long, default_value = "")]
        genre: String,

        /// Minimum number of ratings a movie needs
        #[arg(long, default_value = "20")]
        min_reviews: u32,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Movies with the most similar genres to a given movie
    Content {
        /// Movie title to look up (exact match first, then substring)
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Movies predicted from users with similar ratings
    Collaborative {
        #[arg(long)]
        user_id: UserId,

        #[arg(long, default_value = "10")]
        limit: usize,

        /// Number of similar users to consult (overrides MYNEXTMOVIE_K_NEIGHBORS)
        #[arg(long)]
        k: Option<usize>,
    },

    /// Collaborative and popularity results blended by weight
    Hybrid {
        #[arg(long)]
        user_id: UserId,

        #[arg(long, default_value = "10")]
        limit: usize,

        #[arg(long)]
        collaborative_weight: Option<f32>,

        #[arg(long)]
        popularity_weight: Option<f32>,
    },

    /// Dataset statistics and validation report
    Summary,

    /// List every genre in the catalog
    Genres,

    /// Run each strategy once with sample inputs
    Demo {
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());

    // Load catalog (this may take a moment)
    if !cli.json {
        println!("Loading dataset from {}...", data_dir.display());
    }
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_dir(&data_dir).context("Failed to load movie dataset")?,
    );
    let (users, movies, ratings) = catalog.counts();
    info!(movies, users, ratings, elapsed = ?start.elapsed(), "Catalog ready");
    if !cli.json {
        println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());
    }

    match cli.command {
        Commands::Popularity {
            genre,
            min_reviews,
            limit,
        } => {
            let params = RecommendParams {
                genre: Some(genre),
                min_reviews: Some(min_reviews),
                limit: Some(limit),
                ..Default::default()
            };
            handle_dispatch(catalog, &config, Strategy::Popularity, &params, cli.json)?
        }
        Commands::Content { title, limit } => {
            let params = RecommendParams {
                movie_title: Some(title),
                limit: Some(limit),
                ..Default::default()
            };
            handle_dispatch(catalog, &config, Strategy::Content, &params, cli.json)?
        }
        Commands::Collaborative { user_id, limit, k } => {
            let params = RecommendParams {
                user_id: Some(user_id),
                limit: Some(limit),
                k: Some(k.unwrap_or(config.k_neighbors)),
                ..Default::default()
            };
            handle_dispatch(catalog, &config, Strategy::Collaborative, &params, cli.json)?
        }
        Commands::Hybrid {
            user_id,
            limit,
            collaborative_weight,
            popularity_weight,
        } => {
            let weights = HybridWeights {
                collaborative: collaborative_weight.unwrap_or(config.collaborative_weight),
                popularity: popularity_weight.unwrap_or(config.popularity_weight),
            };
            handle_hybrid(catalog, &config, user_id, limit, weights, cli.json)?
        }
        Commands::Summary => handle_summary(&catalog, cli.json)?,
        Commands::Genres => handle_genres(&catalog, cli.json)?,
        Commands::Demo { limit } => handle_demo(catalog, &config, limit)?,
    }

    Ok(())
}

fn build_blender(catalog: Arc<Catalog>, config: &Config) -> HybridBlender {
    HybridBlender::new(catalog).with_k_neighbors(config.k_neighbors)
}

/// Handle the popularity, content and collaborative commands
fn handle_dispatch(
    catalog: Arc<Catalog>,
    config: &Config,
    strategy: Strategy,
    params: &RecommendParams,
    json: bool,
) -> Result<()> {
    let blender = build_blender(catalog, config);
    let recommendations = blender
        .recommend_with(strategy, params)
        .with_context(|| format!("Invalid {} request", strategy))?;
    if recommendations.is_empty() {
        info!("{} request matched no movies", strategy);
    }

    if json {
        print_json(&recommendations)?;
    } else {
        print_recommendations(&format!("{} recommendations", strategy), &recommendations);
    }
    Ok(())
}

/// Handle the 'hybrid' command
fn handle_hybrid(
    catalog: Arc<Catalog>,
    config: &Config,
    user_id: UserId,
    limit: usize,
    weights: HybridWeights,
    json: bool,
) -> Result<()> {
    let blender = build_blender(catalog, config);
    let recommendations = blender.combine(user_id, limit, weights);

    if json {
        print_json(&recommendations)?;
    } else {
        print_recommendations(
            &format!("Hybrid recommendations for user {}", user_id),
            &recommendations,
        );
    }
    Ok(())
}

/// Handle the 'summary' command
fn handle_summary(catalog: &Catalog, json: bool) -> Result<()> {
    let summary = catalog.summary();
    let report = catalog.validate();

    if json {
        return print_json(&serde_json::json!({
            "summary": summary,
            "validation": report,
        }));
    }

    let fmt_rating = |value: Option<f32>| {
        value
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "n/a".to_string())
    };

    println!("{}", "Dataset Summary:".bold().blue());
    println!("{}Movies: {}", "• ".green(), summary.total_movies);
    println!("{}Users: {}", "• ".green(), summary.total_users);
    println!("{}Ratings: {}", "• ".green(), summary.total_ratings);
    println!(
        "{}Rating mean/min/max: {} / {} / {}",
        "• ".cyan(),
        fmt_rating(summary.average_rating),
        fmt_rating(summary.min_rating),
        fmt_rating(summary.max_rating)
    );
    println!("{}Genres: {}", "• ".cyan(), summary.unique_genres);
    println!("{}Sparsity: {:.4}%", "• ".cyan(), summary.sparsity);

    println!("{}", "Validation:".bold().blue());
    if report.valid {
        println!("{}All required columns present", "✓ ".green());
    } else {
        for column in &report.missing_movie_columns {
            println!("{}movies.csv is missing '{}'", "✗ ".red(), column);
        }
        for column in &report.missing_rating_columns {
            println!("{}ratings.csv is missing '{}'", "✗ ".red(), column);
        }
    }
    for warning in &report.warnings {
        println!("{}{:?}", "! ".yellow(), warning);
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(catalog: &Catalog, json: bool) -> Result<()> {
    let genres = catalog.genre_vocabulary();
    if json {
        return print_json(&genres);
    }

    println!("{}", format!("{} genres:", genres.len()).bold().blue());
    for genre in genres {
        println!("  - {}", genre);
    }
    Ok(())
}

/// Handle the 'demo' command
fn handle_demo(catalog: Arc<Catalog>, config: &Config, limit: usize) -> Result<()> {
    let user_id = catalog.user_ids().first().copied();
    let title = catalog.movies().first().map(|m| m.title.clone());
    let blender = build_blender(catalog, config);

    let start = Instant::now();
    let recs = blender.popularity().recommend(None, 20, limit);
    print_recommendations("Most popular (20+ ratings)", &recs);
    println!("  took {:.2?}\n", start.elapsed());

    match title {
        Some(title) => {
            let start = Instant::now();
            let recs = blender.content().recommend(&title, limit);
            print_recommendations(&format!("Similar to '{}'", title), &recs);
            println!("  took {:.2?}\n", start.elapsed());
        }
        None => println!("{}", "No movies to run a content query against".yellow()),
    }

    match user_id {
        Some(user_id) => {
            let start = Instant::now();
            let recs = blender
                .collaborative()
                .recommend(user_id, limit, config.k_neighbors);
            print_recommendations(&format!("Predicted for user {}", user_id), &recs);
            println!("  took {:.2?}\n", start.elapsed());

            let weights = HybridWeights {
                collaborative: config.collaborative_weight,
                popularity: config.popularity_weight,
            };
            let start = Instant::now();
            let recs = blender.combine(user_id, limit, weights);
            print_recommendations(&format!("Hybrid for user {}", user_id), &recs);
            println!("  took {:.2?}", start.elapsed());
        }
        None => println!("{}", "No ratings to run a user query against".yellow()),
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(header: &str, recommendations: &[Recommendation]) {
    println!("{}", format!("{}:", header).bold().blue());
    if recommendations.is_empty() {
        println!("  {}", "No movies matched".yellow());
        return;
    }

    for rec in recommendations {
        let year = rec
            .year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        let genres = rec.genres.replace('|', ", ");
        println!(
            "{}. {}{} [{}] - avg {:.2} from {} ratings - score {:.3}",
            rec.rank.to_string().green(),
            rec.title,
            year,
            genres,
            rec.avg_rating,
            rec.rating_count,
            rec.score
        );
    }
}
