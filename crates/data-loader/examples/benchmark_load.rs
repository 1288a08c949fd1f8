use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/raw");

    println!("Loading movies and ratings from {}...\n", data_dir.display());

    let start = Instant::now();
    let catalog = Catalog::load_from_dir(data_dir).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let summary = catalog.summary();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", summary.total_users);
    println!("Movies: {}", summary.total_movies);
    println!("Ratings: {}", summary.total_ratings);
    println!("Genres: {}", summary.unique_genres);
    println!("Sparsity: {:.3}%", summary.sparsity);
    println!(
        "\nPerformance: {:.0} ratings/second",
        summary.total_ratings as f64 / elapsed.as_secs_f64()
    );
}
