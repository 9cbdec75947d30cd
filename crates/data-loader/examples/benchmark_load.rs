use data_loader::load_from_dir;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading FilmForge data...\n");

    let start = Instant::now();
    let dataset = load_from_dir(data_dir).expect("Failed to load data directory");
    let elapsed = start.elapsed();

    let (movies, users, views) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Users: {}", users);
    println!("Views: {}", views);
    println!(
        "\nPerformance: {:.0} records/second",
        (movies + users + views) as f64 / elapsed.as_secs_f64()
    );
}
