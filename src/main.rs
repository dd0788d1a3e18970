//! Command-line driver for the grid DBSCAN clusterer.
//!
//! Reads `x,y` points from a CSV file (or generates synthetic spatiotemporal
//! data), clusters them, prints a summary, and optionally writes an
//! `x,y,label` CSV for plotting.

use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use rand::distributions::Uniform;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use grid_dbscan::{Dbscan, DbscanParams, DbscanResult, Point, PointList};

#[cfg(test)]
mod main_test;

#[derive(Parser)]
#[command(name = "grid-dbscan")]
#[command(about = "Parallel grid-based DBSCAN point clusterer", long_about = None)]
struct Args {
    /// Input CSV file with x,y columns; synthetic data is generated when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV file with x,y,label rows
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Neighborhood radius along dimension 0 (space)
    #[arg(long, default_value_t = 0.6)]
    eps_x: f64,

    /// Neighborhood radius along dimension 1 (time)
    #[arg(long, default_value_t = 0.6)]
    eps_y: f64,

    /// Minimum neighbor count for a core point
    #[arg(short = 'm', long, default_value_t = 100)]
    min_pts: usize,

    /// Worker threads; defaults to the available parallelism
    #[arg(short, long)]
    threads: Option<usize>,

    /// Number of synthetic points when no input file is given
    #[arg(short = 'n', long, default_value_t = 100_000)]
    points: usize,

    /// Seed for synthetic data generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print phase timings and generation details
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let points = match &args.input {
        Some(input) => match read_points(input) {
            Ok(points) => points,
            Err(e) => {
                eprintln!("Error reading CSV: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            if args.debug {
                println!("Generating {} synthetic spatiotemporal points", args.points);
            }
            generate_points(args.points, args.seed)
        }
    };

    if points.is_empty() {
        eprintln!("No points to cluster");
        std::process::exit(1);
    }

    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    if args.debug {
        println!(
            "Running DBSCAN on {} points with eps=({}, {}), min_pts={}, threads={}",
            points.len(),
            args.eps_x,
            args.eps_y,
            args.min_pts,
            threads
        );
    }

    let dbscan = match Dbscan::new(DbscanParams {
        eps: [args.eps_x, args.eps_y],
        min_pts: args.min_pts,
        n_threads: threads,
    }) {
        Ok(dbscan) => dbscan,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let dbscan = if args.debug {
        dbscan.with_observer(|phase, elapsed| {
            println!("\t{} : {:.2} ms", phase, elapsed.as_secs_f64() * 1000.0);
        })
    } else {
        dbscan
    };

    let start = Instant::now();
    let result = match dbscan.cluster(&points) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    print_results(&result, elapsed_ms);

    if let Some(output) = &args.output {
        if let Err(e) = write_labeled_csv(output, &points, &result) {
            eprintln!("Error writing CSV: {}", e);
            std::process::exit(1);
        }
        println!("Exported results to: {}", output.display());
    }
}

/// Reads points from a CSV file with `x,y` columns.
///
/// Rows whose first two fields do not parse as numbers (e.g. a header row)
/// are skipped.
fn read_points(filename: &Path) -> Result<PointList, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);

    let mut points = PointList::new();
    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            continue;
        }
        let x = record[0].trim().parse::<f64>();
        let y = record[1].trim().parse::<f64>();
        if let (Ok(x), Ok(y)) = (x, y) {
            points.push(Point([x, y]));
        }
    }

    Ok(points)
}

/// Generates clustered spatiotemporal test data with 50% background noise.
///
/// Dimension 0 is a space coordinate, dimension 1 a time coordinate. Half
/// the points fall in three Gaussian clusters; the rest are uniform noise
/// over the surrounding space-time box.
fn generate_points(n_points: usize, seed: u64) -> PointList {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let space_dist = Normal::new(0.0, 5.0).expect("finite stddev");
    let time_dist = Normal::new(0.0, 2.0).expect("finite stddev");
    let noise_space = Uniform::new(-20.0, 120.0);
    let noise_time = Uniform::new(-10.0, 110.0);

    // Each cluster represents events at a different location and time
    let centers = [[0.0, 10.0], [50.0, 50.0], [100.0, 90.0]];

    let n_noise = n_points / 2;
    let n_cluster_points = n_points - n_noise;

    let mut points = PointList::with_capacity(n_points);
    for i in 0..n_cluster_points {
        let center = centers[i % centers.len()];
        points.push(Point([
            center[0] + space_dist.sample(&mut rng),
            center[1] + time_dist.sample(&mut rng),
        ]));
    }
    for _ in 0..n_noise {
        points.push(Point([
            noise_space.sample(&mut rng),
            noise_time.sample(&mut rng),
        ]));
    }

    points
}

/// Prints the clustering summary with per-cluster sizes.
fn print_results(result: &DbscanResult, elapsed_ms: f64) {
    println!("Execution time: {:.2} ms", elapsed_ms);
    println!("Number of clusters: {}", result.n_clusters);
    println!("Noise points: {}", result.n_noise);

    if result.n_clusters > 0 {
        let sizes = cluster_sizes(result);
        println!("Cluster sizes:");
        for (c, size) in sizes.iter().enumerate() {
            println!("  Cluster {}: {} points", c, size);
        }
    }
}

/// Counts the points assigned to each cluster id.
fn cluster_sizes(result: &DbscanResult) -> Vec<usize> {
    let mut sizes = vec![0usize; result.n_clusters];
    for &label in &result.labels {
        if label >= 0 {
            sizes[label as usize] += 1;
        }
    }
    sizes
}

/// Writes one `x,y,label` row per point.
fn write_labeled_csv(
    output: &Path,
    points: &[Point],
    result: &DbscanResult,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(output)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    writer.write_record(["x", "y", "label"])?;
    for (point, &label) in points.iter().zip(&result.labels) {
        writer.write_record(&[
            point.0[0].to_string(),
            point.0[1].to_string(),
            label.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
