//! Throughput benchmark comparing the serial and parallel sparse engines

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use life_engine::{Algorithm, Grid, RuleSet};

const SIZES: [usize; 6] = [50, 100, 200, 500, 1000, 2000];
const DENSITIES: [f32; 3] = [0.05, 0.3, 0.6];
const ITERATIONS: u32 = 20;

/// Mean milliseconds per generation
fn benchmark(algorithm: Algorithm, start: &Grid, iterations: u32) -> f64 {
    let engine = algorithm.engine();
    let mut grid = start.clone();

    let timer = Instant::now();
    for _ in 0..iterations {
        grid = engine.next_generation(&grid, &RuleSet::CONWAY, true);
    }
    timer.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(iterations = ITERATIONS, "starting engine benchmark");
    println!("=== Game of Life Engine Benchmark ===\n");
    println!(
        "{:>11} {:>8} {:>10} {:>12} {:>12} {:>9}",
        "Size", "Density", "Alive", "Sparse", "Sparse+Par", "Speedup"
    );
    println!("{:-<67}", "");

    // Fixed seed so both engines see the same boards run to run
    let mut rng = StdRng::seed_from_u64(0x11FE);

    for size in SIZES {
        for density in DENSITIES {
            let grid = Grid::randomized_with(&mut rng, size, size, density);
            let serial_ms = benchmark(Algorithm::Sparse, &grid, ITERATIONS);
            let parallel_ms = benchmark(Algorithm::SparseParallel, &grid, ITERATIONS);

            println!(
                "{:>11} {:>8.2} {:>10} {:>12.3} {:>12.3} {:>8.1}x",
                format!("{size}x{size}"),
                density,
                grid.count_alive(),
                serial_ms,
                parallel_ms,
                serial_ms / parallel_ms.max(f64::EPSILON),
            );
        }
    }

    println!("\n=== Throughput at 2000x2000, density 0.30 ===\n");
    let grid = Grid::randomized_with(&mut rng, 2000, 2000, 0.3);
    for algorithm in Algorithm::all() {
        let ms = benchmark(algorithm, &grid, ITERATIONS);
        let cells = (2000 * 2000) as f64;
        println!(
            "{:<12} {:>8.2} ms/gen, {:>7.1}M cells/sec",
            algorithm.name(),
            ms,
            cells / (ms / 1000.0) / 1_000_000.0
        );
    }
}
