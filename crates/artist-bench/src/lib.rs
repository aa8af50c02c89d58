//! # LittleArtist Bench
//!
//! Timing harness and fixture markup for the outline engine.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use artist_bench::Benchmark;
//!
//! let suite = Benchmark::new().run_all();
//! suite.print_summary();
//! ```
//!
//! Criterion benchmarks live in `benches/outline.rs` and share the
//! generators below.

use artist_outline::{combined_fill_region, scan, Point, TemplateMask, Viewport};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Benchmark errors.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single benchmark result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub iterations: u64,
    /// Mean time per iteration in nanoseconds.
    pub mean_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
}

impl BenchmarkResult {
    pub fn from_samples(name: impl Into<String>, samples: &[Duration]) -> Self {
        let times_ns: Vec<u64> = samples.iter().map(|d| d.as_nanos() as u64).collect();
        let iterations = times_ns.len() as u64;
        let total: u64 = times_ns.iter().sum();

        Self {
            name: name.into(),
            iterations,
            mean_ns: total.checked_div(iterations).unwrap_or(0),
            min_ns: times_ns.iter().copied().min().unwrap_or(0),
            max_ns: times_ns.iter().copied().max().unwrap_or(0),
        }
    }

    pub fn print_line(&self) {
        println!(
            "{:32} {:>12} {:>12} {:>12}",
            self.name,
            format_duration(self.mean_ns),
            format_duration(self.min_ns),
            format_duration(self.max_ns),
        );
    }
}

fn format_duration(ns: u64) -> String {
    if ns >= 1_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else if ns >= 1_000 {
        format!("{:.2} µs", ns as f64 / 1_000.0)
    } else {
        format!("{} ns", ns)
    }
}

/// Collection of benchmark results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub results: Vec<BenchmarkResult>,
    pub total_time: Duration,
}

impl BenchmarkSuite {
    pub fn print_summary(&self) {
        println!("{:32} {:>12} {:>12} {:>12}", "Name", "Mean", "Min", "Max");
        println!("{}", "-".repeat(72));
        for result in &self.results {
            result.print_line();
        }
        println!("Total time: {:?}", self.total_time);
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), BenchError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Simple timing loop for quick comparisons outside criterion.
pub struct Benchmark {
    pub warmup: u64,
    pub iterations: u64,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark {
    pub fn new() -> Self {
        Self {
            warmup: 10,
            iterations: 100,
        }
    }

    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn run<F: FnMut()>(&self, name: &str, mut f: F) -> BenchmarkResult {
        debug!(name, iterations = self.iterations, "running benchmark");
        for _ in 0..self.warmup {
            f();
        }
        let samples: Vec<Duration> = (0..self.iterations)
            .map(|_| {
                let start = Instant::now();
                f();
                start.elapsed()
            })
            .collect();
        BenchmarkResult::from_samples(name, &samples)
    }

    /// Scan, fill region and hit test on a small and a large document.
    pub fn run_all(&self) -> BenchmarkSuite {
        let start = Instant::now();
        let mut suite = BenchmarkSuite::default();

        for (label, doc) in [("small", generate_markup(6)), ("large", generate_markup(120))] {
            suite.results.push(self.run(&format!("scan/{label}"), || {
                black_box(scan(black_box(&doc)));
            }));
            suite.results.push(self.run(&format!("fill_region/{label}"), || {
                black_box(combined_fill_region(black_box(&doc)));
            }));

            let mask = match Viewport::new(800.0, 600.0) {
                Ok(vp) => TemplateMask::new(&doc, vp),
                Err(_) => continue,
            };
            suite.results.push(self.run(&format!("hit_test/{label}"), || {
                black_box(mask.allows(black_box(Point::new(400.0, 300.0))));
            }));
        }

        suite.total_time = start.elapsed();
        suite
    }
}

/// Markup with `n` elements cycling through every supported tag.
pub fn generate_markup(n: usize) -> String {
    let mut doc = String::new();
    for i in 0..n {
        let o = (i % 20) as f32 * 10.0;
        let tag = match i % 6 {
            0 => format!(r#"<circle cx="{}" cy="{}" r="30" stroke-width="4"/>"#, 100.0 + o, 120.0 + o),
            1 => format!(r#"<rect x="{}" y="{}" width="80" height="60"/>"#, 40.0 + o, 200.0 - o),
            2 => format!(r#"<ellipse cx="200" cy="{}" rx="90" ry="40"/>"#, 200.0 + o),
            3 => format!(r#"<line x1="20" y1="{0}" x2="380" y2="{0}" stroke-width="2"/>"#, 380.0 - o),
            4 => format!(r#"<polygon points="{0},100 {1},40 {2},100" stroke-width="6"/>"#, 100.0 + o, 150.0 + o, 200.0 + o),
            _ => format!(r#"<path d="M{0} 300 C{0} 250 {1} 250 {1} 300 Q{2} 340 {0} 300 Z"/>"#, 60.0 + o, 160.0 + o, 110.0 + o),
        };
        doc.push_str(&tag);
        doc.push('\n');
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_markup_scans_fully() {
        let doc = generate_markup(12);
        assert_eq!(scan(&doc).len(), 12);
    }

    #[test]
    fn test_benchmark_result() {
        let samples = vec![
            Duration::from_micros(100),
            Duration::from_micros(120),
            Duration::from_micros(90),
        ];
        let result = BenchmarkResult::from_samples("test", &samples);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.min_ns, 90_000);
        assert_eq!(result.max_ns, 120_000);
        assert!(BenchmarkResult::from_samples("empty", &[]).mean_ns == 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(500), "500 ns");
        assert_eq!(format_duration(1_500), "1.50 µs");
        assert_eq!(format_duration(1_500_000), "1.50 ms");
    }

    #[test]
    fn test_run_all_and_save() {
        let suite = Benchmark::new().with_iterations(2).run_all();
        assert_eq!(suite.results.len(), 6);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        suite.save_json(&path).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("scan/small"));
    }
}
