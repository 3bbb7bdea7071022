use serde::{Deserialize, Serialize};

use crate::config::SimParams;
use crate::stats::HistorySnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Default for MetricSummary {
    fn default() -> Self {
        Self {
            count: 0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            p50: 0.0,
            p90: 0.0,
            p95: 0.0,
            p99: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricAggregator {
    samples: Vec<f64>,
    sum: f64,
    min: f64,
    max: f64,
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.samples.push(value);
    }

    /// Percentage of samples at or below `threshold`.
    pub fn pct_leq(&self, threshold: f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let hits = self.samples.iter().filter(|v| **v <= threshold).count();
        (hits as f64 / self.samples.len() as f64) * 100.0
    }

    pub fn summary(&self) -> MetricSummary {
        if self.samples.is_empty() {
            return MetricSummary::default();
        }

        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        MetricSummary {
            count: self.samples.len(),
            min: self.min,
            max: self.max,
            mean: self.sum / self.samples.len() as f64,
            p50: percentile_nearest_rank(&sorted, 0.50),
            p90: percentile_nearest_rank(&sorted, 0.90),
            p95: percentile_nearest_rank(&sorted, 0.95),
            p99: percentile_nearest_rank(&sorted, 0.99),
        }
    }
}

fn percentile_nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let rank = ((p * sorted.len() as f64).ceil() as usize).saturating_sub(1);
    sorted[rank.min(sorted.len() - 1)]
}

/// Summary of one headless run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub ticks: u64,
    pub founders: usize,
    pub params: SimParams,
    pub final_population: usize,
    pub final_food: usize,
    /// Share of sampled seconds with no creatures alive, in percent.
    pub extinct_pct: f64,
    pub population: MetricSummary,
    pub avg_speed: MetricSummary,
    pub avg_size: MetricSummary,
    pub history: Vec<HistorySnapshot>,
}

/// Aggregate the per-second series of a run.
pub fn summarize_history(history: &[HistorySnapshot]) -> (MetricSummary, MetricSummary, MetricSummary, f64) {
    let mut population = MetricAggregator::new();
    let mut speed = MetricAggregator::new();
    let mut size = MetricAggregator::new();
    for point in history {
        population.push(point.population as f64);
        if point.population > 0 {
            speed.push(point.avg_speed as f64);
            size.push(point.avg_size as f64);
        }
    }
    (
        population.summary(),
        speed.summary(),
        size.summary(),
        population.pct_leq(0.0),
    )
}
