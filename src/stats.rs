//! Population statistics: per-tick metrics plus a once-per-second history.
use serde::{Deserialize, Serialize};

use crate::config;
use crate::creature::Creature;

/// Fixed-capacity window of recent samples; backs the on-screen `TraitChart` series.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: vec![0.0; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Return samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.len < self.capacity {
            0
        } else {
            self.head
        };
        (0..self.len).map(move |i| self.data[(start + i) % self.capacity])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            let idx = (self.head + self.capacity - 1) % self.capacity;
            Some(self.data[idx])
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

/// Metrics of the live population after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TickStats {
    /// Simulated seconds.
    pub time: u64,
    pub population: usize,
    pub food_count: usize,
    pub avg_speed: f32,
    pub avg_size: f32,
}

/// One point of the per-second time series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub time: u64,
    pub population: usize,
    pub avg_speed: f32,
    pub avg_size: f32,
}

/// Receiver of history points, e.g. a line chart.
pub trait ChartSink {
    fn append_point(&mut self, point: &HistorySnapshot);
    fn clear_all(&mut self);
}

impl ChartSink for Vec<HistorySnapshot> {
    fn append_point(&mut self, point: &HistorySnapshot) {
        self.push(*point);
    }

    fn clear_all(&mut self) {
        self.clear();
    }
}

#[derive(Default)]
pub struct SimStats {
    pub current: TickStats,
    history: Vec<HistorySnapshot>,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the current metrics without touching the history.
    pub fn refresh(&mut self, tick: u64, creatures: &[Creature], food_count: usize) {
        let (avg_speed, avg_size) = trait_means(creatures);
        self.current = TickStats {
            time: tick / config::TICKS_PER_SECOND,
            population: creatures.len(),
            food_count,
            avg_speed,
            avg_size,
        };
    }

    /// Recompute metrics for `tick` (already incremented). On whole simulated
    /// seconds a snapshot is appended to the history and returned.
    pub fn record(
        &mut self,
        tick: u64,
        creatures: &[Creature],
        food_count: usize,
    ) -> Option<HistorySnapshot> {
        self.refresh(tick, creatures, food_count);
        let current = self.current;
        if current.time == 0 || tick % config::TICKS_PER_SECOND != 0 {
            return None;
        }
        let snapshot = HistorySnapshot {
            time: current.time,
            population: current.population,
            avg_speed: current.avg_speed,
            avg_size: current.avg_size,
        };
        self.history.push(snapshot);
        Some(snapshot)
    }

    pub fn history(&self) -> &[HistorySnapshot] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.current = TickStats::default();
        self.history.clear();
    }
}

/// Mean speed and size; zeros for an empty population.
pub fn trait_means(creatures: &[Creature]) -> (f32, f32) {
    if creatures.is_empty() {
        return (0.0, 0.0);
    }
    let n = creatures.len() as f32;
    let speed: f32 = creatures.iter().map(|c| c.speed).sum();
    let size: f32 = creatures.iter().map(|c| c.size).sum();
    (speed / n, size / n)
}
