//! Control surface shared by the window host and the headless report.

use macroquad::prelude::*;
use tracing::{debug, info};

use crate::config;
use crate::drive::{DriveHandle, Driver};
use crate::simulation::SimState;
use crate::stats::ChartSink;

pub struct Controller<C: ChartSink> {
    sim: SimState,
    driver: Driver,
    drive: Option<DriveHandle>,
    chart: C,
}

impl<C: ChartSink> Controller<C> {
    pub fn new(sim: SimState, chart: C) -> Self {
        Self {
            sim,
            driver: Driver::new(),
            drive: None,
            chart,
        }
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn is_driving(&self) -> bool {
        self.drive.is_some() && self.driver.is_scheduled()
    }

    pub fn start(&mut self) {
        if self.is_running() && self.is_driving() {
            return;
        }
        self.cancel_drive();
        self.sim.set_running(true);
        let handle = self.driver.schedule();
        info!(
            tick = self.sim.tick_count(),
            drive = handle.generation(),
            population = self.sim.creatures().len(),
            "simulation started"
        );
        self.drive = Some(handle);
    }

    /// Halt stepping; world state is kept.
    pub fn stop(&mut self) {
        self.sim.set_running(false);
        if self.cancel_drive() {
            info!(tick = self.sim.tick_count(), "simulation stopped");
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.cancel_drive();
        self.sim.reset();
        self.chart.clear_all();
        info!("simulation reset");
    }

    pub fn spawn_at(&mut self, pos: Vec2, count: usize) {
        self.sim.spawn_at(pos.x, pos.y, count);
        debug!(x = pos.x, y = pos.y, count, "spawned founders");
    }

    pub fn spawn_cluster(&mut self, pos: Vec2) {
        self.spawn_at(pos, config::SPAWN_CLUSTER_SIZE);
    }

    pub fn set_food_spawn_rate(&mut self, rate: u32) {
        let applied = self.sim.params.set_food_spawn_rate(rate);
        if applied != rate {
            info!(requested = rate, applied, "food spawn rate clamped");
        }
    }

    pub fn set_mutation_rate(&mut self, rate: f32) {
        let applied = self.sim.params.set_mutation_rate(rate);
        if applied != rate {
            info!(requested = rate, applied, "mutation rate clamped");
        }
    }

    /// Run the ticks owed for one host frame and forward history points to the chart.
    pub fn frame(&mut self, frame_time: f64) -> u32 {
        let chart = &mut self.chart;
        self.driver.advance(&mut self.sim, frame_time, |outcome| {
            if let Some(point) = &outcome.snapshot {
                chart.append_point(point);
            }
        })
    }

    /// Step exactly once if running, bypassing the frame clock.
    pub fn step_once(&mut self) {
        let outcome = self.sim.step();
        if let Some(point) = &outcome.snapshot {
            self.chart.append_point(point);
        }
    }

    /// Cancel any pending drive, clear the chart and drop all state.
    pub fn teardown(&mut self) {
        self.cancel_drive();
        self.sim.reset();
        self.chart.clear_all();
        debug!("controller torn down");
    }

    fn cancel_drive(&mut self) -> bool {
        match self.drive.take() {
            Some(handle) => self.driver.cancel(handle),
            None => false,
        }
    }
}

impl<C: ChartSink> Drop for Controller<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
