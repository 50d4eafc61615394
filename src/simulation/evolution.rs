//! Generational evolution engine.
//!
//! The engine owns the population of a generation and runs it through a
//! bounded active window. Every retired vehicle leaves its fitness and genome
//! in the archive; once the whole population has been archived the engine
//! builds a fitness-weighted gene pool, breeds the next population and
//! respawns it at the starting point.

use rand::Rng;
use rayon::prelude::*;

use super::brain::Brain;
use super::error::{Result, SimulationError};
use super::params::{Params, SelectionPolicy};
use super::render::RenderFrame;
use super::track::Track;
use super::vehicle::{EliminationCause, StepOutcome, Vehicle};

/// Generation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A fresh population waits to enter its first window.
    Populating,
    /// Windows of vehicles are being simulated.
    Running,
    /// The archive is being turned into the next population.
    Advancing,
}

/// Why a vehicle was moved into the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireReason {
    /// Wall collision or stall timeout.
    Eliminated(EliminationCause),
    /// Every other vehicle in the window was done and this one had finished the course.
    CourseCompleted,
    /// The window ran longer than `max_window_seconds`.
    WindowTimeLimit,
}

/// Fitness and genome of a retired vehicle.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Id of the retired vehicle.
    pub vehicle_id: usize,
    /// Fitness at retirement.
    pub fitness: f32,
    /// Whether the vehicle had cleared the final checkpoint.
    pub finished: bool,
    /// Why it was retired.
    pub reason: RetireReason,
    /// The vehicle's controller genome.
    pub brain: Brain,
}

/// Fitness statistics of a completed generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Generation number, starting at 0.
    pub generation: u32,
    /// Highest fitness in the archive.
    pub best_fitness: f32,
    /// Mean fitness over the archive.
    pub mean_fitness: f32,
    /// Lowest fitness in the archive.
    pub worst_fitness: f32,
    /// Vehicles that cleared the final checkpoint.
    pub completed: usize,
    /// Simulated seconds the generation took.
    pub duration: f32,
}

impl GenerationSummary {
    fn from_archive(generation: u32, archive: &[ArchiveEntry], duration: f32) -> Self {
        let (best, worst, sum) = archive.iter().fold(
            (f32::NEG_INFINITY, f32::INFINITY, 0.0),
            |(best, worst, sum), entry| (best.max(entry.fitness), worst.min(entry.fitness), sum + entry.fitness),
        );
        let count = archive.len().max(1) as f32;

        Self {
            generation,
            best_fitness: if archive.is_empty() { 0.0 } else { best },
            mean_fitness: sum / count,
            worst_fitness: if archive.is_empty() { 0.0 } else { worst },
            completed: archive.iter().filter(|entry| entry.finished).count(),
            duration,
        }
    }
}

/// Snapshot of the engine after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Current generation number.
    pub generation: u32,
    /// Simulation time within the generation.
    pub time: f32,
    /// Vehicles in the active window.
    pub active: usize,
    /// Vehicles that have not entered a window yet.
    pub pending: usize,
    /// Vehicles already archived.
    pub archived: usize,
    /// Set on the tick that finished a generation.
    pub completed_generation: Option<GenerationSummary>,
}

/// Runs generations of autonomous vehicles and breeds their controllers.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: Params,
    track: Track,
    generation: u32,
    time: f32,
    window_started: f32,
    phase: Phase,
    pending: Vec<Vehicle>,
    active: Vec<Vehicle>,
    archive: Vec<ArchiveEntry>,
    next_id: usize,
}

impl EvolutionEngine {
    /// Creates an engine with a randomly initialised first population.
    pub fn new<R: Rng + ?Sized>(track: Track, params: Params, rng: &mut R) -> Result<Self> {
        params.validate()?;

        let layer_sizes = params.layer_sizes();
        let brains = (0..params.population_size)
            .map(|_| Brain::new(&layer_sizes, rng))
            .collect();

        let mut engine = Self {
            params,
            track,
            generation: 0,
            time: 0.0,
            window_started: 0.0,
            phase: Phase::Populating,
            pending: Vec::new(),
            active: Vec::new(),
            archive: Vec::new(),
            next_id: 0,
        };
        engine.populate(brains);

        Ok(engine)
    }

    /// Respawns one vehicle per genome at the starting point.
    fn populate(&mut self, brains: Vec<Brain>) {
        self.phase = Phase::Populating;
        self.time = 0.0;
        self.window_started = 0.0;

        let first_id = self.next_id;
        self.next_id += brains.len();

        let (track, params) = (&self.track, &self.params);
        self.pending = brains
            .into_iter()
            .enumerate()
            .map(|(i, brain)| Vehicle::autonomous(first_id + i, track, params, brain))
            .collect();
        self.active.clear();
    }

    /// Moves the next batch of pending vehicles into the active window.
    fn refill_window(&mut self) {
        let count = self.params.active_window.min(self.pending.len());
        let time = self.time;

        self.active
            .extend(self.pending.drain(..count).map(|mut vehicle| {
                vehicle.last_checkpoint_time = time;
                vehicle
            }));
        self.window_started = time;

        tracing::debug!(
            generation = self.generation,
            count,
            remaining = self.pending.len(),
            "window refilled"
        );
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Vehicles in the active window are stepped in parallel; eliminations are
    /// archived afterwards. When the last vehicle of the generation retires
    /// the next generation is bred with `rng`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParams`] when `dt` is not a positive finite
    /// number, and any error from [`advance`](Self::advance).
    pub fn step<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Result<TickReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimulationError::invalid_params(format!(
                "time step must be positive, got {dt}"
            )));
        }

        match self.phase {
            Phase::Populating => {
                self.refill_window();
                self.phase = Phase::Running;
            }
            Phase::Advancing => {
                let summary = self.advance(rng)?;
                return Ok(self.report(Some(summary)));
            }
            Phase::Running => {}
        }

        self.time += dt;
        let time = self.time;

        let (track, params) = (&self.track, &self.params);
        let outcomes: Vec<StepOutcome> = self
            .active
            .par_iter_mut()
            .map(|vehicle| vehicle.tick(track, params, time, dt))
            .collect();

        let mut survivors = Vec::with_capacity(self.active.len());
        for (vehicle, outcome) in std::mem::take(&mut self.active).into_iter().zip(outcomes) {
            match outcome {
                StepOutcome::Alive => survivors.push(vehicle),
                StepOutcome::Eliminated { cause, .. } => {
                    self.retire(vehicle, RetireReason::Eliminated(cause));
                }
            }
        }
        self.active = survivors;

        let window_expired = self
            .params
            .max_window_seconds
            .is_some_and(|limit| time - self.window_started >= limit);
        if window_expired {
            for vehicle in std::mem::take(&mut self.active) {
                self.retire(vehicle, RetireReason::WindowTimeLimit);
            }
        }

        if self.active.iter().all(|vehicle| vehicle.finished) {
            for vehicle in std::mem::take(&mut self.active) {
                self.retire(vehicle, RetireReason::CourseCompleted);
            }

            if self.pending.is_empty() {
                let summary = self.advance(rng)?;
                return Ok(self.report(Some(summary)));
            }
            self.refill_window();
        }

        Ok(self.report(None))
    }

    /// Steps until the current generation has been bred into the next one.
    pub fn run_generation<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Result<GenerationSummary> {
        loop {
            if let Some(summary) = self.step(dt, rng)?.completed_generation {
                return Ok(summary);
            }
        }
    }

    fn retire(&mut self, vehicle: Vehicle, reason: RetireReason) {
        tracing::debug!(
            generation = self.generation,
            vehicle = vehicle.id,
            fitness = vehicle.fitness,
            checkpoints = vehicle.checkpoint_index,
            ?reason,
            "vehicle retired"
        );

        let (vehicle_id, fitness, finished) = (vehicle.id, vehicle.fitness, vehicle.finished);
        if let Some(brain) = vehicle.into_brain() {
            self.archive.push(ArchiveEntry {
                vehicle_id,
                fitness,
                finished,
                reason,
                brain,
            });
        }
    }

    /// Turns the archive into the next generation.
    ///
    /// Called by [`step`](Self::step) once every vehicle has been archived.
    /// Vehicles that have not retired yet are discarded.
    ///
    /// # Errors
    ///
    /// [`SimulationError::EmptyGenePool`] when no selected genome earns a
    /// place in the gene pool. The archive is kept so the caller can inspect it.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GenerationSummary> {
        self.phase = Phase::Advancing;

        self.archive.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        let summary = GenerationSummary::from_archive(self.generation, &self.archive, self.time);

        let pool = gene_pool(&self.archive, &self.params);
        if pool.is_empty() {
            return Err(SimulationError::EmptyGenePool {
                generation: self.generation,
                archived: self.archive.len(),
            });
        }

        let brains = breed(&self.archive, &pool, &self.params, rng);

        tracing::info!(
            generation = summary.generation,
            best = summary.best_fitness,
            mean = summary.mean_fitness,
            worst = summary.worst_fitness,
            completed = summary.completed,
            pool = pool.len(),
            "generation complete"
        );

        self.archive.clear();
        self.generation += 1;
        self.populate(brains);

        Ok(summary)
    }

    fn report(&self, completed_generation: Option<GenerationSummary>) -> TickReport {
        TickReport {
            generation: self.generation,
            time: self.time,
            active: self.active.len(),
            pending: self.pending.len(),
            archived: self.archive.len(),
            completed_generation,
        }
    }

    /// Render primitives for the vehicles in the active window.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(self.generation, self.time, &self.active, self.params.world_scale)
    }

    /// Current generation number.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Simulation time within the current generation.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Vehicles currently being simulated.
    pub fn active(&self) -> &[Vehicle] {
        &self.active
    }

    /// Vehicles waiting for a window.
    pub fn pending(&self) -> &[Vehicle] {
        &self.pending
    }

    /// Retired vehicles of the current generation.
    pub fn archive(&self) -> &[ArchiveEntry] {
        &self.archive
    }

    /// Total vehicles in the current generation, wherever they are.
    pub fn population(&self) -> usize {
        self.pending.len() + self.active.len() + self.archive.len()
    }

    /// The track being driven.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Engine parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Indices of the archive entries admitted to the gene pool.
///
/// `len` is the size of an archive sorted best first. The top and bottom
/// slices are taken according to the selection policy and never overlap.
pub fn select_indices(len: usize, params: &Params) -> Vec<usize> {
    let (top, bottom) = match params.selection_policy {
        SelectionPolicy::FittestAndWeakest => (params.best_count, params.worst_count),
        SelectionPolicy::ReferenceOrder => (params.worst_count, params.best_count),
    };

    let top = top.min(len);
    let bottom_start = len - bottom.min(len);

    let mut selected: Vec<usize> = (0..top).collect();
    selected.extend(bottom_start.max(top)..len);
    selected
}

/// Builds the weighted gene pool from an archive sorted best first.
///
/// Each selected entry appears `floor(fitness * pool_repeat_scale)` times.
pub fn gene_pool(archive: &[ArchiveEntry], params: &Params) -> Vec<usize> {
    select_indices(archive.len(), params)
        .into_iter()
        .flat_map(|i| {
            let copies = (archive[i].fitness * params.pool_repeat_scale).floor().max(0.0) as usize;
            std::iter::repeat_n(i, copies)
        })
        .collect()
}

/// Draws two parents from the gene pool.
///
/// The parents are distinct archive entries whenever the pool holds more
/// than one distinct index; otherwise the single genome is paired with
/// itself. `pool` must not be empty.
pub fn draw_parents<R: Rng + ?Sized>(pool: &[usize], rng: &mut R) -> (usize, usize) {
    let first = pool[rng.random_range(0..pool.len())];
    if pool.iter().all(|&i| i == first) {
        return (first, first);
    }

    let mut second = pool[rng.random_range(0..pool.len())];
    while second == first {
        second = pool[rng.random_range(0..pool.len())];
    }
    (first, second)
}

/// Breeds a full population: crossover children first, random genomes after.
///
/// `pool` indexes into `archive` and must not be empty. The first
/// `min(offspring_count, population_size)` brains are children of two
/// parents drawn with [`draw_parents`]; the rest are freshly initialised.
pub fn breed<R: Rng + ?Sized>(archive: &[ArchiveEntry], pool: &[usize], params: &Params, rng: &mut R) -> Vec<Brain> {
    if pool.iter().all(|&i| i == pool[0]) {
        tracing::warn!(
            vehicle = archive[pool[0]].vehicle_id,
            "gene pool holds a single genome; breeding it with itself"
        );
    }

    let offspring = params.offspring_count.min(params.population_size);
    let mut brains = Vec::with_capacity(params.population_size);

    for _ in 0..offspring {
        let (first, second) = draw_parents(pool, rng);
        brains.push(Brain::merge(
            &archive[first].brain,
            &archive[second].brain,
            params.mutation_rate,
            rng,
        ));
    }

    let layer_sizes = params.layer_sizes();
    brains.extend((offspring..params.population_size).map(|_| Brain::new(&layer_sizes, rng)));

    brains
}
