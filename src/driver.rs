//! The checkpointed iteration loop.
//!
//! Control flow per `run` call: resolve a starting step, seed the engine
//! from the latest checkpoint when resuming, then advance the engine one
//! step at a time, persisting a full snapshot every `save_interval` steps
//! and a terminal snapshot on loop exit.

use crate::codec::{self, Dimensionality};
use crate::engine::{Graph, SteppingEngine};
use crate::models::{LayoutConfig, Result};
use crate::resume::ResumePlan;
use crate::store::{CheckpointStore, Snapshot};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, `run` not yet called.
    Idle,
    /// Inside the iteration loop.
    Running,
    /// A `run` call finished and wrote the terminal snapshot.
    Completed,
    /// The last `run` call found the store already satisfied.
    Refused,
}

/// Outcome of a `run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The loop ran (possibly for zero steps) and the terminal snapshot was
    /// written.
    Completed { steps_run: u64 },
    /// The store already held at least as many iterations as requested;
    /// nothing was stepped and nothing was written.
    AlreadySatisfied { last_iteration: u64 },
}

/// Checkpointed driver for an external stepping engine.
///
/// Owns the engine for the duration of the run; all position mutation goes
/// through this single call path.
pub struct LayoutDriver<G, E> {
    graph: G,
    engine: E,
    config: LayoutConfig,
    dimensionality: Dimensionality,
    store: CheckpointStore,
    last_iteration: u64,
    state: DriverState,
}

impl<G, E> LayoutDriver<G, E>
where
    G: Graph,
    E: SteppingEngine<G::NodeId>,
{
    /// Create a driver over `graph` and `engine`.
    ///
    /// Validates the configuration, creates the checkpoint directory if
    /// missing, and captures the store's last completed iteration once.
    pub fn new(graph: G, engine: E, config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        let store = CheckpointStore::open(&config.out_dir)?;
        let last_iteration = store.latest_iteration()?;
        let dimensionality = config.dimensionality();

        Ok(Self {
            graph,
            engine,
            config,
            dimensionality,
            store,
            last_iteration,
            state: DriverState::Idle,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Last completed checkpoint iteration from this driver's perspective:
    /// the directory scan captured at construction, advanced as the run
    /// saves. Under overwrite this tracks the new run, not stale
    /// higher-numbered files a longer previous run may have left behind.
    pub fn latest_iteration(&self) -> u64 {
        self.last_iteration
    }

    /// The stepping engine, for reading positions back out after a run.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run the layout up to the configured iteration count.
    ///
    /// With `overwrite` set, prior checkpoints are ignored and rewritten in
    /// place as the new run reaches the same iteration numbers. Without it,
    /// the run resumes from the highest checkpoint on disk, or refuses when
    /// the store already satisfies the request.
    pub fn run(&mut self, overwrite: bool) -> Result<RunOutcome> {
        let plan = ResumePlan::resolve(self.config.iterations, overwrite, self.last_iteration);

        let first_step = match plan {
            ResumePlan::Satisfied { last_iteration } => {
                self.state = DriverState::Refused;
                warn!(
                    dir = %self.store.dir().display(),
                    saved = last_iteration,
                    requested = self.config.iterations,
                    "Checkpoint directory already satisfies the requested iterations"
                );
                info!("Pass overwrite=true to redo the layout, or raise `iterations` to extend it");
                return Ok(RunOutcome::AlreadySatisfied { last_iteration });
            }
            ResumePlan::Resume { checkpoint } => {
                self.seed_from(checkpoint)?;
                checkpoint + 1
            }
            ResumePlan::Fresh => {
                self.last_iteration = 0;
                1
            }
        };

        self.state = DriverState::Running;
        let total = self.config.iterations.saturating_sub(first_step);
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("##-"),
        );

        let mut steps_run = 0;
        for step in first_step..self.config.iterations {
            self.engine.step();
            steps_run += 1;

            if step % self.config.save_interval == 0 {
                self.save(Snapshot::Iteration(step))?;
                self.last_iteration = step;
                pb.set_message(format!("saved {step}.bin"));
            }
            pb.inc(1);
        }

        // Always publish the terminal snapshot, even when the loop body
        // never ran.
        self.save(Snapshot::Terminal)?;
        pb.finish_with_message("positions.bin written");

        self.state = DriverState::Completed;
        info!(
            steps = steps_run,
            last_checkpoint = self.last_iteration,
            "Layout run complete"
        );
        Ok(RunOutcome::Completed { steps_run })
    }

    fn seed_from(&mut self, checkpoint: u64) -> Result<()> {
        let snapshot = Snapshot::Iteration(checkpoint);
        info!(
            path = %self.store.path_for(snapshot).display(),
            "Resuming layout from checkpoint"
        );
        let bytes = self.store.read(snapshot)?;
        codec::decode_snapshot(&bytes, &self.graph, &mut self.engine, self.dimensionality)
    }

    fn save(&self, snapshot: Snapshot) -> Result<()> {
        let bytes = codec::encode_snapshot(&self.graph, &self.engine, self.dimensionality);
        self.store.write(snapshot, &bytes)
    }
}
