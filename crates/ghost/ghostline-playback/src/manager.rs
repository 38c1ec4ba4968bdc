//! Owns the loaded timelines and bound actors, and drives batched replay.

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use ghostline_core::{decode_stream_with, Timeline};

use crate::actor::Actor;
use crate::config::Config;
use crate::error::PlaybackError;
use crate::io::{BlockLoader, Compressor};
use crate::restore::restore;
use crate::scheduler::BatchScheduler;

/// Outcome of [`GhostManager::load`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Timelines now held by the manager.
    pub loaded: usize,
    /// The load stopped early because the token fired.
    pub cancelled: bool,
}

/// Replays one timeline per actor at a shared playback time.
pub struct GhostManager<A: Actor> {
    config: Config,
    timelines: Vec<Timeline>,
    actors: Vec<A>,
    scheduler: BatchScheduler,
    time: f32,
}

impl<A: Actor> GhostManager<A> {
    pub fn new(config: Config) -> Result<Self, PlaybackError> {
        config.validate()?;
        let scheduler = BatchScheduler::new(config.update_batch_size);
        Ok(Self {
            config,
            timelines: Vec::new(),
            actors: Vec::new(),
            scheduler,
            time: 0.0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    pub fn actors(&self) -> &[A] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [A] {
        &mut self.actors
    }

    pub fn scheduler(&self) -> &BatchScheduler {
        &self.scheduler
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Replace the loaded timelines directly, unbinding nothing.
    pub fn set_timelines(&mut self, timelines: Vec<Timeline>) {
        self.timelines = timelines;
        self.scheduler.reset();
    }

    /// Read every block from `loader`, decompress it if a compressor is given, and
    /// decode it into one timeline per block.
    ///
    /// When `cancel` fires, loading stops at the next block boundary and the
    /// timelines decoded so far replace the current ones. A failing block aborts the
    /// load with an error and leaves the current timelines untouched.
    pub async fn load<L>(
        &mut self,
        loader: &L,
        compressor: Option<&dyn Compressor>,
        cancel: &CancellationToken,
    ) -> Result<LoadReport, PlaybackError>
    where
        L: BlockLoader + ?Sized,
    {
        let mut blocks = loader.load_blocks();
        let mut timelines = Vec::new();
        let mut cancelled = false;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    None
                }
                block = blocks.next() => block,
            };
            let Some(block) = next else {
                break;
            };

            let bytes = block?;
            let bytes = match compressor {
                Some(c) => c.decompress(&bytes).await?,
                None => bytes,
            };
            timelines.push(decode_stream_with(&bytes, &self.config.codec)?);
        }

        if cancelled {
            log::warn!("load cancelled after {} timelines", timelines.len());
        } else {
            log::debug!("loaded {} timelines", timelines.len());
        }
        let report = LoadReport {
            loaded: timelines.len(),
            cancelled,
        };
        self.set_timelines(timelines);
        Ok(report)
    }

    /// Attach one actor per loaded timeline, in order.
    pub fn bind(&mut self, actors: Vec<A>) -> Result<(), PlaybackError> {
        if actors.len() != self.timelines.len() {
            log::warn!(
                "bind: {} actors for {} timelines",
                actors.len(),
                self.timelines.len()
            );
            return Err(PlaybackError::ActorCountMismatch {
                timelines: self.timelines.len(),
                actors: actors.len(),
            });
        }
        self.actors = actors;
        self.scheduler.reset();
        Ok(())
    }

    /// Detach and return the bound actors.
    pub fn unbind(&mut self) -> Vec<A> {
        self.scheduler.reset();
        std::mem::take(&mut self.actors)
    }

    /// Move the playback time. Starts (or redirects) a sweep when the time changed.
    pub fn set_time(&mut self, time: f32) {
        if self.time != time {
            self.time = time;
            self.request_update();
        }
    }

    /// Start a sweep at the current time, or redirect the sweep in flight.
    pub fn request_update(&mut self) {
        self.scheduler.request_update(self.bound_count());
    }

    fn bound_count(&self) -> usize {
        if self.actors.len() == self.timelines.len() {
            self.actors.len()
        } else {
            0
        }
    }

    /// Restore one batch of actors. Returns how many were visited.
    pub fn tick(&mut self) -> usize {
        let Some(range) = self.scheduler.tick(self.bound_count()) else {
            return 0;
        };
        let (time, warp) = (self.time, self.config.warp_distance);
        let visited = range.len();
        for (timeline, actor) in self.timelines[range.clone()]
            .iter()
            .zip(self.actors[range].iter_mut())
        {
            match timeline.query_with_warp(time, warp) {
                Some(snapshot) => {
                    actor.set_active(true);
                    restore(actor, &snapshot, time);
                }
                None => actor.set_active(false),
            }
        }
        visited
    }

    /// Tick until the sweep completes, yielding to the runtime between batches.
    /// Returns the number of ticks taken.
    pub async fn run_sweep(&mut self) -> usize {
        let mut ticks = 0;
        while !self.scheduler.is_idle() {
            self.tick();
            ticks += 1;
            tokio::task::yield_now().await;
        }
        log::debug!("sweep finished at t={} in {ticks} ticks", self.time);
        ticks
    }

    /// Drop timelines and actors.
    pub fn clear(&mut self) {
        self.timelines.clear();
        self.actors.clear();
        self.scheduler.reset();
    }
}
