//! Top-level game controller
//!
//! Owns everything that outlives a single run: the cached best score and
//! ghost, settings, pending input, the seed source and the outbox of best-run
//! submissions waiting for the host to deliver them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::BestRun;
use crate::input::{InputEvent, InputQueue};
use crate::persistence::{Candidate, ScoreStore, Standing, SubmitReply};
use crate::platform;
use crate::settings::Settings;
use crate::sim::{Run, RunEvent, TickInput, tick};
use crate::tuning::Tuning;

/// Game controller: one live run plus the state shared across runs
#[derive(Debug)]
pub struct App {
    pub best: BestRun,
    pub settings: Settings,
    pub tuning: Tuning,
    run: Option<Run>,
    input: InputQueue,
    outbox: Vec<Candidate>,
    seeds: Pcg32,
}

impl App {
    /// Controller with run seeds drawn from OS entropy
    pub fn new(settings: Settings, tuning: Tuning) -> Self {
        Self::with_entropy(settings, tuning, rand::random())
    }

    /// Controller with a reproducible sequence of run seeds
    pub fn with_entropy(settings: Settings, tuning: Tuning, entropy: u64) -> Self {
        Self {
            best: BestRun::new(),
            settings,
            tuning,
            run: None,
            input: InputQueue::new(),
            outbox: Vec::new(),
            seeds: Pcg32::seed_from_u64(entropy),
        }
    }

    /// The current run, if one has started
    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    /// Score of the current run (seconds)
    pub fn score(&self) -> f64 {
        self.run.as_ref().map_or(0.0, Run::score)
    }

    /// Queue a key press for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Abandon any current run and start a fresh one at host time `now_ms`.
    ///
    /// The ghost is taken from the cached best as it is right now.
    pub fn start_run(&mut self, now_ms: f64) {
        let seed: u32 = self.seeds.random();
        let run = Run::new(seed, self.best.ghost.as_ref(), &self.tuning, now_ms);
        log::info!(
            "Starting run (seed {}, ghost: {})",
            seed,
            self.best.ghost.as_ref().map_or("none", |g| g.name.as_str())
        );
        self.run = Some(run);
    }

    /// One host frame: consume input, tick the run, queue a submission on a new best
    pub fn frame(&mut self, now_ms: f64) -> Option<RunEvent> {
        let frame = self.input.next_frame();
        if frame.restart || self.run.is_none() {
            self.start_run(now_ms);
        }

        let run = self.run.as_mut()?;
        let event = tick(run, now_ms, &TickInput { jump: frame.jump });

        if let Some(RunEvent::Died { score }) = event {
            let name = self.settings.display_name();
            if let Some(candidate) = run.claim_submission(&name, &self.best, platform::now_ms()) {
                log::info!(
                    "New best {:.1}s (was {:.1}s), queued for submission",
                    score,
                    self.best.score
                );
                self.outbox.push(candidate);
            }
        }
        event
    }

    /// Hand pending submissions to the host for delivery
    pub fn take_outbox(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.outbox)
    }

    pub fn has_pending_submissions(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Cache a standing read from the store. Affects only runs started later.
    pub fn apply_standing(&mut self, standing: &Standing) {
        self.best.apply(standing);
    }

    /// Cache the result of a submission, however late it arrives
    pub fn apply_reply(&mut self, reply: &SubmitReply) {
        self.best.apply_reply(reply);
    }

    /// Read the store synchronously. Failures are logged and leave the cache untouched.
    pub fn refresh<S: ScoreStore>(&mut self, store: &S) -> bool {
        match store.read() {
            Ok(standing) => {
                self.apply_standing(&standing);
                true
            }
            Err(e) => {
                log::warn!("Failed to load highscore: {}", e);
                false
            }
        }
    }

    /// Deliver pending submissions synchronously. Each is tried once.
    pub fn flush<S: ScoreStore>(&mut self, store: &S) {
        for candidate in self.take_outbox() {
            match store.submit(&candidate) {
                Ok(reply) => self.apply_reply(&reply),
                Err(e) => log::warn!("Submit highscore failed: {}", e),
            }
        }
    }
}
