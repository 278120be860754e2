use crate::config::Config;
use crate::error::{SolveResult, SolverError};
use crate::geometry::{check_tile_count, compute_tile_layout, DEFAULT_TILE_COUNT};
use crate::optimizer::{mutation, Permutation};
use crate::render::apply_tile_permutation;
use crate::scorer::Scorer;
use image::RgbImage;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub tile_count: usize,
    pub max_steps: usize,
    pub max_time: Option<Duration>,
    pub skip_leading: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            max_steps: 50,
            max_time: None,
            skip_leading: 1,
        }
    }
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            tile_count: cfg.search.tile_count,
            max_steps: cfg.search.max_steps,
            max_time: cfg.search.max_time_ms.map(Duration::from_millis),
            skip_leading: cfg.search.skip_leading,
        }
    }
}

/// What happened at one step of the replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based; equals the number of pairs consumed so far.
    pub step: usize,
    pub pair: (i64, i64),
    /// False when the pair was out of range and skipped.
    pub applied: bool,
    pub score: u64,
    pub improved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_step: usize,
    pub best_swaps: Vec<i64>,
    pub best_score: Option<u64>,
    pub steps_evaluated: usize,
}

/// Receives every evaluated step along with its render.
/// Returning `Ok(false)` ends the search early with the best result so far.
pub trait StepObserver {
    fn on_step(&mut self, report: &StepReport, rendered: &RgbImage) -> SolveResult<bool>;
}

pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _report: &StepReport, _rendered: &RgbImage) -> SolveResult<bool> {
        Ok(true)
    }
}

/// Greedy replay of a swap sequence, keeping the prefix with the lowest seam score.
pub struct StepSearch {
    options: SearchOptions,
}

impl StepSearch {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// Replays `raw_steps` (as sent by the server) against `image`.
    ///
    /// Each step depends on every swap before it, so steps run strictly in
    /// order. Ties keep the earlier step. Any render or observer failure
    /// aborts the whole search.
    pub fn run<O: StepObserver>(
        &self,
        image: &RgbImage,
        raw_steps: &[i64],
        observer: &mut O,
    ) -> SolveResult<SearchOutcome> {
        let opts = &self.options;
        check_tile_count(opts.tile_count)?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SolverError::InvalidImage(format!(
                "dimensions {}x{} are unusable",
                width, height
            )));
        }

        let candidates = mutation::candidate_swaps(raw_steps, opts.skip_leading);
        let scorer = Scorer::new(compute_tile_layout(width, height, opts.tile_count));
        let mut permutation = Permutation::identity(scorer.layout().cell_count());

        let mut outcome = SearchOutcome::default();
        let start_time = Instant::now();

        for (idx, (a, b)) in mutation::pairs(candidates).take(opts.max_steps).enumerate() {
            let step = idx + 1;

            if let Some(limit) = opts.max_time {
                if start_time.elapsed() >= limit {
                    warn!(
                        "Time budget of {:?} exhausted before step {}; keeping step {}",
                        limit, step, outcome.best_step
                    );
                    break;
                }
            }

            let applied = permutation.try_swap(a, b);
            if !applied {
                warn!(
                    "Step {}: ignoring swap ({}, {}) outside 0..{}",
                    step,
                    a,
                    b,
                    permutation.len()
                );
            }

            let step_failed = |e: SolverError, perm: &Permutation| SolverError::Step {
                step,
                permutation: perm.as_slice().to_vec(),
                source: Box::new(e),
            };

            let rendered = apply_tile_permutation(image, scorer.layout(), permutation.as_slice())
                .map_err(|e| step_failed(e, &permutation))?;
            let score = scorer
                .score(&rendered)
                .map_err(|e| step_failed(e, &permutation))?;
            outcome.steps_evaluated = step;

            let improved = outcome.best_score.map_or(true, |best| score < best);
            debug!(
                "Step {:3} | swap ({}, {}) | score {} | best {:?}",
                step, a, b, score, outcome.best_score
            );

            if improved {
                outcome.best_score = Some(score);
                outcome.best_step = step;
                outcome.best_swaps = candidates[..step * 2].to_vec();
            }

            let report = StepReport {
                step,
                pair: (a, b),
                applied,
                score,
                improved,
            };
            let keep_going = observer
                .on_step(&report, &rendered)
                .map_err(|e| step_failed(e, &permutation))?;
            if !keep_going {
                info!("Search stopped by observer after step {}", step);
                break;
            }
        }

        info!(
            "Search finished: best step {} of {} (score {:?})",
            outcome.best_step, outcome.steps_evaluated, outcome.best_score
        );
        Ok(outcome)
    }
}
