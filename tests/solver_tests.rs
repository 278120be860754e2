mod common;

use common::{block_image, content_for, gradient_image, A, B};
use image::RgbImage;
use std::time::Duration;
use tileswap::api::{self, CaptchaContent};
use tileswap::error::{SolveResult, SolverError};
use tileswap::geometry::{compute_tile_layout, MAX_TILE_COUNT};
use tileswap::optimizer::{
    mutation, NoopObserver, Permutation, SearchOptions, SearchOutcome, StepObserver, StepReport,
    StepSearch,
};
use tileswap::raster::ImageExtension;
use tileswap::render::apply_tile_permutation;

/// Scrambled 2x2 board: B A / A B. Seam score 800; swapping slots 0 and 1 gives 400.
fn scrambled_board() -> RgbImage {
    block_image(2, 2, &[B, A, A, B])
}

fn grid2() -> SearchOptions {
    SearchOptions {
        tile_count: 2,
        ..SearchOptions::default()
    }
}

#[derive(Default)]
struct Recorder {
    reports: Vec<StepReport>,
    stop_after: Option<usize>,
}

impl StepObserver for Recorder {
    fn on_step(&mut self, report: &StepReport, _rendered: &RgbImage) -> SolveResult<bool> {
        self.reports.push(report.clone());
        Ok(self.stop_after.map_or(true, |n| report.step < n))
    }
}

fn run(img: &RgbImage, steps: &[i64], options: SearchOptions) -> (SearchOutcome, Vec<StepReport>) {
    let mut rec = Recorder::default();
    let outcome = StepSearch::new(options).run(img, steps, &mut rec).unwrap();
    (outcome, rec.reports)
}

#[test]
fn test_golden_board_picks_the_improving_swap() {
    // 7 is dropped; (9,9) is a no-op at 800, (0,1) drops to 400, (1,0) undoes it.
    let (outcome, reports) = run(&scrambled_board(), &[7, 9, 9, 0, 1, 1, 0], grid2());

    let scores: Vec<u64> = reports.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![800, 400, 800]);
    assert_eq!(outcome.best_step, 2);
    assert_eq!(outcome.best_swaps, vec![9, 9, 0, 1]);
    assert_eq!(outcome.best_score, Some(400));
    assert_eq!(outcome.steps_evaluated, 3);
    assert!(!reports[0].applied);
    assert!(reports[1].applied);
}

#[test]
fn test_leading_element_is_dropped_not_a_pair() {
    // With one element dropped the first pair is (9, 0), out of range.
    let (outcome, reports) = run(&scrambled_board(), &[9, 9, 0, 1], grid2());
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].pair, (9, 0));
    assert_eq!(outcome.best_step, 1);
    assert_eq!(outcome.best_swaps, vec![9, 0]);

    // Dropping a whole pair pairs (0, 1) instead.
    let options = SearchOptions {
        skip_leading: 2,
        ..grid2()
    };
    let (outcome, reports) = run(&scrambled_board(), &[9, 9, 0, 1], options);
    assert_eq!(reports[0].score, 400);
    assert_eq!(outcome.best_swaps, vec![0, 1]);
}

#[test]
fn test_ties_keep_the_earliest_step() {
    // 400, 800, 400
    let (outcome, reports) = run(&scrambled_board(), &[7, 0, 1, 0, 1, 0, 1], grid2());
    let scores: Vec<u64> = reports.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![400, 800, 400]);
    assert_eq!(outcome.best_step, 1);
    assert_eq!(outcome.best_swaps, vec![0, 1]);
    assert!(!reports[2].improved);
}

#[test]
fn test_improvements_are_strictly_decreasing() {
    let img = gradient_image(50, 50);
    let mut rng = fastrand::Rng::with_seed(11);
    let mut steps = vec![0i64];
    for (a, b) in mutation::random_swaps(&mut rng, 25, 30) {
        steps.extend([a as i64, b as i64]);
    }

    let (outcome, reports) = run(&img, &steps, SearchOptions::default());
    let improvements: Vec<u64> = reports.iter().filter(|r| r.improved).map(|r| r.score).collect();
    assert!(improvements.windows(2).all(|w| w[1] < w[0]));
    assert_eq!(Some(*improvements.last().unwrap()), outcome.best_score);

    let min = reports.iter().map(|r| r.score).min().unwrap();
    let first_min = reports.iter().find(|r| r.score == min).unwrap();
    assert_eq!(outcome.best_step, first_min.step);
    assert_eq!(outcome.best_swaps.len(), outcome.best_step * 2);
}

#[test]
fn test_single_pair_runs_once() {
    let (outcome, reports) = run(&scrambled_board(), &[5, 2, 3], grid2());
    assert_eq!(reports.len(), 1);
    assert_eq!(outcome.best_step, 1);
    assert_eq!(outcome.best_swaps, vec![2, 3]);
}

#[test]
fn test_out_of_range_pairs_do_not_change_the_board() {
    let (outcome, reports) = run(&scrambled_board(), &[0, -1, 2, 4, 0, 3, 3], grid2());
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.score == 800));
    assert!(!reports[0].applied && !reports[1].applied);
    // self-swap is valid but changes nothing
    assert!(reports[2].applied);
    assert_eq!(outcome.best_step, 1);
}

#[test]
fn test_permutation_ignores_bad_indices() {
    let mut p = Permutation::identity(4);
    assert!(!p.try_swap(4, 0));
    assert!(!p.try_swap(-1, 2));
    assert!(p.is_identity());
    assert!(p.try_swap(0, 3));
    assert_eq!(p.as_slice(), &[3, 1, 2, 0]);
    assert!(p.is_bijection());
}

#[test]
fn test_max_steps_bounds_the_loop() {
    let options = SearchOptions {
        max_steps: 2,
        ..grid2()
    };
    let (outcome, reports) = run(&scrambled_board(), &[0, 0, 1, 0, 1, 0, 1, 0, 1], options);
    assert_eq!(reports.len(), 2);
    assert_eq!(outcome.steps_evaluated, 2);
}

#[test]
fn test_zero_time_budget_evaluates_nothing() {
    let options = SearchOptions {
        max_time: Some(Duration::ZERO),
        ..grid2()
    };
    let (outcome, reports) = run(&scrambled_board(), &[0, 0, 1], options);
    assert!(reports.is_empty());
    assert_eq!(outcome.best_step, 0);
    assert!(outcome.best_swaps.is_empty());
}

#[test]
fn test_observer_can_stop_the_search() {
    let mut rec = Recorder {
        stop_after: Some(1),
        ..Default::default()
    };
    let outcome = StepSearch::new(grid2())
        .run(&scrambled_board(), &[7, 9, 9, 0, 1], &mut rec)
        .unwrap();
    assert_eq!(outcome.steps_evaluated, 1);
    assert_eq!(outcome.best_step, 1);
}

struct Failing;

impl StepObserver for Failing {
    fn on_step(&mut self, _report: &StepReport, _rendered: &RgbImage) -> SolveResult<bool> {
        Err(SolverError::Encode("disk full".into()))
    }
}

#[test]
fn test_step_failure_reports_context() {
    let err = StepSearch::new(grid2())
        .run(&scrambled_board(), &[7, 0, 1], &mut Failing)
        .unwrap_err();
    match err {
        SolverError::Step {
            step,
            permutation,
            source,
        } => {
            assert_eq!(step, 1);
            assert_eq!(permutation, vec![1, 0, 2, 3]);
            assert!(matches!(*source, SolverError::Encode(_)));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_empty_image_is_fatal() {
    let err = StepSearch::new(grid2())
        .run(&RgbImage::new(0, 0), &[7, 0, 1], &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(err, SolverError::InvalidImage(_)));
}

#[test]
fn test_zero_tile_count_is_a_config_error() {
    let options = SearchOptions {
        tile_count: 0,
        ..SearchOptions::default()
    };
    let err = StepSearch::new(options)
        .run(&scrambled_board(), &[7, 0, 1], &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(err, SolverError::Config(_)));
}

#[test]
fn test_oversized_tile_count_is_a_config_error() {
    let options = SearchOptions {
        tile_count: 1 << 32,
        ..SearchOptions::default()
    };
    let err = StepSearch::new(options)
        .run(&scrambled_board(), &[7, 0, 1], &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(err, SolverError::Config(_)));

    let options = SearchOptions {
        tile_count: MAX_TILE_COUNT + 1,
        ..SearchOptions::default()
    };
    let err = StepSearch::new(options)
        .run(&scrambled_board(), &[7, 0, 1], &mut NoopObserver)
        .unwrap_err();
    assert!(matches!(err, SolverError::Config(_)));
}

#[test]
fn test_recovers_scrambled_gradient() {
    let clean = gradient_image(50, 50);
    let layout = compute_tile_layout(50, 50, 5);

    // Disjoint swaps so no intermediate undo state equals the clean image.
    let scramble = [(0, 7), (3, 12), (5, 24), (10, 18)];
    let mut perm = Permutation::identity(25);
    for &(a, b) in &scramble {
        perm.try_swap(a as i64, b as i64);
    }
    let scrambled = apply_tile_permutation(&clean, &layout, perm.as_slice()).unwrap();

    let undo = mutation::undo_sequence(&scramble);
    let mut steps = vec![3];
    steps.extend(&undo);
    steps.extend([1, 2, 6, 9]);

    let content = content_for(&scrambled, steps, ImageExtension::Png);
    let outcome = api::solve(&content).unwrap();
    assert_eq!(outcome.step_count, 4);
    assert_eq!(outcome.selected_swaps, undo);
}

#[test]
fn test_solve_degenerate_inputs() {
    let img = scrambled_board();

    let no_steps = content_for(&img, vec![], ImageExtension::Png);
    let out = api::solve(&no_steps).unwrap();
    assert_eq!(out.step_count, 0);
    assert!(out.selected_swaps.is_empty());

    let no_image = CaptchaContent {
        steps: vec![7, 0, 1],
        ..Default::default()
    };
    assert_eq!(api::solve(&no_image).unwrap().step_count, 0);

    let blank_image = CaptchaContent {
        image: Some("  ".into()),
        steps: vec![7, 0, 1],
        ..Default::default()
    };
    assert_eq!(api::solve(&blank_image).unwrap().step_count, 0);

    // Only the dropped element: nothing to iterate
    let one = content_for(&img, vec![4], ImageExtension::Png);
    assert_eq!(api::solve(&one).unwrap().step_count, 0);
}

#[test]
fn test_corrupt_image_is_fatal() {
    let bad_b64 = CaptchaContent {
        image: Some("***".into()),
        steps: vec![0, 1, 2],
        ..Default::default()
    };
    assert!(matches!(api::solve(&bad_b64), Err(SolverError::Base64(_))));

    let not_an_image = CaptchaContent {
        image: Some("aGVsbG8gd29ybGQ=".into()),
        steps: vec![0, 1, 2],
        ..Default::default()
    };
    assert!(matches!(api::solve(&not_an_image), Err(SolverError::Decode(_))));
}

#[test]
fn test_jpeg_bundle_solves() {
    let img = gradient_image(50, 50);
    let content = content_for(&img, vec![0, 1, 2, 3, 4], ImageExtension::Jpeg);
    let out = api::solve(&content).unwrap();
    assert!(out.step_count <= 2);
    assert_eq!(out.selected_swaps.len(), out.step_count * 2);
}
