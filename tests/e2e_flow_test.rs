//! End-to-end flow tests covering load, transform and save.

mod common;

use block_mosaic::{BlockMosaic, ExecutionMode, MosaicError, NoProgress, PixelBuffer, Rgb};
use common::{fixtures, Workspace};
use mosaic::error::AppError;
use mosaic::models::{RunConfig, RunOutcome};
use mosaic::services::{load_image, MosaicService};
use pretty_assertions::assert_eq;

fn config_in(
    workspace: &Workspace,
    input: &str,
    block_size: usize,
    mode: ExecutionMode,
) -> RunConfig {
    let mut config = RunConfig::new(workspace.join(input), block_size, mode);
    config.output = workspace.join("result.png");
    config
}

#[tokio::test]
async fn test_solid_image_is_unchanged() {
    let workspace = Workspace::new();
    workspace.solid("red.png", 8, 8, fixtures::RED);
    let config = config_in(&workspace, "red.png", 4, ExecutionMode::Sequential);

    let outcome = MosaicService::new(config).run().await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed {
            output: workspace.join("result.png"),
            blocks: 4
        }
    );
    common::assert_image_eq(
        &workspace.join("result.png"),
        &PixelBuffer::filled(8, 8, fixtures::RED).unwrap(),
    );
}

#[tokio::test]
async fn test_blocks_are_averaged() {
    let workspace = Workspace::new();
    // Left half black, right half white.
    let pixels = (0..16)
        .map(|i| {
            if i % 4 < 2 {
                Rgb::new(0, 0, 0)
            } else {
                Rgb::new(255, 255, 255)
            }
        })
        .collect();
    let halves = PixelBuffer::from_pixels(4, 4, pixels).unwrap();
    workspace.write_image("halves.png", &halves);

    // One 4x4 block: 8 black, 8 white -> 127 after truncation.
    let config = config_in(&workspace, "halves.png", 4, ExecutionMode::Sequential);
    let outcome = MosaicService::new(config).run().await.unwrap();

    assert_eq!(outcome.blocks(), 1);
    let result = load_image(&workspace.join("result.png")).unwrap();
    common::assert_block_color(&result, 0, 0, 4, Rgb::new(127, 127, 127));
}

#[tokio::test]
async fn test_parallel_run_matches_engine() {
    let workspace = Workspace::new();
    let input = workspace.gradient("gradient.png", 41, 23);
    let mut config = config_in(&workspace, "gradient.png", 6, ExecutionMode::Parallel);
    config.workers = Some(3);

    let outcome = MosaicService::new(config).run().await.unwrap();

    let mut expected = load_image(&input).unwrap();
    let engine = BlockMosaic::new(6).unwrap().workers(3);
    engine.run_parallel(&mut expected, &NoProgress).unwrap();

    assert_eq!(
        outcome.blocks(),
        engine.planned_blocks(41, 23, ExecutionMode::Parallel)
    );
    common::assert_image_eq(&workspace.join("result.png"), &expected);
}

#[tokio::test]
async fn test_aligned_parallel_matches_sequential() {
    let workspace = Workspace::new();
    workspace.gradient("gradient.png", 30, 31);

    let mut sequential = config_in(&workspace, "gradient.png", 4, ExecutionMode::Sequential);
    sequential.output = workspace.join("seq.png");
    MosaicService::new(sequential).run().await.unwrap();

    let mut parallel = config_in(&workspace, "gradient.png", 4, ExecutionMode::Parallel);
    parallel.output = workspace.join("par.png");
    parallel.workers = Some(5);
    parallel.align_partitions = true;
    MosaicService::new(parallel).run().await.unwrap();

    let expected = load_image(&workspace.join("seq.png")).unwrap();
    common::assert_image_eq(&workspace.join("par.png"), &expected);
}

#[tokio::test]
async fn test_missing_input_is_load_error() {
    let workspace = Workspace::new();
    let config = config_in(&workspace, "missing.png", 4, ExecutionMode::Sequential);

    let err = MosaicService::new(config).run().await.unwrap_err();

    assert!(matches!(err, AppError::Load { .. }), "{err:?}");
    assert_eq!(err.exit_code(), 1);
    common::assert_no_result(workspace.path());
}

#[tokio::test]
async fn test_zero_block_size_fails_before_loading() {
    let workspace = Workspace::new();
    let config = config_in(&workspace, "missing.png", 0, ExecutionMode::Parallel);

    let err = MosaicService::new(config).run().await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Transform(MosaicError::InvalidBlockSize)
    ));
}

#[tokio::test]
async fn test_cancelled_run_writes_nothing() {
    let workspace = Workspace::new();
    workspace.gradient("gradient.png", 16, 16);

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let service = MosaicService::new(config_in(&workspace, "gradient.png", 2, mode));
        service.cancel_token().cancel();

        let outcome = service.run().await.unwrap();

        assert_eq!(outcome, RunOutcome::Cancelled { blocks: 0 }, "{mode}");
        assert_eq!(outcome.exit_code(), 130);
        common::assert_no_result(workspace.path());
    }
}

#[tokio::test]
async fn test_save_failure_is_reported_not_fatal() {
    let workspace = Workspace::new();
    workspace.solid("red.png", 8, 8, fixtures::RED);
    let mut config = config_in(&workspace, "red.png", 4, ExecutionMode::Sequential);
    config.output = workspace.join("no_such_dir").join("result.png");

    let outcome = MosaicService::new(config).run().await.unwrap();

    match &outcome {
        RunOutcome::SaveFailed { blocks, reason, .. } => {
            assert_eq!(*blocks, 4);
            assert!(!reason.is_empty());
        }
        other => panic!("expected SaveFailed, got {other:?}"),
    }
    assert_eq!(outcome.exit_code(), 0);
}
