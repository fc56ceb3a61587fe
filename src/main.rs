//! Application entry point — VietDub CLI.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run; the path
//!    can be overridden with `VIETDUB_CONFIG`).
//! 3. Read the recognised segment list from the input JSON.
//! 4. Log the offline cost estimate for the configured model.
//! 5. Construct the translator and TTS provider — configuration and
//!    credential errors abort here, before any remote work is attempted.
//! 6. Wire Ctrl-C to a [`CancelToken`].
//! 7. Translate all batches, then synthesize + fit all segments.
//! 8. Write the annotated segment list for the external muxing stage.
//!
//! Degraded segments (verbatim fallback text, missing audio) never produce
//! a non-zero exit; only configuration, credential and I/O errors do.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::mpsc;

use vietdub::audio::{DurationFitter, FfmpegToolkit};
use vietdub::cancel::CancelToken;
use vietdub::config::{AppConfig, AppPaths};
use vietdub::segment::{read_segments, write_segments};
use vietdub::sync::{ProgressUpdate, SyncOrchestrator};
use vietdub::translate::{
    estimate_cost, model_label, translate_segments, OpenRouterClient, PriceTable,
};
use vietdub::tts::{catalog, create_provider, TtsProvider};

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

struct Args {
    input: PathBuf,
    output: PathBuf,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args_os().skip(1);
    match (args.next(), args.next()) {
        (Some(input), Some(output)) => Ok(Args {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }),
        _ => bail!("usage: vietdub <segments.json> <output.json>"),
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("VietDub starting up");

    let args = parse_args()?;

    // 2. Configuration
    let config = match std::env::var_os("VIETDUB_CONFIG") {
        Some(path) => AppConfig::load_from(std::path::Path::new(&path))
            .with_context(|| format!("failed to load config {}", PathBuf::from(&path).display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };

    let paths = AppPaths::new();
    paths
        .ensure_clips_dir()
        .with_context(|| format!("failed to create clips dir {}", paths.clips_dir.display()))?;

    // 3. Segment list
    let mut segments = read_segments(&args.input)?;
    log::info!(
        "loaded {} segments from {}",
        segments.len(),
        args.input.display()
    );

    // 4. Cost estimate
    let model = &config.translation.model;
    let cost = estimate_cost(
        &segments,
        model,
        config.translation.batch_size,
        &PriceTable::builtin(),
        config.translation.cost_display_multiplier,
    );
    log::info!(
        "translation model: {} — estimated cost ${cost:.6}",
        model_label(model).unwrap_or(model.as_str())
    );

    // 5. Fail-fast construction of the remote clients
    let translator = OpenRouterClient::from_config(&config.translation)
        .context("translation is not configured")?;

    let provider: Arc<dyn TtsProvider> = Arc::from(
        create_provider(
            &config.tts.provider,
            config.tts.api_key.as_deref(),
            &paths.clips_dir,
            config.tts.timeout_secs,
        )
        .context("speech synthesis is not configured")?,
    );

    if !catalog::is_known_voice(&config.tts.provider, &config.tts.voice) {
        log::warn!(
            "voice {:?} is not in the {} catalog — passing it through anyway",
            config.tts.voice,
            config.tts.provider
        );
    }

    // 6. Cancellation on Ctrl-C
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("cancellation requested — finishing in-flight work");
                cancel.cancel();
            }
        });
    }

    // 7a. Translation
    let translate_report = translate_segments(
        &mut segments,
        &translator,
        config.translation.batch_size,
        &cancel,
    )
    .await;
    log::info!(
        "translation: {}/{} batches ok, {} failed, {} fallback segments{}",
        translate_report.batches_completed,
        translate_report.batches_total,
        translate_report.batches_failed,
        translate_report.fallback_segments,
        if translate_report.cancelled {
            " (cancelled)"
        } else {
            ""
        }
    );

    // 7b. Synthesis + fitting
    let fitter = Arc::new(DurationFitter::new(
        Arc::new(FfmpegToolkit::new()),
        &config.sync,
    ));
    let orchestrator = SyncOrchestrator::new(provider, fitter, &config.tts, &config.sync);

    let (progress_tx, mut progress_rx) = mpsc::channel::<ProgressUpdate>(32);
    let progress_task = tokio::spawn(async move {
        while let Some(update) = progress_rx.recv().await {
            log::info!("synthesized {}/{}", update.completed, update.total);
        }
    });

    let sync_report = orchestrator
        .run(&mut segments, &cancel, Some(progress_tx))
        .await;
    let _ = progress_task.await;

    log::info!(
        "synthesis: {} clips, {} skipped, {} failed of {} segments{}",
        sync_report.synthesized,
        sync_report.skipped,
        sync_report.failed,
        sync_report.total,
        if sync_report.cancelled { " (cancelled)" } else { "" }
    );

    // 8. Hand the annotated list to the muxing stage
    write_segments(&args.output, &segments)?;
    log::info!("wrote annotated segments to {}", args.output.display());

    Ok(())
}
