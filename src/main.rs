use anyhow::Result;
use clap::Parser;
use console::style;
use log::info;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};
use videomix::cli::Cli;
use videomix::config::{RunConfig, TargetProfile};
use videomix::error::PipelineError;
use videomix::pipeline::{compose, convert_all, schedule, write_edit_script};
use videomix::signal::setup_shutdown_signal;
use videomix::tools::{Encoder, collect_inputs, frame_count};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let profile =
        TargetProfile::from_dimensions(cli.width, cli.height, cli.framerate, cli.crf);
    let seed = cli.seed.unwrap_or_else(rand::random);
    let inputs = collect_inputs(&cli.file);

    // All parameter validation happens here, before any cache or encoder
    // interaction.
    let config = RunConfig::new(
        inputs,
        cli.duration,
        cli.sample,
        cli.ignore / 100.0,
        profile,
        seed,
    )?;

    let encoder = Encoder::locate(
        cli.ffmpeg.as_deref(),
        !cli.quiet,
        !cli.quiet && !cli.encoder_quiet,
    )?;
    let shutdown = setup_shutdown_signal();
    let base_dir = std::env::current_dir()?;

    let pool = convert_all(
        &encoder,
        &config.sources,
        &config.profile,
        &base_dir,
        &shutdown,
        cli.quiet,
    )?;

    let frame_counts: HashMap<PathBuf, i64> = pool
        .iter()
        .map(|video| (video.path.clone(), frame_count(&video.path)))
        .collect();

    if !cli.quiet {
        println!("Random seed: {seed}");
    }
    info!("scheduling with seed {seed} over {} pool entries", pool.len());
    let segments = schedule(&pool, &frame_counts, &config)?;

    let script = write_edit_script(&segments, profile.framerate)?;
    if cli.dry_run {
        println!("{} {}", style("Edit script:").cyan(), script.display());
        return Ok(());
    }

    if shutdown.load(Ordering::SeqCst) {
        let _ = std::fs::remove_file(&script);
        return Err(PipelineError::Interrupted.into());
    }

    let output = output_path(cli);
    let result = compose(&encoder, &script, &output, &profile);
    let _ = std::fs::remove_file(&script);
    result?;

    if !cli.quiet {
        println!(
            "{} {} ({} segments, ~{:.1}s)",
            style("Wrote").green().bold(),
            output.display(),
            segments.len(),
            segments.len() as f64 * config.sample_duration
        );
    }
    info!("wrote {} with {} segments", output.display(), segments.len());
    Ok(())
}

fn output_path(cli: &Cli) -> PathBuf {
    cli.output.clone().unwrap_or_else(|| {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        PathBuf::from(format!("random_{now}.mp4"))
    })
}
