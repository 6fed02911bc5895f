use crate::config::TargetProfile;
use crate::error::PipelineError;
use crate::tools::{Encoder, fingerprint_file};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// An input file identified by its content fingerprint.
#[derive(Debug, Clone)]
pub struct SourceVideo {
    pub path: PathBuf,
    pub fingerprint: String,
}

impl SourceVideo {
    /// Fingerprint a source file. Unreadable files (missing, permission)
    /// fail here, before any encoder interaction.
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let fingerprint =
            fingerprint_file(path).map_err(|e| PipelineError::Conversion {
                path: path.to_path_buf(),
                reason: format!("cannot read source: {e}"),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            fingerprint,
        })
    }
}

/// A source already rescaled and retimed to the target profile, living in
/// the profile's cache directory. Never deleted by this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVideo {
    pub key: String,
    pub path: PathBuf,
}

/// Deterministic cache location for a fingerprint within a build directory.
#[must_use]
pub fn cache_path(build_dir: &Path, key: &str) -> PathBuf {
    build_dir.join(format!("{key}.mp4"))
}

/// Normalize one source into the profile's cache, reusing an existing entry
/// when present.
///
/// A cache hit costs one existence check. On a miss, the encoder writes to a
/// process-unique temporary path which is renamed into place only on
/// success, so a concurrent reader never observes a partial entry.
pub fn ensure_normalized(
    encoder: &Encoder,
    source: &SourceVideo,
    profile: &TargetProfile,
    build_dir: &Path,
) -> Result<NormalizedVideo, PipelineError> {
    if !build_dir.exists() {
        fs::create_dir_all(build_dir)?;
    }

    let path = cache_path(build_dir, &source.fingerprint);
    if path.is_file() {
        return Ok(NormalizedVideo {
            key: source.fingerprint.clone(),
            path,
        });
    }

    let part_path = build_dir.join(format!(
        "{}.{}.part.mp4",
        source.fingerprint,
        std::process::id()
    ));

    let mut cmd = encoder.command();
    cmd.args(["-y", "-i"])
        .arg(&source.path)
        .args(["-c:v", "libx264", "-vf"])
        .arg(format!("scale={},fps={}", profile.scale(), profile.framerate))
        .args(["-crf", &profile.crf.to_string()])
        .args(["-video_track_timescale", "90000", "-an", "-f", "mp4"])
        .arg(&part_path);

    match encoder.run(&mut cmd) {
        Ok(()) => {
            fs::rename(&part_path, &path)?;
            Ok(NormalizedVideo {
                key: source.fingerprint.clone(),
                path,
            })
        }
        Err(e) => {
            let _ = fs::remove_file(&part_path);
            Err(PipelineError::Conversion {
                path: source.path.clone(),
                reason: e.to_string(),
            })
        }
    }
}

/// Normalize every input into the profile's cache and assemble the sampling
/// pool, in input order, with duplicates preserved.
///
/// Each unique fingerprint is converted at most once; sources that fail to
/// read or convert are dropped with a warning and the run continues.
pub fn convert_all(
    encoder: &Encoder,
    inputs: &[PathBuf],
    profile: &TargetProfile,
    base_dir: &Path,
    shutdown: &AtomicBool,
    quiet: bool,
) -> Result<Vec<NormalizedVideo>, PipelineError> {
    let build_dir = base_dir.join(profile.build_dir_name());
    if !build_dir.exists() {
        fs::create_dir_all(&build_dir)?;
    }

    let mut sources = Vec::new();
    for path in inputs {
        match SourceVideo::open(path) {
            Ok(source) => sources.push(source),
            Err(e) => warn!("skipping source: {e}"),
        }
    }

    // One conversion per unique fingerprint, first occurrence wins.
    let mut seen = HashSet::new();
    let mut hits: HashMap<String, NormalizedVideo> = HashMap::new();
    let mut pending: Vec<&SourceVideo> = Vec::new();
    for source in &sources {
        if !seen.insert(source.fingerprint.clone()) {
            continue;
        }
        let path = cache_path(&build_dir, &source.fingerprint);
        if path.is_file() {
            hits.insert(
                source.fingerprint.clone(),
                NormalizedVideo {
                    key: source.fingerprint.clone(),
                    path,
                },
            );
        } else {
            pending.push(source);
        }
    }

    if !quiet {
        println!(
            "{}",
            style(format!("Found {} videos", seen.len())).green()
        );
        println!("{}", style(format!("{} already converted", hits.len())).dim());
        if !pending.is_empty() {
            println!(
                "{}",
                style(format!("Converting {} videos...", pending.len())).cyan()
            );
        }
    }
    info!(
        "normalizing {} sources ({} cached) into {}",
        seen.len(),
        hits.len(),
        build_dir.display()
    );

    let progress_bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(pending.len() as u64)
    };
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );

    let converted: Vec<Option<NormalizedVideo>> = pending
        .par_iter()
        .map(|&source| {
            if shutdown.load(Ordering::SeqCst) {
                return None;
            }
            let result = ensure_normalized(encoder, source, profile, &build_dir);
            progress_bar.inc(1);
            match result {
                Ok(video) => {
                    if !quiet {
                        progress_bar.println(format!(
                            "OK {} -> {}",
                            source.path.display(),
                            video.path.display()
                        ));
                    }
                    Some(video)
                }
                Err(e) => {
                    warn!("{e}");
                    if !quiet {
                        progress_bar.println(format!("KO {}", source.path.display()));
                    }
                    None
                }
            }
        })
        .collect();
    progress_bar.finish_and_clear();

    if shutdown.load(Ordering::SeqCst) {
        return Err(PipelineError::Interrupted);
    }

    let mut normalized = hits;
    for video in converted.into_iter().flatten() {
        normalized.insert(video.key.clone(), video);
    }

    // Pool keeps input order; a file listed twice keeps double weight.
    Ok(sources
        .iter()
        .filter_map(|source| normalized.get(&source.fingerprint).cloned())
        .collect())
}
