use crate::config::RunConfig;
use crate::error::PipelineError;
use crate::pipeline::cache::NormalizedVideo;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::path::PathBuf;

/// One sampled clip: a half-open frame range within a normalized source.
///
/// `outpoint` may land past the end of the source; the encoder clamps it,
/// so the emitted clip is merely shorter than requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub source: PathBuf,
    pub inpoint: i64,
    pub outpoint: i64,
}

/// Sample segments from the pool until the requested total duration is
/// covered.
///
/// Deterministic for a fixed (pool order, frame counts, seed): every random
/// draw comes from one seeded generator in a fixed order. Each iteration
/// picks a pool entry uniformly with replacement; entries with a
/// non-positive frame count are skipped without advancing the elapsed time.
/// The in-point draw is confined to the leading `1 - 2 * ignore_fraction`
/// proportion of the source timeline, so only the tail exclusion is ever
/// applied to the upper bound of the range.
///
/// The last segment may push the sampled total past `total_duration` by
/// less than one `sample_duration`, never under it.
pub fn schedule(
    pool: &[NormalizedVideo],
    frame_counts: &HashMap<PathBuf, i64>,
    config: &RunConfig,
) -> Result<Vec<Segment>, PipelineError> {
    if pool.is_empty() {
        return Err(PipelineError::Scheduling(
            "no sources survived normalization".to_string(),
        ));
    }
    // A pool with no positive frame count would otherwise draw forever.
    let frames_of =
        |video: &NormalizedVideo| frame_counts.get(&video.path).copied().unwrap_or(0);
    if !pool.iter().any(|video| frames_of(video) > 0) {
        return Err(PipelineError::Scheduling(
            "no source has a positive frame count".to_string(),
        ));
    }

    let usable = 1.0 - 2.0 * config.ignore_fraction;
    let sample_frames =
        (config.sample_duration * f64::from(config.profile.framerate)).round() as i64;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut segments = Vec::new();
    let mut elapsed = 0.0;
    while elapsed < config.total_duration {
        let video = &pool[rng.gen_range(0..pool.len())];
        let frame_count = frames_of(video);
        if frame_count <= 0 {
            continue;
        }
        let u: f64 = rng.gen_range(0.0..1.0);
        let inpoint = (u * frame_count as f64 * usable).round() as i64;
        segments.push(Segment {
            source: video.path.clone(),
            inpoint,
            outpoint: inpoint + sample_frames,
        });
        elapsed += config.sample_duration;
    }

    Ok(segments)
}
