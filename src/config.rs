use crate::error::PipelineError;
use std::path::PathBuf;

/// Output encoding profile. Determines the conversion cache namespace: two
/// runs share cache entries only when their profiles match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile {
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
    pub crf: u32,
}

impl TargetProfile {
    /// Resolve output dimensions, deriving the missing one for 16:9.
    /// Both absent means 1920x1080.
    #[must_use]
    pub fn from_dimensions(
        width: Option<u32>,
        height: Option<u32>,
        framerate: u32,
        crf: u32,
    ) -> Self {
        let (width, height) = match (width, height) {
            (None, None) => (1920, 1080),
            (Some(w), None) => (w, (f64::from(w) * 9.0 / 16.0).round() as u32),
            (None, Some(h)) => ((f64::from(h) * 16.0 / 9.0).round() as u32, h),
            (Some(w), Some(h)) => (w, h),
        };
        Self {
            width,
            height,
            framerate,
            crf,
        }
    }

    /// Scale argument for the encoder's video filter, e.g. `1920:1080`.
    #[must_use]
    pub fn scale(&self) -> String {
        format!("{}:{}", self.width, self.height)
    }

    /// Cache directory name for this profile, e.g. `build_1920x1080_30fps`.
    #[must_use]
    pub fn build_dir_name(&self) -> String {
        format!("build_{}x{}_{}fps", self.width, self.height, self.framerate)
    }
}

/// Immutable parameters for one run. The seed fully determines the segment
/// sequence for a fixed pool and fixed frame counts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sources: Vec<PathBuf>,
    /// Requested total output duration in seconds.
    pub total_duration: f64,
    /// Duration of each sampled clip in seconds.
    pub sample_duration: f64,
    /// Fraction of each source timeline excluded from in-point draws,
    /// as a 0-1 ratio (10% => 0.10).
    pub ignore_fraction: f64,
    pub profile: TargetProfile,
    pub seed: u64,
}

impl RunConfig {
    /// Validate parameters before any cache or encoder interaction.
    pub fn new(
        sources: Vec<PathBuf>,
        total_duration: f64,
        sample_duration: f64,
        ignore_fraction: f64,
        profile: TargetProfile,
        seed: u64,
    ) -> Result<Self, PipelineError> {
        if sources.is_empty() {
            return Err(PipelineError::Config("no input videos".to_string()));
        }
        if !total_duration.is_finite() || total_duration <= 0.0 {
            return Err(PipelineError::Config(format!(
                "total duration must be positive, got {total_duration}"
            )));
        }
        if !sample_duration.is_finite() || sample_duration <= 0.0 {
            return Err(PipelineError::Config(format!(
                "sample duration must be positive, got {sample_duration}"
            )));
        }
        if !(0.0..0.5).contains(&ignore_fraction) {
            return Err(PipelineError::Config(format!(
                "ignore fraction must be in [0%, 50%), got {}%",
                ignore_fraction * 100.0
            )));
        }
        if profile.framerate == 0 || profile.width == 0 || profile.height == 0 {
            return Err(PipelineError::Config(
                "framerate and dimensions must be positive".to_string(),
            ));
        }
        Ok(Self {
            sources,
            total_duration,
            sample_duration,
            ignore_fraction,
            profile,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> TargetProfile {
        TargetProfile::from_dimensions(None, None, 30, 23)
    }

    #[test]
    fn test_default_dimensions() {
        let p = profile();
        assert_eq!((p.width, p.height), (1920, 1080));
        assert_eq!(p.scale(), "1920:1080");
    }

    #[test]
    fn test_derived_dimensions() {
        let p = TargetProfile::from_dimensions(None, Some(720), 30, 23);
        assert_eq!((p.width, p.height), (1280, 720));

        let p = TargetProfile::from_dimensions(Some(1280), None, 30, 23);
        assert_eq!((p.width, p.height), (1280, 720));
    }

    #[test]
    fn test_build_dir_name() {
        assert_eq!(profile().build_dir_name(), "build_1920x1080_30fps");
    }

    #[test]
    fn test_rejects_empty_sources() {
        let err = RunConfig::new(vec![], 60.0, 1.0, 0.1, profile(), 0).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_durations() {
        let sources = vec![PathBuf::from("/a.mp4")];
        for (total, sample) in [(0.0, 1.0), (-5.0, 1.0), (60.0, 0.0), (60.0, -1.0)] {
            let err =
                RunConfig::new(sources.clone(), total, sample, 0.1, profile(), 0).unwrap_err();
            assert!(matches!(err, PipelineError::Config(_)));
        }
    }

    #[test]
    fn test_rejects_out_of_range_ignore_fraction() {
        let sources = vec![PathBuf::from("/a.mp4")];
        for ignore in [-0.01, 0.5, 0.9] {
            let err =
                RunConfig::new(sources.clone(), 60.0, 1.0, ignore, profile(), 0).unwrap_err();
            assert!(matches!(err, PipelineError::Config(_)));
        }
    }
}
