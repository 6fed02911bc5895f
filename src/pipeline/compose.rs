use crate::config::TargetProfile;
use crate::error::PipelineError;
use crate::tools::Encoder;
use std::path::Path;

/// Concatenate all scheduled segments into the final output file.
///
/// One encoder invocation reading the edit script through the concat
/// demuxer, honoring the script's inpoint/outpoint timestamps. Unlike
/// per-source conversion, a failure here is fatal for the run.
pub fn compose(
    encoder: &Encoder,
    script: &Path,
    output: &Path,
    profile: &TargetProfile,
) -> Result<(), PipelineError> {
    let mut cmd = encoder.command();
    cmd.args(["-y", "-f", "concat", "-safe", "0", "-i"])
        .arg(script)
        .args(["-c:v", "libx264"])
        .args(["-crf", &profile.crf.to_string()])
        .args(["-async", "1", "-an"])
        .arg(output);

    encoder
        .run(&mut cmd)
        .map_err(|e| PipelineError::Compose(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetProfile;
    use std::path::PathBuf;

    #[test]
    fn test_compose_failure_is_fatal_error() {
        let encoder = Encoder::new(PathBuf::from("/no/such/ffmpeg"), false, false);
        let profile = TargetProfile::from_dimensions(None, None, 30, 23);
        let err = compose(
            &encoder,
            Path::new("/tmp/script.ffconcat"),
            Path::new("/tmp/out.mp4"),
            &profile,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Compose(_)));
    }
}
