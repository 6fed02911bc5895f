use clap::Parser;
use std::path::PathBuf;

/// Randomize videos by taking small random samples and merging them
/// together.
#[derive(Parser, Debug)]
#[command(name = "videomix", version, about)]
pub struct Cli {
    /// Output video path (default: random_<unix-time>.mp4)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Duration of the output video in seconds
    #[arg(short, long, default_value_t = 60.0)]
    pub duration: f64,

    /// Duration of each sampled clip in seconds
    #[arg(short, long, default_value_t = 1.0)]
    pub sample: f64,

    /// Output video height in pixels (default: 1080, or derived from
    /// --width for 16:9)
    #[arg(long)]
    pub height: Option<u32>,

    /// Output video width in pixels (default: derived from --height for
    /// 16:9)
    #[arg(long)]
    pub width: Option<u32>,

    /// Output video framerate
    #[arg(short, long, default_value_t = 30)]
    pub framerate: u32,

    /// Source content to ignore at start and end, in percent
    #[arg(short, long, default_value_t = 10.0)]
    pub ignore: f64,

    /// libx264 constant rate factor
    #[arg(long, default_value_t = 23)]
    pub crf: u32,

    /// Random seed (default: randomized; echoed for reproduction)
    #[arg(short = 'r', long)]
    pub seed: Option<u64>,

    /// Write the edit script but skip the final composition
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors are still reported)
    #[arg(short, long)]
    pub quiet: bool,

    /// Discard encoder output instead of forwarding it
    #[arg(long)]
    pub encoder_quiet: bool,

    /// Path to the ffmpeg binary (default: resolved from PATH)
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Input video files or directories
    #[arg(required = true)]
    pub file: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["videomix", "a.mp4"]);
        assert!((cli.duration - 60.0).abs() < f64::EPSILON);
        assert!((cli.sample - 1.0).abs() < f64::EPSILON);
        assert_eq!(cli.framerate, 30);
        assert!((cli.ignore - 10.0).abs() < f64::EPSILON);
        assert_eq!(cli.crf, 23);
        assert!(cli.seed.is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.file, vec![PathBuf::from("a.mp4")]);
    }

    #[test]
    fn test_requires_at_least_one_input() {
        assert!(Cli::try_parse_from(["videomix"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "videomix",
            "-o",
            "out.mp4",
            "-d",
            "12.5",
            "-s",
            "0.5",
            "--height",
            "720",
            "-r",
            "42",
            "--dry-run",
            "a.mp4",
            "b.mp4",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("out.mp4")));
        assert!((cli.duration - 12.5).abs() < f64::EPSILON);
        assert!((cli.sample - 0.5).abs() < f64::EPSILON);
        assert_eq!(cli.height, Some(720));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.dry_run);
        assert_eq!(cli.file.len(), 2);
    }
}
