use crate::error::PipelineError;
use crate::pipeline::scheduler::Segment;
use crate::tools::format_timestamp;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Serialize segments in the encoder's concat script grammar: a version
/// header, then one (file, inpoint, outpoint) triple per segment.
pub fn render_script<W: Write>(
    out: &mut W,
    segments: &[Segment],
    framerate: u32,
) -> io::Result<()> {
    writeln!(out, "ffconcat version 1.0")?;
    for segment in segments {
        writeln!(out, "file '{}'", segment.source.display())?;
        writeln!(out, "inpoint {}", format_timestamp(segment.inpoint, framerate))?;
        writeln!(out, "outpoint {}", format_timestamp(segment.outpoint, framerate))?;
    }
    Ok(())
}

/// Write the edit script to a persisted temporary file and return its path.
/// The caller owns the file: it is removed after composition, or kept for
/// inspection in dry-run mode.
pub fn write_edit_script(
    segments: &[Segment],
    framerate: u32,
) -> Result<PathBuf, PipelineError> {
    let mut file = NamedTempFile::with_prefix("videomix-")?;
    render_script(&mut file, segments, framerate)?;
    let (_, path) = file.keep().map_err(|e| PipelineError::Io(e.error))?;
    Ok(path)
}
