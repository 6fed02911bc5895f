use crate::error::PipelineError;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Handle on the external encoder binary.
///
/// The encoder is a black box: we hand it an argument list and look only at
/// its exit status. `echo` prints each command line before running it;
/// `forward` lets the child write to our stdout/stderr, otherwise its output
/// is discarded.
#[derive(Debug, Clone)]
pub struct Encoder {
    binary: PathBuf,
    echo: bool,
    forward: bool,
}

impl Encoder {
    #[must_use]
    pub const fn new(binary: PathBuf, echo: bool, forward: bool) -> Self {
        Self {
            binary,
            echo,
            forward,
        }
    }

    /// Resolve the encoder binary, preferring an explicit override path over
    /// a PATH lookup for `ffmpeg`.
    pub fn locate(
        override_path: Option<&Path>,
        echo: bool,
        forward: bool,
    ) -> Result<Self, PipelineError> {
        let binary = match override_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(PipelineError::EncoderNotFound(path.display().to_string()));
                }
                path.to_path_buf()
            }
            None => which::which("ffmpeg")
                .map_err(|_| PipelineError::EncoderNotFound("ffmpeg is not on PATH".to_string()))?,
        };
        debug!("using encoder binary {}", binary.display());
        Ok(Self {
            binary,
            echo,
            forward,
        })
    }

    /// A fresh `Command` for this binary; callers append their arguments.
    #[must_use]
    pub fn command(&self) -> Command {
        Command::new(&self.binary)
    }

    /// Run a prepared encoder command to completion. A non-zero exit status
    /// is an error; interpreting it (recoverable vs fatal) is the caller's
    /// concern.
    pub fn run(&self, cmd: &mut Command) -> io::Result<()> {
        if self.echo {
            println!("$ {}", render_cmdline(cmd));
        }
        let (stdout, stderr) = if self.forward {
            (Stdio::inherit(), Stdio::inherit())
        } else {
            (Stdio::null(), Stdio::null())
        };
        let status = cmd
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("encoder exited with {status}")))
        }
    }
}

fn render_cmdline(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_rejects_missing_override() {
        let err = Encoder::locate(Some(Path::new("/no/such/ffmpeg")), false, false).unwrap_err();
        assert!(matches!(err, PipelineError::EncoderNotFound(_)));
    }

    #[test]
    fn test_run_missing_binary_is_an_error() {
        let encoder = Encoder::new(PathBuf::from("/no/such/ffmpeg"), false, false);
        let mut cmd = encoder.command();
        cmd.arg("-version");
        assert!(encoder.run(&mut cmd).is_err());
    }

    #[test]
    fn test_render_cmdline() {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-y", "-i", "in.mp4", "out.mp4"]);
        assert_eq!(render_cmdline(&cmd), "ffmpeg -y -i in.mp4 out.mp4");
    }
}
