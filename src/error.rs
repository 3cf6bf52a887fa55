use std::path::PathBuf;
use std::process::ExitStatus;

/// Failures of the generate-and-launch pipeline that are not plain I/O or parse errors.
#[derive(thiserror::Error, Debug)]
pub enum LaunchError {
    #[error("template '{name}' not found in {}", .dir.display())]
    TemplateNotFound { name: String, dir: PathBuf },

    #[error("failed to spawn renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open renderer log {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer '{program}' exited unsuccessfully ({status})")]
    RendererFailed { program: String, status: ExitStatus },
}
