use crate::error::LaunchError;
use crate::script::{input_dir, InvocationParams};
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Launches the external Manim renderer against a generated script
pub struct ManimRenderer {
    program: String,
}

/// A fully resolved renderer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl ManimRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build `<program> <quality-flag> <script> <scene-class> --media_dir <outdir>`.
    ///
    /// The child runs inside the script's directory, so the script path is made
    /// absolute first. `outdir` is passed through as given and a relative one
    /// resolves against the script's directory.
    pub fn command(&self, params: &InvocationParams, script_path: &Path) -> RenderCommand {
        let script = absolute(script_path);
        let cwd = input_dir(&script).to_path_buf();

        let args = vec![
            OsString::from(params.quality.flag()),
            script.into_os_string(),
            OsString::from(&params.scene_class),
            OsString::from("--media_dir"),
            params.outdir.clone().into_os_string(),
        ];

        RenderCommand {
            program: self.program.clone(),
            args,
            cwd,
        }
    }
}

impl RenderCommand {
    /// Run to completion with inherited stdio. Only a zero exit counts as success.
    pub fn run(&self) -> Result<(), LaunchError> {
        log::debug!("Renderer working directory: {}", self.cwd.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        self.check(status)
    }

    /// Like [`RenderCommand::run`], but the child's stdout and stderr are also
    /// copied into `log_path`, followed by a `Process exited with code N` line.
    pub fn run_logged(&self, log_path: &Path) -> Result<(), LaunchError> {
        let sink = File::create(log_path).map_err(|source| LaunchError::Log {
            path: log_path.to_path_buf(),
            source,
        })?;
        let sink = Arc::new(Mutex::new(sink));

        log::debug!("Renderer working directory: {}", self.cwd.display());
        log::info!("Teeing renderer output to {}", log_path.display());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut pumps = Vec::new();
        if let Some(out) = child.stdout.take() {
            pumps.push(tee(out, io::stdout(), Arc::clone(&sink)));
        }
        if let Some(err) = child.stderr.take() {
            pumps.push(tee(err, io::stderr(), Arc::clone(&sink)));
        }

        let status = child.wait().map_err(|source| LaunchError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        for pump in pumps {
            let _ = pump.join();
        }

        let code = status
            .code()
            .map_or_else(|| "null".to_string(), |c| c.to_string());
        let footer = match sink.lock() {
            Ok(mut file) => writeln!(file, "\nProcess exited with code {}", code),
            Err(_) => Ok(()),
        };
        if let Err(e) = footer {
            log::warn!("Failed to append exit code to {}: {}", log_path.display(), e);
        }

        self.check(status)
    }

    fn check(&self, status: ExitStatus) -> Result<(), LaunchError> {
        if !status.success() {
            return Err(LaunchError::RendererFailed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Copy `src` to both `console` and the shared log until EOF.
fn tee<R, W>(mut src: R, mut console: W, sink: Arc<Mutex<File>>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            let n = match src.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            let _ = console.write_all(&buf[..n]);
            let _ = console.flush();
            if let Ok(mut file) = sink.lock() {
                if let Err(e) = file.write_all(&buf[..n]) {
                    log::warn!("Failed to write renderer log: {}", e);
                }
            }
        }
    })
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
