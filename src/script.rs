use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCENE_CLASS: &str = "GeneratedScene";
pub const DEFAULT_SCRIPT_NAME: &str = "generated_scene.py";
pub const DEFAULT_QUALITY: &str = "low";

/// Render quality tier handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    #[default]
    Low,
    Medium,
    High,
}

impl Quality {
    /// Exact-match lookup. Anything unrecognised is `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "low" => Some(Quality::Low),
            "medium" => Some(Quality::Medium),
            "high" => Some(Quality::High),
            _ => None,
        }
    }

    /// Like [`Quality::parse`] but falls back to `Low` for unknown names.
    pub fn from_name_lenient(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::debug!("Unknown quality '{}', falling back to '{}'", name, Quality::Low);
            Quality::Low
        })
    }

    pub fn flag(self) -> &'static str {
        match self {
            Quality::Low => "-ql",
            Quality::Medium => "-qm",
            Quality::High => "-qh",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        };
        f.write_str(name)
    }
}

/// Everything a single generate-and-render run needs
#[derive(Debug, Clone)]
pub struct InvocationParams {
    pub input: PathBuf,
    pub outdir: PathBuf,
    pub scene_class: String,
    pub script_name: String,
    pub quality: Quality,
}

impl InvocationParams {
    pub fn new(input: impl Into<PathBuf>, outdir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            outdir: outdir.into(),
            scene_class: DEFAULT_SCENE_CLASS.to_string(),
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            quality: Quality::default(),
        }
    }

    /// Generated script location: the input's directory joined with the script name
    pub fn script_path(&self) -> PathBuf {
        input_dir(&self.input).join(&self.script_name)
    }
}

/// Directory containing `path`; a bare file name lives in the current directory.
pub fn input_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
