use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Lines kept in [`JobStatus::log_preview`]
pub const PREVIEW_LINES: usize = 12;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI pattern"));
static CR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r+").expect("valid CR pattern"));
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3})%").expect("valid percent pattern"));
static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").expect("valid fraction pattern"));

/// Snapshot of a render job, built from its output directory and log.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    /// Top-level entries of the output directory
    pub files: Vec<String>,
    /// Rendered videos, relative to the output directory
    pub mp4s: Vec<String>,
    pub done: bool,
    pub log: String,
    pub log_preview: String,
    pub progress: Option<u32>,
}

impl JobStatus {
    /// Inspect `outdir` and, if given, the renderer log.
    ///
    /// A missing output directory or log reads as empty. It is an error only
    /// when neither exists.
    pub fn collect(outdir: &Path, log_path: Option<&Path>) -> Result<Self> {
        let log_exists = log_path.is_some_and(Path::exists);
        if !outdir.exists() && !log_exists {
            anyhow::bail!("No render job found at {}", outdir.display());
        }

        let files = list_names(outdir)?;
        let mut mp4s = Vec::new();
        find_mp4s(outdir, outdir, &mut mp4s)?;
        mp4s.sort();

        let raw = match log_path {
            Some(path) if log_exists => fs::read(path)
                .with_context(|| format!("Failed to read render log: {}", path.display()))?,
            _ => Vec::new(),
        };
        let log = sanitize_log(&String::from_utf8_lossy(&raw));
        let lines: Vec<&str> = log.split('\n').filter(|l| !l.trim().is_empty()).collect();

        let progress = extract_progress(&lines);
        let log_preview = lines[lines.len().saturating_sub(PREVIEW_LINES)..].join("\n");

        Ok(Self {
            files,
            done: !mp4s.is_empty(),
            mp4s,
            log,
            log_preview,
            progress,
        })
    }

    /// Human-readable report
    pub fn summarize(&self) -> String {
        let mut summary = String::new();
        let state = if self.done { "done" } else { "in progress" };
        summary.push_str(&format!("Status: {}\n", state));
        match self.progress {
            Some(p) => summary.push_str(&format!("Progress: {}%\n", p)),
            None => summary.push_str("Progress: unknown\n"),
        }
        summary.push_str(&format!("Files: {}\n", self.files.len()));
        for mp4 in &self.mp4s {
            summary.push_str(&format!("  Video: {}\n", mp4));
        }
        if !self.log_preview.is_empty() {
            summary.push_str("\nLog:\n");
            summary.push_str(&self.log_preview);
            summary.push('\n');
        }
        summary
    }
}

/// Strip ANSI color codes and turn carriage-return runs into line breaks.
pub fn sanitize_log(raw: &str) -> String {
    let clean = ANSI_RE.replace_all(raw, "");
    CR_RE.replace_all(&clean, "\n").into_owned()
}

/// Most recent progress in percent, scanning lines from the end.
///
/// A line's `N%` wins when 0..=100, otherwise its `N/M` is used when
/// `M > 0` and `N <= M`.
pub fn extract_progress<S: AsRef<str>>(lines: &[S]) -> Option<u32> {
    for line in lines.iter().rev() {
        let line = line.as_ref();

        if let Some(caps) = PERCENT_RE.captures(line) {
            if let Ok(p) = caps[1].parse::<u32>() {
                if p <= 100 {
                    return Some(p);
                }
            }
        }

        if let Some(caps) = FRACTION_RE.captures(line) {
            if let (Ok(current), Ok(total)) = (caps[1].parse::<u64>(), caps[2].parse::<u64>()) {
                if total > 0 && current <= total {
                    return Some((current as f64 / total as f64 * 100.0).round() as u32);
                }
            }
        }
    }
    None
}

fn list_names(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read output directory: {}", dir.display()))?
    {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

// Manim nests videos under videos/<script>/<quality>/
fn find_mp4s(root: &Path, dir: &Path, found: &mut Vec<String>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read output directory: {}", dir.display()))?
    {
        let path: PathBuf = entry?.path();
        if path.is_dir() {
            find_mp4s(root, &path, found)?;
        } else if path.extension().is_some_and(|ext| ext == "mp4") {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            found.push(rel.to_string_lossy().into_owned());
        }
    }
    Ok(())
}
