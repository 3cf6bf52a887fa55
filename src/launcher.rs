use crate::config::AppConfig;
use crate::parser::SceneParser;
use crate::renderer::{ManimRenderer, RenderCommand};
use crate::script::InvocationParams;
use crate::templates::ScriptTemplate;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// How a run treats the renderer
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Announce the renderer command without starting it
    pub dry_run: bool,
    /// Also copy renderer output into this file
    pub log: Option<PathBuf>,
}

/// Generates the scene script and hands it to the renderer
pub struct SceneLauncher {
    template: ScriptTemplate,
    renderer: ManimRenderer,
}

/// What a run produced, for callers that want more than the exit status
#[derive(Debug)]
pub struct LaunchOutcome {
    pub script_path: PathBuf,
    pub command: RenderCommand,
}

impl SceneLauncher {
    pub fn new(template: ScriptTemplate, renderer: ManimRenderer) -> Self {
        Self { template, renderer }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let dir = config
            .template_dir()
            .context("Failed to locate template directory")?;
        log::info!("Template directory: {}", dir.display());

        Ok(Self::new(
            ScriptTemplate::new(dir),
            ManimRenderer::new(config.renderer.program.clone()),
        ))
    }

    /// Write the script next to the input. Nothing touches disk unless the template render succeeded.
    pub fn generate(&self, params: &InvocationParams) -> Result<PathBuf> {
        let scene = SceneParser::parse_json(&params.input)?;
        log::info!("Loaded scene {}", SceneParser::summarize(&scene));

        let rendered = self.template.render(&scene, &params.scene_class)?;

        let script_path = params.script_path();
        fs::write(&script_path, &rendered)
            .with_context(|| format!("Failed to write script: {}", script_path.display()))?;

        log::info!("Wrote {}", script_path.display());
        log::debug!("Script sha256: {:x}", Sha256::digest(rendered.as_bytes()));

        Ok(script_path)
    }

    /// Full pipeline. With `dry_run` the renderer is announced but never started.
    pub fn run(&self, params: &InvocationParams, options: &RunOptions) -> Result<LaunchOutcome> {
        let script_path = self.generate(params)?;
        let command = self.renderer.command(params, &script_path);

        println!("Running: {}", command);

        if !options.dry_run {
            match &options.log {
                Some(log) => command.run_logged(log)?,
                None => command.run()?,
            }
        }

        Ok(LaunchOutcome {
            script_path,
            command,
        })
    }
}
