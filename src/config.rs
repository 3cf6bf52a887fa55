use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub renderer: RendererConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RendererConfig {
    pub program: String, // executable looked up on PATH
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TemplatesConfig {
    /// Overrides `<exe dir>/templates`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig {
                program: "manim".to_string(),
            },
            templates: TemplatesConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("renderer.program", "manim")?
            // Load from file if exists
            .add_source(config::File::with_name("scenegen").required(false))
            // Allow env var overrides (e.g. SCENEGEN_RENDERER__PROGRAM=/usr/local/bin/manim)
            .add_source(
                config::Environment::with_prefix("SCENEGEN")
                    .prefix_separator("_")
                    .separator("__"),
            );

        builder.build()?.try_deserialize()
    }

    /// Directory holding the scene template.
    pub fn template_dir(&self) -> std::io::Result<PathBuf> {
        if let Some(dir) = &self.templates.dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()?;
        let base = exe
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(base.join("templates"))
    }
}
