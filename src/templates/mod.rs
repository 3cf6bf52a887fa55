pub mod json;
pub mod tree;

use crate::error::LaunchError;
use anyhow::{Context, Result};
use minijinja::{context, path_loader, AutoEscape, Environment, ErrorKind};
use std::path::{Path, PathBuf};

/// Name of the scene template inside the template directory
pub const SCENE_TEMPLATE: &str = "scene.py.j2";

/// Renders scene descriptions into renderer source files
pub struct ScriptTemplate {
    env: Environment<'static>,
    dir: PathBuf,
}

impl ScriptTemplate {
    /// Create a template set backed by `dir`. Nothing is read until [`ScriptTemplate::render`].
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();

        let mut env = Environment::new();
        env.set_loader(path_loader(dir.clone()));
        // Generated files are Python source, never markup
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("tojson", json::tojson);

        Self { env, dir }
    }

    /// Render the scene template with `scene_json` and `scene_class` in scope
    pub fn render(&self, scene_json: &serde_json::Value, scene_class: &str) -> Result<String> {
        let template = self.env.get_template(SCENE_TEMPLATE).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                anyhow::Error::new(LaunchError::TemplateNotFound {
                    name: SCENE_TEMPLATE.to_string(),
                    dir: self.dir.clone(),
                })
            } else {
                anyhow::Error::new(e).context(format!("Failed to load template {}", SCENE_TEMPLATE))
            }
        })?;

        template
            .render(context! {
                scene_json => tree::to_template_value(scene_json),
                scene_class => scene_class,
            })
            .with_context(|| format!("Failed to render template {}", SCENE_TEMPLATE))
    }
}
