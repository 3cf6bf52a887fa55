pub mod config;
pub mod error;
pub mod launcher;
pub mod parser;
pub mod renderer;
pub mod script;
pub mod status;
pub mod templates;

pub use config::AppConfig;
pub use error::LaunchError;
pub use launcher::{LaunchOutcome, RunOptions, SceneLauncher};
pub use parser::SceneParser;
pub use renderer::{ManimRenderer, RenderCommand};
pub use script::{InvocationParams, Quality};
pub use status::JobStatus;
pub use templates::ScriptTemplate;
