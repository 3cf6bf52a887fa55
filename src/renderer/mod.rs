pub mod manim;

pub use manim::{ManimRenderer, RenderCommand};
