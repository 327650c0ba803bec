//! Turns a packed layout into a drawable scene and serializes scenes to SVG.

mod color;
mod export;
mod scene;

pub use color::{DepthColorScale, Rgb};
pub use export::{save_svg, to_svg_document, to_svg_string};
pub use scene::{LabelLine, LeafClickListener, Scene, SceneCircle, SceneNode, build_scene};
