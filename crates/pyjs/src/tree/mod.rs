//! Compile tree: fragments of JavaScript text and their renderer.

mod fragment;
mod render;

pub use fragment::{Block, Expression, Fragment, Piece, Statement};
pub use render::Renderer;
