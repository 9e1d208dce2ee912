//! Python to JavaScript translation.
//!
//! # Architecture
//!
//! ```text
//! Python source ──> pyjs_syntax::Module ──> Dispatcher ──> Fragment tree ──> Renderer ──> JavaScript
//!                     (typed syntax)       (dispatch/)       (tree/)          (tree/)
//! ```
//!
//! Handlers in [`dispatch`] lower one syntax node at a time into
//! [`tree`] fragments, consulting the [`tables`] for builtin renames and
//! operators. Layout (indentation, terminators, brace placement) is only
//! decided when the finished fragment tree is rendered.
//!
//! # Example
//!
//! ```ignore
//! use pyjs::{jsify, TranspileOptions};
//!
//! let js = jsify("print('hi')", "hello.py", &TranspileOptions::default())?;
//! assert!(js.ends_with("console.log(\"hi\");\n"));
//! ```
//!
//! The output `require`s a small runtime adapter (`unholy_js.js`) for the
//! Python builtins that have no direct JavaScript counterpart.

pub mod dispatch;
pub mod error;
pub mod options;
pub mod tables;
pub mod tree;

#[cfg(test)]
mod tests;

pub use dispatch::{Dispatcher, Node};
pub use error::{Result, TranspileError};
pub use options::{KeywordArguments, TranspileOptions};
pub use tree::{Block, Expression, Fragment, Renderer, Statement};

use pyjs_syntax::Module;
use tracing::info;

/// Lower a parsed module to its fragment tree.
pub fn compile(module: &Module, options: &TranspileOptions) -> Result<Block> {
    let fragments = Dispatcher::new(options).dispatch(Node::Module(module))?;
    Ok(Block::unbraced(fragments))
}

/// Translate a parsed module to JavaScript text ending in one newline.
pub fn translate(module: &Module, options: &TranspileOptions) -> Result<String> {
    let root = Fragment::Block(compile(module, options)?);
    let text = Renderer::new(options.indent_width, 1).render(&root, 0);
    Ok(format!("{}\n", text.trim_end_matches('\n')))
}

/// Parse and translate Python source. `filename` only labels errors.
pub fn jsify(source: &str, filename: &str, options: &TranspileOptions) -> Result<String> {
    let module = pyjs_syntax::read_python(source)
        .map_err(|err| TranspileError::from(err).in_file(filename))?;
    let output = translate(&module, options).map_err(|err| err.in_file(filename))?;
    info!(
        filename,
        statements = module.body.len(),
        bytes = output.len(),
        "translated module"
    );
    Ok(output)
}
