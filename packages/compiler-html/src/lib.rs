//! # Pagekit HTML Compiler
//!
//! Static export of a page document: one self-contained HTML file with the
//! baseline stylesheet and toggle script inlined. Output depends only on the
//! document, so compiling the same document twice gives identical bytes.

mod assets;
mod compiler;

#[cfg(test)]
mod tests;

pub use assets::{BASE_CSS, SCRIPT};
pub use compiler::{compile, compile_section, compile_with_options, escape_html, unknown_comment, CompileOptions};
