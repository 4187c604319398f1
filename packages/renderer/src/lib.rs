//! # Pagekit Renderer
//!
//! Interactive rendering of a page document into a virtual DOM tree of
//! selectable, editable regions. The static export lives in
//! `pagekit-compiler-html`; both read props through
//! [`pagekit_document::SectionView`].

pub mod render;
pub mod sections;
pub mod vdom;

#[cfg(test)]
mod tests_render;

#[cfg(test)]
mod tests_sections;

pub use render::{hit_test, render, Control, Hit, RenderState, EMPTY_STATE_HINT, EMPTY_STATE_TITLE};
pub use sections::{placeholder, render_section};
pub use vdom::{VNode, VirtualDomDocument};
