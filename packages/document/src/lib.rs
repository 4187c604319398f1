//! # Pagekit Document
//!
//! The page document model shared by every other pagekit crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Document + Section + SectionKind  │
//! │  - typed prop views with fixed defaults     │
//! │  - glyph resolver, id generation, templates │
//! └─────────────────────────────────────────────┘
//!          ↓                        ↓
//! ┌──────────────────┐   ┌──────────────────────┐
//! │ compiler-html    │   │ renderer (VNode tree)│
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! Both render paths read section props exclusively through [`SectionView`],
//! so a default value or a conditional branch can only be defined once.

pub mod document;
pub mod error;
pub mod glyph;
pub mod id_generator;
pub mod kind;
pub mod props;
pub mod style;
pub mod templates;

pub use document::{Document, Metadata, Props, Section, Styles, Theme};
pub use error::DocumentError;
pub use glyph::Glyph;
pub use kind::SectionKind;
pub use props::SectionView;
pub use templates::Template;
