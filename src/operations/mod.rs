//! Operations module
//!
//! The generation pipeline: placeholder substitution, fragment building,
//! template rendering, JSON validation and output

pub mod fragment;
pub mod generate;
pub mod render;
pub mod substitute;
pub mod validate;

pub use generate::*;
pub use render::{DocumentKind, RenderedDocument, Templates, render};
pub use substitute::{placeholders, substitute, substitute_strict};
pub use validate::{validate, validate_all};
