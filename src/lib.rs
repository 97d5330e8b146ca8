//! Translation suggestions for strings that embed math (`$...$`), graphies (`![](...)`) and
//! widgets (`[[☃ ...]]`).
//!
//! Strings that differ only in those embedded substrings share a normalized form. An approved
//! translation of one of them becomes a [`template::Template`] that is filled with the embedded
//! substrings of the others, following the order the translator chose.

pub mod batch;
pub mod config;
pub mod console;
pub mod error;
pub mod ffi;
pub mod lang;
pub mod mapping;
pub mod normalize;
pub mod special;
pub mod suggest;
pub mod template;
pub mod trace;

#[cfg(test)]
mod test_utils;

pub use error::{SuggestError, SuggestResult};
pub use normalize::{group, group_by, normalize_string};
pub use special::SpecialKind;
pub use suggest::{auto_translate, suggest, suggest_by, Suggestion};
pub use template::{create_template, populate_template, Template};
