//! Prompt construction and output cleaning for each content type.
//!
//! Both halves are pure functions over strings: [`build_prompt`] turns a
//! content type and the caller's input into an instruction prompt, and
//! [`clean_output`] turns raw model output into the text returned to callers.

#![warn(missing_docs, clippy::pedantic)]

pub mod builder;
pub mod cleaner;
pub mod template;

pub use builder::{add_context, build_prompt, build_short_prompt, insert_context};
pub use cleaner::{ARTIFACT_MARKERS, DEFAULT_EMAIL_SUBJECT, clean_output};
pub use template::{CustomTemplate, TemplateError, TemplateResult};
