//! Product description generation.
//!
//! [`Generator`] asks an LLM for a WooCommerce-ready HTML description;
//! [`render_fallback`] builds a simpler one locally when that fails.

pub mod ai;
pub mod error;
pub mod fallback;
pub mod generate;
pub mod types;

pub use error::GenerateError;
pub use fallback::render_fallback;
pub use generate::{strip_code_fences, Generator};
pub use types::{GeneratedHtml, GenerationRequest};
