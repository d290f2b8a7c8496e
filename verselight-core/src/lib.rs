//! # VerseLight Core
//!
//! Core types, errors, and traits shared by every VerseLight crate.
//!
//! - **Types**: verses, passages, chat messages, and the shaped enrichment payloads
//! - **Errors**: one taxonomy separating client input, upstream, shape, and config failures
//! - **Constants**: cache TTLs, feature names, upstream defaults
//! - **Traits**: seams for the completion, scripture, and video-search services
//! - **Reference**: normalization and testament lookup for verse references
//!
//! ## Example
//!
//! ```rust
//! use verselight_core::{normalize_reference, Testament};
//!
//! assert_eq!(normalize_reference("  ROMANS 8:28–30 "), "romans 8:28-30");
//! assert_eq!(Testament::for_book("Romans"), Testament::New);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod reference;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Result, VerseError};
pub use reference::{normalize_reference, split_reference, ReferenceParts};
pub use traits::*;
pub use types::*;
