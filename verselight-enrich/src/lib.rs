//! # VerseLight Enrichment
//!
//! The request protocol shared by every feature:
//!
//! 1. reject missing input before touching anything else
//! 2. serve from the response cache when possible
//! 3. otherwise ask the upstream service
//! 4. shape-validate what came back
//! 5. cache the shaped result
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use verselight_cache::ResponseCache;
//! use verselight_enrich::Enricher;
//!
//! let enricher = Enricher::new(completion, scripture, videos, Arc::new(ResponseCache::new()));
//!
//! let verse = enricher.validate_verse("John 3:16").await?;
//! let explained = enricher.explain(&verse.reference, &verse.verse_text).await?;
//! for point in explained.bullet_points {
//!     println!("- {}", point);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod enricher;
mod features;
pub mod prompts;
pub mod shape;

#[cfg(test)]
mod fakes;

pub use enricher::Enricher;
pub use features::videos::merge_videos;
