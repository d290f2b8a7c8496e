//! HTTP clients for the services VerseLight proxies.
//!
//! - [`OpenAiClient`]: chat completions
//! - [`EsvClient`]: ESV passage text
//! - [`YouTubeClient`]: YouTube Data v3 search
//!
//! Each implements the matching trait from `verselight-core`. Credentials are
//! optional at construction and checked on first use.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod esv;
mod http;
mod openai;
mod youtube;

pub use esv::{EsvClient, EsvConfig};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use youtube::{YouTubeClient, YouTubeConfig};
