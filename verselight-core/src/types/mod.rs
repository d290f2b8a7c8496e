//! Domain types for VerseLight.
//!
//! - [`Testament`], [`ScripturePassage`], [`ValidatedVerse`]: verse lookup
//! - [`ChatMessage`], [`ChatOptions`], [`Completion`], [`Usage`]: text-completion exchange
//! - [`ExplainResponse`], [`ContextResponse`], [`CrossRefResponse`],
//!   [`TranslateResponse`], [`VideoResponse`]: the JSON contracts served to the UI

mod completion;
mod enrichment;
mod verse;

pub use completion::*;
pub use enrichment::*;
pub use verse::*;
