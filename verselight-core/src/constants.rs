//! Constants for VerseLight.
//!
//! Cache lifetimes, feature identifiers used in cache keys, and the defaults
//! for each upstream service.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live of a cached enrichment result (7 days).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default interval between background sweeps of expired entries (1 hour).
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Note returned alongside cache statistics.
pub const CACHE_NOTE: &str = "In-memory cache - resets on server restart";

// ═══════════════════════════════════════════════════════════════════════════════
// FEATURE IDENTIFIERS (cache key prefixes)
// ═══════════════════════════════════════════════════════════════════════════════

/// Bullet-point explanation.
pub const FEATURE_EXPLAIN: &str = "explain";

/// Historical and literary context.
pub const FEATURE_CONTEXT: &str = "context";

/// Scripture cross-references.
pub const FEATURE_CROSSREF: &str = "crossref";

/// Word-by-word original-language breakdown.
pub const FEATURE_TRANSLATE: &str = "translate";

// ═══════════════════════════════════════════════════════════════════════════════
// ENRICHMENT LIMITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum bullet points kept from an explanation.
pub const MAX_BULLET_POINTS: usize = 5;

/// Maximum cross-references kept per verse.
pub const MAX_CROSS_REFERENCES: usize = 5;

/// Maximum videos returned for a reference.
pub const MAX_VIDEOS: usize = 9;

/// Results requested per video query variant.
pub const VIDEOS_PER_QUERY: u32 = 4;

/// Suffixes appended to a reference to build the video query variants.
pub const VIDEO_QUERY_SUFFIXES: [&str; 3] = ["sermon", "Bible study", "explained"];

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default chat completion model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

/// Default ESV API base URL.
pub const DEFAULT_ESV_BASE_URL: &str = "https://api.esv.org";

/// Default YouTube Data API base URL.
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com";

/// Default timeout for upstream HTTP calls, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Attribution line returned with every ESV passage.
pub const ESV_COPYRIGHT: &str = "Scripture quotations are from the ESV® Bible";
