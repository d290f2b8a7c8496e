use std::collections::HashSet;

use futures::future::join_all;
use tracing::{info, instrument, warn};

use verselight_core::constants::{MAX_VIDEOS, VIDEOS_PER_QUERY, VIDEO_QUERY_SUFFIXES};
use verselight_core::error::{Result, VerseError};
use verselight_core::types::{Video, VideoResponse};

use super::MISSING_REFERENCE;
use crate::enricher::require_fields;
use crate::Enricher;

/// Flattens result batches, keeping the first occurrence of each video id,
/// and truncates to `limit`.
pub fn merge_videos(batches: impl IntoIterator<Item = Vec<Video>>, limit: usize) -> Vec<Video> {
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|video| seen.insert(video.video_id.clone()))
        .take(limit)
        .collect()
}

impl Enricher {
    /// Searches sermon, study, and explainer videos for a reference.
    ///
    /// The three query variants run concurrently. A failing variant is
    /// skipped; only a missing credential fails the request. Not cached.
    #[instrument(skip(self))]
    pub async fn videos(&self, reference: &str) -> Result<VideoResponse> {
        let [reference] = require_fields([reference], MISSING_REFERENCE)?;

        if !self.videos.is_configured() {
            return Err(VerseError::MissingCredential("YOUTUBE_API_KEY"));
        }

        let queries: Vec<String> = VIDEO_QUERY_SUFFIXES
            .iter()
            .map(|suffix| format!("{} {}", reference, suffix))
            .collect();

        let results = join_all(
            queries
                .iter()
                .map(|query| self.videos.search(query, VIDEOS_PER_QUERY)),
        )
        .await;

        let batches = queries
            .iter()
            .zip(results)
            .filter_map(|(query, result)| match result {
                Ok(videos) => Some(videos),
                Err(e) => {
                    warn!(query = %query, error = %e, "Skipping failed video search");
                    None
                }
            });

        let videos = merge_videos(batches, MAX_VIDEOS);
        info!(reference, count = videos.len(), "Found videos");

        Ok(VideoResponse {
            reference: reference.to_string(),
            videos,
        })
    }
}
