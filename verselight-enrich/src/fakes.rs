//! In-memory stand-ins for the upstream services.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use verselight_cache::ResponseCache;
use verselight_core::constants::ESV_COPYRIGHT;
use verselight_core::error::{Result, VerseError};
use verselight_core::traits::{CompletionClient, ScriptureClient, VideoSearchClient};
use verselight_core::types::{
    ChatMessage, ChatOptions, Completion, ScripturePassage, Usage, Video,
};

use crate::Enricher;

/// Replies queued in order; an empty queue is an upstream failure.
#[derive(Default)]
pub(crate) struct FakeCompletion {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, ChatOptions)>>,
    calls: AtomicUsize,
}

impl FakeCompletion {
    pub(crate) fn push(&self, reply: Result<String>) {
        self.replies.lock().push_back(reply);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_options(&self) -> Option<ChatOptions> {
        self.requests.lock().last().map(|(_, o)| o.clone())
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .push((messages.to_vec(), options.clone()));

        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(VerseError::upstream("openai", "no reply queued")))?;

        Ok(Completion {
            content: reply,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            }),
        })
    }
}

/// Passages keyed by the exact (trimmed) input they answer.
#[derive(Default)]
pub(crate) struct FakeScripture {
    passages: Mutex<HashMap<String, ScripturePassage>>,
    down: AtomicBool,
}

impl FakeScripture {
    pub(crate) fn insert(&self, input: &str, canonical: &str, text: &str) {
        self.passages.lock().insert(
            input.to_string(),
            ScripturePassage {
                canonical: canonical.to_string(),
                text: text.to_string(),
                copyright: ESV_COPYRIGHT.to_string(),
            },
        );
    }

    pub(crate) fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScriptureClient for FakeScripture {
    async fn passage(&self, reference: &str) -> Result<Option<ScripturePassage>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(VerseError::upstream("esv", "ESV API error: 503"));
        }
        Ok(self.passages.lock().get(reference).cloned())
    }
}

/// Results keyed by full query string; unknown queries return nothing.
pub(crate) struct FakeVideos {
    results: Mutex<HashMap<String, std::result::Result<Vec<Video>, String>>>,
    queries: Mutex<Vec<(String, u32)>>,
    configured: AtomicBool,
}

impl Default for FakeVideos {
    fn default() -> Self {
        Self {
            results: Mutex::default(),
            queries: Mutex::default(),
            configured: AtomicBool::new(true),
        }
    }
}

impl FakeVideos {
    pub(crate) fn respond(&self, query: &str, videos: Vec<Video>) {
        self.results.lock().insert(query.to_string(), Ok(videos));
    }

    pub(crate) fn fail(&self, query: &str) {
        self.results
            .lock()
            .insert(query.to_string(), Err("YouTube API error: 403".to_string()));
    }

    pub(crate) fn unconfigure(&self) {
        self.configured.store(false, Ordering::SeqCst);
    }

    pub(crate) fn queries(&self) -> Vec<(String, u32)> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl VideoSearchClient for FakeVideos {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>> {
        self.queries.lock().push((query.to_string(), max_results));
        match self.results.lock().get(query) {
            Some(Ok(videos)) => Ok(videos.clone()),
            Some(Err(reason)) => Err(VerseError::upstream("youtube", reason.clone())),
            None => Ok(Vec::new()),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }
}

/// Handles onto the fakes behind an [`Enricher`].
pub(crate) struct Fakes {
    pub(crate) completion: Arc<FakeCompletion>,
    pub(crate) scripture: Arc<FakeScripture>,
    pub(crate) videos: Arc<FakeVideos>,
}

/// Builds an enricher over fresh fakes and an empty cache, with `replies`
/// queued on the completion fake.
pub(crate) fn enricher_with(replies: Vec<Result<String>>) -> (Enricher, Fakes) {
    let fakes = Fakes {
        completion: Arc::new(FakeCompletion::default()),
        scripture: Arc::new(FakeScripture::default()),
        videos: Arc::new(FakeVideos::default()),
    };
    for reply in replies {
        fakes.completion.push(reply);
    }

    let enricher = Enricher::new(
        fakes.completion.clone(),
        fakes.scripture.clone(),
        fakes.videos.clone(),
        Arc::new(ResponseCache::new()),
    );
    (enricher, fakes)
}

pub(crate) fn video(id: &str) -> Video {
    Video {
        video_id: id.to_string(),
        title: format!("Video {}", id),
        channel: "Grace Church".to_string(),
        thumbnail: format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", id),
        published_at: "2023-05-01T12:00:00Z".to_string(),
    }
}
