//! In-process backend that replays canned replies.
//!
//! Useful for tests and for replaying a recorded conversation against the
//! dispatch loop without a network. Every request is recorded so callers can
//! assert on exactly what would have been sent.

use crate::backend::{CompletionBackend, CompletionProvider, CompletionRequest, CompletionResponse};
use crate::error::CompletionError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A backend that answers from a fixed queue of replies.
///
/// Once the queue is empty every call fails with [`CompletionError::NoChoices`].
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    /// Creates a backend that will return `replies` in order.
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a failure after the replies already queued.
    #[must_use]
    pub fn then_fail(self, error: CompletionError) -> Self {
        self.lock_replies().push_back(Err(error));
        self
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns how many times `complete` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, CompletionError>>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let next = self.lock_replies().pop_front();
        match next {
            Some(Ok(content)) => Ok(CompletionResponse::new(content, request.model.clone())),
            Some(Err(error)) => Err(error),
            None => Err(CompletionError::NoChoices),
        }
    }

    fn provider(&self) -> CompletionProvider {
        CompletionProvider::Local
    }
}
