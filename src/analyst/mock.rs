// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock model for testing
//!
//! Returns queued replies in order and records every request, so turns can
//! be exercised without a real model.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::model::{AnalysisModel, PatchRequest};
use crate::error::Result;

/// A scripted model
#[derive(Clone, Default)]
pub struct MockModel {
    /// Queued replies; the last one repeats once the queue runs dry
    replies: Arc<Mutex<VecDeque<String>>>,
    /// Artificial latency per call
    delay: Option<Duration>,
    /// Call counter
    call_count: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<PatchRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock model lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `text`
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.with_replies(vec![text.into()])
    }

    /// Queue replies (returned in order)
    pub fn with_replies(self, texts: Vec<String>) -> Self {
        {
            let mut replies = lock(&self.replies);
            replies.clear();
            replies.extend(texts);
        }
        self
    }

    /// Sleep before every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls made
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn recorded_requests(&self) -> Vec<PatchRequest> {
        lock(&self.recorded_requests).clone()
    }
}

#[async_trait]
impl AnalysisModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn propose(&self, request: &PatchRequest) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.recorded_requests).push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut replies = lock(&self.replies);
        let reply = if replies.len() > 1 {
            replies.pop_front().unwrap_or_default()
        } else {
            replies.front().cloned().unwrap_or_default()
        };
        Ok(reply)
    }
}
