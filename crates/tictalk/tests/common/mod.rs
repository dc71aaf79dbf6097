//! Shared test support: a scripted stub oracle.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tictalk::{Message, Oracle, OracleError, OracleStream};

/// Stub oracle that replays scripted replies and counts calls.
///
/// Each reply is emitted as two fragments to exercise in-order
/// assembly. `scripted` pops replies in order and repeats the last one
/// once the script runs out; `always` repeats a single reply forever.
pub struct StubOracle {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: AtomicU32,
    call_instants: Mutex<Vec<tokio::time::Instant>>,
}

impl StubOracle {
    pub fn scripted(replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let replies: VecDeque<String> = replies.into_iter().map(Into::into).collect();
        assert!(!replies.is_empty(), "script must not be empty");
        Self {
            replies: Mutex::new(replies),
            last: Mutex::new(String::new()),
            calls: AtomicU32::new(0),
            call_instants: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: impl Into<String>) -> Self {
        Self::scripted([reply.into()])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// When each call arrived, on the tokio clock.
    pub fn call_instants(&self) -> Vec<tokio::time::Instant> {
        self.call_instants.lock().unwrap().clone()
    }

    fn next_reply(&self) -> String {
        let mut replies = self.replies.lock().unwrap();
        match replies.pop_front() {
            Some(reply) => {
                *self.last.lock().unwrap() = reply.clone();
                reply
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

#[async_trait]
impl Oracle for StubOracle {
    async fn stream(&self, _messages: Vec<Message>) -> Result<OracleStream, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_instants
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        let reply = self.next_reply();
        let mid = reply.len() / 2;
        let fragments: Vec<Result<String, OracleError>> = if mid > 0 {
            vec![Ok(reply[..mid].to_string()), Ok(reply[mid..].to_string())]
        } else {
            vec![Ok(reply)]
        };
        Ok(Box::pin(futures::stream::iter(fragments)))
    }
}

/// Stub oracle whose stream always fails at the transport level.
pub struct FailingOracle;

#[async_trait]
impl Oracle for FailingOracle {
    async fn stream(&self, _messages: Vec<Message>) -> Result<OracleStream, OracleError> {
        Err(OracleError::new("connection refused".to_string()))
    }
}
