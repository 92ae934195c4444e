//! Background route generation over a message-passing boundary.
//!
//! The engine itself is synchronous. Callers that need to keep an
//! interactive thread free spawn a worker and talk to it over channels. Each
//! worker owns its own distance cache, so concurrent workers share no
//! mutable state.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::thread::{self, JoinHandle};

use crate::block::Block;
use crate::distance::DistanceCache;
use crate::engine::{EngineOptions, RouteResult, generate_routes_from_start};

/// One route-generation job.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start_block: Block,
    pub all_blocks: Vec<Block>,
    pub min_gap_minutes: f64,
}

/// Reply envelope. A call either fully succeeds or fully fails; there is no
/// partial result.
#[derive(Debug, Clone)]
pub enum RouteReply {
    Success(RouteResult),
    Error(String),
}

/// A dedicated route-generation thread.
///
/// Requests are served in submission order. The distance cache persists
/// across requests for the lifetime of the worker.
pub struct RouteWorker {
    requests: Sender<RouteRequest>,
    replies: Receiver<RouteReply>,
    handle: JoinHandle<()>,
}

impl RouteWorker {
    /// Spawn a worker with default engine options and a fresh cache.
    pub fn spawn() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<RouteRequest>();
        let (reply_tx, reply_rx) = mpsc::channel::<RouteReply>();

        let handle = thread::spawn(move || {
            let mut cache = DistanceCache::new();
            while let Ok(request) = request_rx.recv() {
                // Cache entries are idempotent, so the cache stays usable
                // even if a computation unwinds mid-insert.
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    generate_routes_from_start(
                        &request.start_block,
                        &request.all_blocks,
                        request.min_gap_minutes,
                        &mut cache,
                        &options,
                    )
                }));

                let reply = match outcome {
                    Ok(result) => RouteReply::Success(result),
                    Err(cause) => RouteReply::Error(panic_message(cause)),
                };
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            replies: reply_rx,
            handle,
        }
    }

    /// Queue a job. Fails only if the worker thread has exited.
    pub fn submit(&self, request: RouteRequest) -> Result<(), SendError<RouteRequest>> {
        self.requests.send(request)
    }

    /// Block until the next reply arrives. `None` means the worker is gone.
    pub fn recv(&self) -> Option<RouteReply> {
        self.replies.recv().ok()
    }

    /// Shut the worker down and wait for the thread to exit.
    pub fn join(self) {
        let Self {
            requests,
            replies,
            handle,
        } = self;
        drop(requests);
        drop(replies);
        let _ = handle.join();
    }
}

fn panic_message(cause: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else {
        "route generation failed".to_string()
    }
}
