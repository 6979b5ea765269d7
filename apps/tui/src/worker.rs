//! Background response worker.
//!
//! `generate_response` runs on a dedicated thread owning the engine so the
//! 100 ms event loop stays responsive. Queries go in over one channel,
//! responses come back over another; the app drains the reply channel each
//! tick. One worker serves one conversation, so the engine's bounded history
//! needs no locking.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use codetutor_engine::ResponseEngine;

/// A completed exchange delivered back to the UI.
pub(crate) struct Reply {
    pub response: String,
}

/// Handle to the engine thread held by the app.
pub(crate) struct WorkerHandle {
    query_tx: Sender<String>,
    reply_rx: Receiver<Reply>,
}

impl WorkerHandle {
    /// Queue a query for the engine.
    pub(crate) fn submit(&self, query: String) {
        // A send failure means the worker thread is gone; the app is about
        // to exit anyway.
        let _ = self.query_tx.send(query);
    }

    /// Non-blocking poll for the next finished reply.
    pub(crate) fn try_recv(&self) -> Option<Reply> {
        self.reply_rx.try_recv().ok()
    }
}

/// Spawn the engine thread. The thread exits when the handle is dropped.
pub(crate) fn spawn(mut engine: ResponseEngine) -> WorkerHandle {
    let (query_tx, query_rx) = channel::<String>();
    let (reply_tx, reply_rx) = channel::<Reply>();

    thread::spawn(move || {
        while let Ok(query) = query_rx.recv() {
            let response = engine.generate_response(&query);
            if reply_tx.send(Reply { response }).is_err() {
                break;
            }
        }
        tracing::debug!("engine worker shutting down");
    });

    WorkerHandle { query_tx, reply_rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use codetutor_engine::KnowledgeStore;

    #[test]
    fn worker_round_trip() {
        let store =
            Arc::new(KnowledgeStore::load(codetutor_topics::builtin_topics()).expect("load"));
        let engine = ResponseEngine::new(store, None, 5);
        let handle = spawn(engine);

        handle.submit("write a recursive fibonacci function".into());

        let mut reply = None;
        for _ in 0..50 {
            if let Some(r) = handle.try_recv() {
                reply = Some(r);
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let reply = reply.expect("worker reply");
        assert!(reply.response.starts_with("```python"));
    }
}
