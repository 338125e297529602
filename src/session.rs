//! A worker thread that answers one interpretation request at a time.
//!
//! The front ends never call [`crate::run`] directly. They hand each line to a
//! [`Session`] and block until the rendered answer comes back, so there is
//! never more than one evaluation in flight.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start the interpreter worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("the interpreter worker has stopped")]
    Disconnected,
}

pub struct Session {
    requests: Option<Sender<String>>,
    responses: Receiver<String>,
    worker: Option<JoinHandle<()>>,
}

impl Session {
    pub fn spawn() -> Result<Self, SessionError> {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (response_tx, response_rx) = mpsc::channel::<String>();

        let worker = thread::Builder::new()
            .name("stlc-session".to_string())
            .spawn(move || {
                for source in request_rx {
                    debug!(%source, "session request");
                    if response_tx.send(crate::run(&source)).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            worker: Some(worker),
        })
    }

    /// Send `source` to the worker and wait for its rendered result.
    pub fn interpret(&mut self, source: &str) -> Result<String, SessionError> {
        let requests = self.requests.as_ref().ok_or(SessionError::Disconnected)?;
        requests
            .send(source.to_string())
            .map_err(|_| SessionError::Disconnected)?;
        self.responses
            .recv()
            .map_err(|_| SessionError::Disconnected)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
