//! Background document loading.
//!
//! Every request runs on its own short-lived worker thread and reports
//! exactly one [`FetchCompletion`] over a channel. The UI thread drains
//! the channel between input events, so a slow network never blocks
//! input handling. Requests are never cancelled or de-duplicated.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use docmodal_logger as logger;

use crate::{DocumentFetcher, DocumentLocation, FetchError};

/// Monotonic identifier of a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The single result of one fetch request.
#[derive(Debug)]
pub struct FetchCompletion {
    pub request: RequestId,
    pub location: DocumentLocation,
    pub result: Result<String, FetchError>,
}

/// Issues fetch requests and collects their completions.
pub struct DocumentLoader {
    fetcher: Arc<dyn DocumentFetcher>,
    sender: Sender<FetchCompletion>,
    receiver: Receiver<FetchCompletion>,
    last_request: u64,
}

impl DocumentLoader {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            fetcher,
            sender,
            receiver,
            last_request: 0,
        }
    }

    /// Start fetching `location` in the background.
    pub fn request(&mut self, location: DocumentLocation) -> RequestId {
        self.last_request += 1;
        let request = RequestId(self.last_request);

        let fetcher = Arc::clone(&self.fetcher);
        let sender = self.sender.clone();
        let worker_location = location.clone();

        let spawned = thread::Builder::new()
            .name(format!("docmodal-fetch-{}", request.0))
            .spawn(move || {
                let result = fetcher.fetch(&worker_location);
                // Receiver gone means the application is shutting down
                let _ = sender.send(FetchCompletion {
                    request,
                    location: worker_location,
                    result,
                });
            });

        match spawned {
            Ok(_) => logger::debug(format!("Fetch {} started: {}", request, location)),
            Err(e) => {
                logger::error(format!("Failed to spawn fetch worker: {}", e));
                let _ = self.sender.send(FetchCompletion {
                    request,
                    location,
                    result: Err(FetchError::Worker(e.to_string())),
                });
            }
        }

        request
    }

    /// Most recently issued request, if any.
    pub fn latest_request(&self) -> Option<RequestId> {
        (self.last_request > 0).then_some(RequestId(self.last_request))
    }

    /// Take one finished fetch without blocking.
    pub fn try_recv(&self) -> Option<FetchCompletion> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for one finished fetch.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchCompletion> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
