mod normalize;
mod portfolio;
mod utils;

use std::{
    io::Write,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::{
    api::{LatestCloses, PriceSource},
    error::PriceError,
};

pub(crate) fn write_temp_csv(contents: impl AsRef<[u8]>) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_ref()).unwrap();
    file.flush().unwrap();
    file
}

/// Price source answering with a canned response and recording every call.
#[derive(Clone)]
pub(crate) struct MockSource {
    response: Option<LatestCloses>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockSource {
    pub fn answering(response: LatestCloses) -> Self {
        Self {
            response: Some(response),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for MockSource {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn latest_closes(&self, tickers: &[String]) -> Result<LatestCloses, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(tickers.to_vec());
        self.response
            .clone()
            .ok_or_else(|| PriceError::Network("connection refused".to_string()))
    }
}
