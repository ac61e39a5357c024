#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use camunda_client::{
    Camunda, ConnectorConfig, HttpClient, HttpError, HttpRequestParts, HttpResponseParts,
};

/// Replays queued responses and records every request it is handed.
#[derive(Default)]
pub struct Recorder {
    responses: Mutex<VecDeque<HttpResponseParts>>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl Recorder {
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(HttpResponseParts {
            status,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
        });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequestParts {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait]
impl HttpClient for Recorder {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HttpError::Other("no response queued".to_string()))
    }
}

pub fn camunda(recorder: &Arc<Recorder>) -> Camunda<Arc<Recorder>> {
    Camunda::with_http_client(ConnectorConfig::default(), None, Arc::clone(recorder)).unwrap()
}

pub fn query(req: &HttpRequestParts) -> Vec<(String, String)> {
    req.url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
