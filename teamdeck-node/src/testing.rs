//! Scripted request helper for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use teamdeck::{ApiRequest, ApiResponse, HttpMethod, RequestHelper, TeamdeckError};

use crate::connectors::teamdeck::config::PAGE_COUNT_HEADER;

/// Answers requests from a queue of scripted responses and records every
/// request it receives.
#[derive(Default)]
pub struct RecordingHelper {
    responses: Mutex<VecDeque<Result<ApiResponse, TeamdeckError>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl RecordingHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with the given body and no headers.
    pub fn push_json(&self, body: Value) -> &Self {
        self.push_response(ApiResponse {
            status: 200,
            headers: HashMap::new(),
            body,
        })
    }

    /// Queue a listing page carrying the page-count header.
    pub fn push_page(&self, body: Value, page_count: &str) -> &Self {
        let mut headers = HashMap::new();
        headers.insert(PAGE_COUNT_HEADER.to_string(), page_count.to_string());
        self.push_response(ApiResponse {
            status: 200,
            headers,
            body,
        })
    }

    pub fn push_response(&self, response: ApiResponse) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn push_error(&self, error: TeamdeckError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<HttpMethod> {
        self.calls().iter().map(|c| c.method).collect()
    }

    /// Value of a query parameter in the n-th recorded request.
    pub fn query_param(&self, call: usize, name: &str) -> Option<String> {
        self.calls()
            .get(call)?
            .query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

#[async_trait]
impl RequestHelper for RecordingHelper {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, TeamdeckError> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TeamdeckError::upstream(
                    None,
                    format!("no scripted response for {} {}", request.method, request.path),
                ))
            })
    }
}
