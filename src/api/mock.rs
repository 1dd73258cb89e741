//! Scripted in-memory transport for tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use reqwest::Method;

use super::{ApiClient, ApiRequest, ApiResponse, Transport};
use crate::error::ApiError;

pub const MOCK_BASE: &str = "http://pantry.test";

type Route = (Method, String);

/// Records every request and answers from per-route queues.
///
/// Responses are served in order; the last one for a route repeats.
#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<ApiRequest>>,
    routes: RefCell<HashMap<Route, VecDeque<Result<ApiResponse, ApiError>>>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn client(self: &Rc<Self>) -> ApiClient {
        ApiClient::new(MOCK_BASE, Rc::clone(self) as Rc<dyn Transport>)
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Ok(ApiResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
        );
    }

    pub fn fail(&self, method: Method, path: &str, err: ApiError) {
        self.push(method, path, Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{}{}", MOCK_BASE, path);
        self.requests
            .borrow()
            .iter()
            .filter(|req| req.method == method && req.url == url)
            .count()
    }

    fn push(&self, method: Method, path: &str, response: Result<ApiResponse, ApiError>) {
        self.routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request
            .url
            .strip_prefix(MOCK_BASE)
            .unwrap_or(&request.url)
            .to_string();
        let route = (request.method.clone(), path);
        self.requests.borrow_mut().push(request);

        let mut routes = self.routes.borrow_mut();
        let Some(queue) = routes.get_mut(&route) else {
            return Err(ApiError::Transport(format!(
                "no response scripted for {} {}",
                route.0, route.1
            )));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}
