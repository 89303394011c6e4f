use std::{
    collections::VecDeque,
    fmt::Debug,
    sync::{Arc, Mutex, PoisonError},
};

use bytes::Bytes;
use http::StatusCode;
use reqwest::{Error, Request, RequestBuilder, Response};
use url::Url;

pub trait HttpClient: Send + Sync + Debug + Clone {
    fn get(&self, url: Url) -> RequestBuilder {
        self.request(reqwest::Method::GET, url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder;

    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send;
}

impl HttpClient for reqwest::Client {
    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        self.request(method, url)
    }

    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send {
        self.execute(request)
    }
}
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub body: Bytes,
    pub status: StatusCode,
    pub headers: reqwest::header::HeaderMap,
}
impl MockResponse {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::with_status(StatusCode::OK, body)
    }
    pub fn with_status(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            status,
            headers: reqwest::header::HeaderMap::new(),
        }
    }
    pub fn not_found() -> Self {
        Self::with_status(StatusCode::NOT_FOUND, Bytes::new())
    }
}
type Route = dyn Fn(&Url) -> MockResponse + Send + Sync;
/// Answers requests without touching the network and remembers every URL it was asked for.
#[derive(Clone)]
pub struct MockClient {
    route: Arc<Route>,
    requests: Arc<Mutex<Vec<Url>>>,
}
impl Debug for MockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClient")
            .field("requests", &self.requests())
            .finish_non_exhaustive()
    }
}
impl MockClient {
    /// Every request is answered by `route`.
    pub fn new<F>(route: F) -> Self
    where
        F: Fn(&Url) -> MockResponse + Send + Sync + 'static,
    {
        Self {
            route: Arc::new(route),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
    /// Requests are answered with `responses` in order. Once exhausted every request gets a 404.
    pub fn sequence(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        let queue = Mutex::new(responses.into_iter().collect::<VecDeque<_>>());
        Self::new(move |_| {
            queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(MockResponse::not_found)
        })
    }
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
impl HttpClient for MockClient {
    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        let client = reqwest::Client::new();
        client.request(method, url)
    }

    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send {
        let url = request.url().clone();
        let response = (self.route)(&url);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
        async move {
            let mut http_response = http::Response::new(response.body);
            *http_response.status_mut() = response.status;
            *http_response.headers_mut() = response.headers;
            Ok(Response::from(http_response))
        }
    }
}
