use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// A scripted transport for tests. Replays queued replies in order and,
/// once the queue is empty, answers 200 with an envelope echoing the
/// request's `id`. Every request is recorded.
///
/// Clones share state, so a test can keep one handle for inspection after
/// moving another into the client.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Reply>,
    requests: Vec<HttpRequest>,
}

enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            replies: VecDeque::new(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Decoded body of the most recent request.
    pub fn last_body(&self) -> serde_json::Value {
        let state = self.lock();
        let request = state.requests.last().expect("no request was sent");
        serde_json::from_str(&request.body).expect("request body must be JSON")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state lock poisoned")
    }
}

pub struct MockTransportBuilder {
    replies: VecDeque<Reply>,
}

impl MockTransportBuilder {
    pub fn respond(mut self, status: u16, body: &str) -> Self {
        self.replies
            .push_back(Reply::Respond(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(mut self, message: &str) -> Self {
        self.replies.push_back(Reply::Fail(message.to_owned()));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            state: Arc::new(Mutex::new(MockState {
                replies: self.replies,
                requests: Vec::new(),
            })),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        let reply = state.replies.pop_front();
        let echo = echo_envelope(&request.body);
        state.requests.push(request);

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError::Custom(message.into())),
            None => Ok(HttpResponse::new(200, echo)),
        }
    }
}

fn echo_envelope(request_body: &str) -> String {
    let id = serde_json::from_str::<serde_json::Value>(request_body)
        .ok()
        .and_then(|body| body.get("id").cloned())
        .unwrap_or(serde_json::Value::Null);
    serde_json::json!({ "result": null, "error": null, "id": id }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> HttpRequest {
        HttpRequest {
            url: "localhost:18443".to_owned(),
            headers: Vec::new(),
            body: body.to_owned(),
        }
    }

    #[tokio::test]
    async fn queued_replies_are_served_before_echo() {
        let mock = MockTransport::builder().respond(401, "").build();

        let first = mock.send(request(r#"{"id":"a"}"#)).await.unwrap();
        assert_eq!(first.status, 401);

        let second = mock.send(request(r#"{"id":"b"}"#)).await.unwrap();
        assert_eq!(second.status, 200);
        let echoed: serde_json::Value = serde_json::from_str(&second.body).unwrap();
        assert_eq!(echoed["id"], "b");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn fail_reply_is_transport_error() {
        let mock = MockTransport::builder().fail("connection refused").build();
        let err = mock.send(request("{}")).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
