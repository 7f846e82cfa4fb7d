//! Hosted realtime database client.
//!
//! Speaks the Firebase Realtime Database REST protocol: plain JSON verbs
//! for point operations and a `text/event-stream` subscription for
//! change notifications. The streaming task keeps a local replica of the
//! watched subtree and publishes a full snapshot replace for every
//! delivery, so consumers never see partial merges.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{ACCEPT, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::tree::{delete_at, set_at};
use crate::{Feed, FeedError, Subscription, SubscriptionGuard};

/// Delay before re-opening a dropped event stream.
const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Hosted realtime database configuration.
#[derive(Debug, Clone)]
pub struct RtdbConfig {
    /// Database base URL (e.g. `https://your-db.firebaseio.com`),
    /// without a trailing slash.
    pub database_url: String,
}

/// Response to a push (auto-keyed insert).
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: Option<String>,
}

/// Firebase Realtime Database client.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the
/// access token slot.
#[derive(Clone)]
pub struct RtdbClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Arc<RwLock<Option<SecretString>>>,
}

impl RtdbClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &RtdbConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.database_url.trim_end_matches('/').to_owned(),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Attach the access token obtained from anonymous sign-in.
    ///
    /// The feed's access rules require a credential for writes; reads of
    /// public collections work without one. Subscriptions opened after
    /// this call pick the token up on their next (re)connect.
    pub fn set_auth_token(&self, token: SecretString) {
        let mut slot = self
            .auth_token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(token);
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        format!("{}/{path}.json", self.base_url)
    }

    fn auth_query(&self) -> Vec<(&'static str, String)> {
        let slot = self
            .auth_token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slot.as_ref()
            .map(|token| vec![("auth", token.expose_secret().to_owned())])
            .unwrap_or_default()
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, FeedError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(FeedError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Feed for RtdbClient {
    fn subscribe(&self, path: &str) -> Subscription {
        let (tx, rx) = watch::channel(None);
        let client = self.client.clone();
        let url = self.url(path);
        let auth_token = Arc::clone(&self.auth_token);
        let handle = tokio::spawn(stream_snapshots(client, url, auth_token, tx));
        Subscription::new(rx, Some(SubscriptionGuard::new(handle)))
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, FeedError> {
        let response = self
            .client
            .get(self.url(path))
            .query(&self.auth_query())
            .send()
            .await?;
        let value: Value = Self::check(response).await?.json().await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, FeedError> {
        let response = self
            .client
            .post(self.url(path))
            .query(&self.auth_query())
            .json(&value)
            .send()
            .await?;
        let pushed: PushResponse = Self::check(response).await?.json().await?;
        pushed.name.ok_or(FeedError::MissingKey)
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), FeedError> {
        let response = self
            .client
            .put(self.url(path))
            .query(&self.auth_query())
            .json(&value)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: Value) -> Result<(), FeedError> {
        let response = self
            .client
            .patch(self.url(path))
            .query(&self.auth_query())
            .json(&fields)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), FeedError> {
        let response = self
            .client
            .delete(self.url(path))
            .query(&self.auth_query())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

// =============================================================================
// Event Streaming
// =============================================================================

/// One server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SseEvent {
    event: String,
    data: String,
}

/// Incremental parser for `text/event-stream` bodies.
///
/// Network chunks do not align with event boundaries, so bytes are
/// buffered until a blank line terminates the pending event.
#[derive(Default)]
struct SseParser {
    buffer: String,
    event: String,
    data: String,
}

impl SseParser {
    /// Feed a chunk of bytes, returning every event completed by it.
    fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));
        let mut events = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                if !self.event.is_empty() || !self.data.is_empty() {
                    events.push(SseEvent {
                        event: std::mem::take(&mut self.event),
                        data: std::mem::take(&mut self.data),
                    });
                }
            } else if let Some(value) = line.strip_prefix("event:") {
                self.event = value.trim_start().to_owned();
            } else if let Some(value) = line.strip_prefix("data:") {
                if !self.data.is_empty() {
                    self.data.push('\n');
                }
                self.data.push_str(value.trim_start());
            }
            // Comment lines (leading ':') and unknown fields are ignored.
        }
        events
    }
}

/// Payload of a `put` or `patch` event.
#[derive(Debug, Deserialize)]
struct ChangeEnvelope {
    path: String,
    data: Value,
}

/// Apply one streamed event to the local replica.
///
/// Returns `true` when the replica changed and a snapshot should be
/// published.
fn apply_event(replica: &mut Option<Value>, event: &SseEvent) -> Result<bool, FeedError> {
    match event.event.as_str() {
        "put" => {
            let change: ChangeEnvelope = serde_json::from_str(&event.data)?;
            if change.path == "/" {
                *replica = if change.data.is_null() {
                    None
                } else {
                    Some(change.data)
                };
            } else {
                let root = replica.get_or_insert_with(|| Value::Object(serde_json::Map::new()));
                if change.data.is_null() {
                    delete_at(root, &change.path);
                } else {
                    set_at(root, &change.path, change.data);
                }
            }
            Ok(true)
        }
        "patch" => {
            let change: ChangeEnvelope = serde_json::from_str(&event.data)?;
            let root = replica.get_or_insert_with(|| Value::Object(serde_json::Map::new()));
            if let Value::Object(fields) = change.data {
                for (field, value) in fields {
                    let child = format!("{}/{field}", change.path.trim_end_matches('/'));
                    if value.is_null() {
                        delete_at(root, &child);
                    } else {
                        set_at(root, &child, value);
                    }
                }
            }
            Ok(true)
        }
        // keep-alive carries no data; cancel/auth_revoked are handled by
        // the caller through the stream ending.
        _ => Ok(false),
    }
}

/// Drive one subscription: open the event stream, replay deliveries into
/// the local replica, and publish snapshot replaces.
///
/// Reconnects after a short delay when the stream drops; gives up only
/// when every receiver is gone.
async fn stream_snapshots(
    client: reqwest::Client,
    url: String,
    auth_token: Arc<RwLock<Option<SecretString>>>,
    tx: watch::Sender<Option<Value>>,
) {
    loop {
        if tx.is_closed() {
            return;
        }

        let query: Vec<(&str, String)> = {
            let slot = auth_token
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            slot.as_ref()
                .map(|token| vec![("auth", token.expose_secret().to_owned())])
                .unwrap_or_default()
        };

        let response = client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .query(&query)
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(url = %url, status = %response.status(), "event stream rejected");
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "event stream connect failed");
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };

        let mut parser = SseParser::default();
        let mut replica: Option<Value> = None;
        let mut stream = response.bytes_stream();

        'read: while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "event stream read failed");
                    break;
                }
            };
            for event in parser.feed(&chunk) {
                if event.event == "auth_revoked" || event.event == "cancel" {
                    tracing::warn!(url = %url, event = %event.event, "event stream closed by feed");
                    break 'read;
                }
                match apply_event(&mut replica, &event) {
                    Ok(true) => {
                        if tx.send(replica.clone()).is_err() {
                            return;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "discarding undecodable event");
                    }
                }
            }
        }

        tracing::debug!(url = %url, "event stream ended, reconnecting");
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(kind: &str, data: &str) -> SseEvent {
        SseEvent {
            event: kind.to_owned(),
            data: data.to_owned(),
        }
    }

    #[test]
    fn test_sse_parser_handles_split_chunks() {
        let mut parser = SseParser::default();
        assert!(parser.feed(b"event: put\ndata: {\"pa").is_empty());
        let events = parser.feed(b"th\":\"/\",\"data\":null}\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "put");
        assert_eq!(events[0].data, "{\"path\":\"/\",\"data\":null}");
    }

    #[test]
    fn test_sse_parser_multiple_events_one_chunk() {
        let mut parser = SseParser::default();
        let events = parser.feed(
            b"event: put\ndata: {\"path\":\"/\",\"data\":{}}\n\nevent: keep-alive\ndata: null\n\n",
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event, "keep-alive");
    }

    #[test]
    fn test_put_at_root_replaces_replica() {
        let mut replica = Some(json!({"old": true}));
        let changed = apply_event(
            &mut replica,
            &event("put", r#"{"path":"/","data":{"p1":{"name":"Tee"}}}"#),
        )
        .unwrap();
        assert!(changed);
        assert_eq!(replica.unwrap()["p1"]["name"], "Tee");
    }

    #[test]
    fn test_put_null_at_root_clears_replica() {
        let mut replica = Some(json!({"p1": {}}));
        apply_event(&mut replica, &event("put", r#"{"path":"/","data":null}"#)).unwrap();
        assert!(replica.is_none());
    }

    #[test]
    fn test_put_at_subpath_sets_record() {
        let mut replica = None;
        apply_event(
            &mut replica,
            &event("put", r#"{"path":"/p2","data":{"name":"Hoodie"}}"#),
        )
        .unwrap();
        assert_eq!(replica.unwrap()["p2"]["name"], "Hoodie");
    }

    #[test]
    fn test_put_null_at_subpath_deletes_record() {
        let mut replica = Some(json!({"p1": {"name": "Tee"}, "p2": {"name": "Hoodie"}}));
        apply_event(&mut replica, &event("put", r#"{"path":"/p1","data":null}"#)).unwrap();
        let replica = replica.unwrap();
        assert!(replica.get("p1").is_none());
        assert!(replica.get("p2").is_some());
    }

    #[test]
    fn test_patch_merges_fields() {
        let mut replica = Some(json!({"o1": {"status": "Processing", "total": 200}}));
        apply_event(
            &mut replica,
            &event("patch", r#"{"path":"/o1","data":{"status":"Delivered"}}"#),
        )
        .unwrap();
        let replica = replica.unwrap();
        assert_eq!(replica["o1"]["status"], "Delivered");
        assert_eq!(replica["o1"]["total"], 200);
    }

    #[test]
    fn test_keep_alive_publishes_nothing() {
        let mut replica = None;
        let changed = apply_event(&mut replica, &event("keep-alive", "null")).unwrap();
        assert!(!changed);
        assert!(replica.is_none());
    }

    #[tokio::test]
    async fn test_rest_read_and_push() {
        use wiremock::matchers::{body_json, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shop/products.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"p1": {"name": "Tee"}})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/shop/orders.json"))
            .and(body_json(json!({"total": 200})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "-OaB3xYz"})))
            .mount(&server)
            .await;

        let client = RtdbClient::new(&RtdbConfig {
            database_url: server.uri(),
        });

        let products = client.read("shop/products").await.unwrap().unwrap();
        assert_eq!(products["p1"]["name"], "Tee");

        let key = client.push("shop/orders", json!({"total": 200})).await.unwrap();
        assert_eq!(key, "-OaB3xYz");
    }

    #[tokio::test]
    async fn test_rest_absent_path_reads_none() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shop/users/Bob.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .mount(&server)
            .await;

        let client = RtdbClient::new(&RtdbConfig {
            database_url: server.uri(),
        });
        assert!(client.read("shop/users/Bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rest_auth_token_sent_as_query() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/shop/users/Ali.json"))
            .and(query_param("auth", "id-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ali"})))
            .mount(&server)
            .await;

        let client = RtdbClient::new(&RtdbConfig {
            database_url: server.uri(),
        });
        client.set_auth_token(SecretString::from("id-token"));
        client
            .write("shop/users/Ali", json!({"name": "Ali"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rest_error_status_surfaces_as_api_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/shop/orders/o1.json"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Permission denied"))
            .mount(&server)
            .await;

        let client = RtdbClient::new(&RtdbConfig {
            database_url: server.uri(),
        });
        let err = client.delete("shop/orders/o1").await.unwrap_err();
        match err {
            FeedError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Permission denied");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
