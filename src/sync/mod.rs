//! Server Synchronization
//!
//! Exchanges the whole form for one month with `/api/timerecords/{month}`.

mod conflict;
mod payload;
mod session;

pub use conflict::{resolve, Resolution};
pub use payload::FormPayload;
pub use session::{LoadOutcome, SyncSession};

use std::rc::Rc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Characters escaped in the month path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP seam. Errors for non-2xx statuses are `SyncError::Status`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn get(&self, url: &str) -> Result<String, SyncError>;

    async fn post_json(&self, url: &str, body: String, csrf_token: Option<&str>) -> Result<String, SyncError>;
}

/// Server copy of one month
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRecord {
    pub form_data: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Deserialize)]
struct LoadResponse {
    #[serde(default)]
    success: bool,
    record: Option<RemoteRecord>,
    error: Option<String>,
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    form_data: &'a str,
}

#[derive(Deserialize)]
struct SaveResponse {
    #[serde(default)]
    success: bool,
    updated_at: Option<String>,
    error: Option<String>,
}

pub struct SyncClient {
    transport: Rc<dyn HttpTransport>,
    api_base: String,
    csrf_token: Option<String>,
}

impl SyncClient {
    pub fn new(transport: Rc<dyn HttpTransport>, api_base: &str, csrf_token: Option<String>) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
            csrf_token,
        }
    }

    pub fn record_url(&self, month_key: &str) -> String {
        format!("{}/{}", self.api_base, utf8_percent_encode(month_key, PATH_SEGMENT))
    }

    /// Server record for a month, `None` when the server has none yet
    pub async fn fetch(&self, month_key: &str) -> Result<Option<RemoteRecord>, SyncError> {
        let body = self.transport.get(&self.record_url(month_key)).await?;
        let response: LoadResponse = serde_json::from_str(&body)?;
        match (response.success, response.record) {
            (true, record) => Ok(record),
            (false, _) => match response.error {
                Some(error) => Err(SyncError::Rejected(error)),
                None => Ok(None),
            },
        }
    }

    /// Store the payload for a month, returns the server's `updated_at`
    pub async fn push(&self, month_key: &str, payload: &FormPayload) -> Result<String, SyncError> {
        let form_data = payload.to_form_data()?;
        let body = serde_json::to_string(&SaveRequest { form_data: &form_data })?;
        let raw = self
            .transport
            .post_json(&self.record_url(month_key), body, self.csrf_token.as_deref())
            .await?;
        let response: SaveResponse = serde_json::from_str(&raw)?;
        if !response.success {
            return Err(SyncError::Rejected(
                response.error.unwrap_or_else(|| "save not acknowledged".to_string()),
            ));
        }
        Ok(response.updated_at.unwrap_or_default())
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeTransport;
    use super::*;

    fn client(transport: Rc<FakeTransport>) -> SyncClient {
        SyncClient::new(transport, "/api/timerecords/", Some("tok".to_string()))
    }

    #[test]
    fn month_key_is_a_single_path_segment() {
        let c = client(Rc::new(FakeTransport::default()));
        assert_eq!(c.record_url("2026-10"), "/api/timerecords/2026-10");
        assert_eq!(c.record_url("10/2026"), "/api/timerecords/10%2F2026");
    }

    #[tokio::test]
    async fn push_wraps_form_data_and_sends_csrf() {
        let transport = Rc::new(FakeTransport::default());
        transport.reply(Ok(r#"{"success": true, "updated_at": "2026-10-18 10:00:00"}"#));
        let c = client(transport.clone());
        let mut payload = FormPayload::new();
        payload.insert("vorname_input", "Anna");

        let updated_at = c.push("2026-10", &payload).await.unwrap();

        assert_eq!(updated_at, "2026-10-18 10:00:00");
        let sent = transport.sent.borrow();
        assert_eq!(sent[0].method, "POST");
        assert_eq!(sent[0].csrf_token.as_deref(), Some("tok"));
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["form_data"], r#"{"vorname_input":"Anna"}"#);
    }

    #[tokio::test]
    async fn unacknowledged_save_is_rejected() {
        let transport = Rc::new(FakeTransport::default());
        transport.reply(Ok(r#"{"success": false, "error": "Nicht angemeldet"}"#));

        let err = client(transport).push("2026-10", &FormPayload::new()).await.unwrap_err();
        assert!(matches!(err, SyncError::Rejected(msg) if msg == "Nicht angemeldet"));
    }

    #[tokio::test]
    async fn fetch_distinguishes_empty_and_rejected() {
        let transport = Rc::new(FakeTransport::default());
        transport.reply(Ok(r#"{"success": true, "record": null}"#));
        transport.reply(Ok(r#"{"success": false}"#));
        transport.reply(Ok(r#"{"success": false, "error": "boom"}"#));
        transport.reply(Ok(r#"{"success": true, "record": {"form_data": "{}", "updated_at": "2026-10-18 10:00:00"}}"#));
        let c = client(transport);

        assert_eq!(c.fetch("2026-10").await.unwrap(), None);
        assert_eq!(c.fetch("2026-10").await.unwrap(), None);
        assert!(c.fetch("2026-10").await.is_err());
        let record = c.fetch("2026-10").await.unwrap().unwrap();
        assert_eq!(record.form_data, "{}");
    }

    #[tokio::test]
    async fn garbage_response_is_a_payload_error() {
        let transport = Rc::new(FakeTransport::default());
        transport.reply(Ok("<html>login</html>"));

        let err = client(transport).fetch("2026-10").await.unwrap_err();
        assert!(matches!(err, SyncError::Payload(_)));
    }
}
