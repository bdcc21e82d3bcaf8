use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::error::SyncError;
use crate::sync::{HttpTransport, CSRF_HEADER};

/// `window.fetch` with same-origin cookies
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, url: &str, init: RequestInit) -> Result<String, SyncError> {
        init.set_credentials(RequestCredentials::SameOrigin);
        let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;
        let window = web_sys::window().ok_or_else(|| SyncError::Network("no window".to_string()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        if !response.ok() {
            return Err(SyncError::Status(response.status()));
        }
        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Ok(text.as_string().unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn get(&self, url: &str) -> Result<String, SyncError> {
        let headers = Headers::new().map_err(js_error)?;
        headers.set("Accept", "application/json").map_err(js_error)?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_headers(&headers);
        self.send(url, init).await
    }

    async fn post_json(&self, url: &str, body: String, csrf_token: Option<&str>) -> Result<String, SyncError> {
        let headers = Headers::new().map_err(js_error)?;
        headers.set("Accept", "application/json").map_err(js_error)?;
        headers.set("Content-Type", "application/json").map_err(js_error)?;
        if let Some(token) = csrf_token {
            headers.set(CSRF_HEADER, token).map_err(js_error)?;
        }
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&body.into());
        self.send(url, init).await
    }
}

fn js_error(value: wasm_bindgen::JsValue) -> SyncError {
    SyncError::Network(format!("{:?}", value))
}
