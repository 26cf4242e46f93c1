use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use types::session::Session;
use url::Url;

use crate::api::error::PortalAPIError;

/// Module holding the API types
pub mod types;

/// Error type
pub mod error;

/// Device benefit methods
pub mod device_benefit;

#[derive(Default, Debug, Clone)]
pub(crate) struct PortalAPI {
    client: Client,
    pub(crate) session: Session,
}

impl PortalAPI {
    pub fn new(session: Session) -> Result<Self, PortalAPIError> {
        let client = PortalAPI::build_client().build().map_err(|e| {
            log::error!("{:?}", e);
            PortalAPIError::Unknown
        })?;
        Ok(PortalAPI { client, session })
    }

    fn build_client() -> ClientBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "portal-api/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        reqwest::Client::builder().default_headers(headers)
    }

    fn endpoint(&self, path: &str) -> Result<Url, PortalAPIError> {
        self.session.base_url().join(path).map_err(|e| {
            log::error!("{:?}", e);
            PortalAPIError::InvalidParams
        })
    }

    fn authorized_post_client(&self, url: Url) -> Result<RequestBuilder, PortalAPIError> {
        self.set_session_headers(self.client.post(url))
    }

    fn set_session_headers(&self, rb: RequestBuilder) -> Result<RequestBuilder, PortalAPIError> {
        let cookie = match &self.session.cookie {
            Some(c) => c,
            None => return Err(PortalAPIError::InvalidCredentials),
        };
        let mut rb = rb.header(reqwest::header::COOKIE, format!("myacinfo={}", cookie));
        if let Some(csrf) = &self.session.csrf {
            rb = rb.header("csrf", csrf);
        }
        if let Some(csrf_ts) = &self.session.csrf_ts {
            rb = rb.header("csrf_ts", csrf_ts);
        }
        Ok(rb)
    }

    /// Portal rotates csrf tokens on every response
    fn store_csrf(&mut self, headers: &HeaderMap) {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        if let (Some(csrf), Some(csrf_ts)) = (read("csrf"), read("csrf_ts")) {
            self.session.set_csrf(Some(csrf), Some(csrf_ts));
        }
    }
}
