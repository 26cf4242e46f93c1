use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default services endpoint of the developer portal
pub const DEFAULT_BASE_URL: &str = "https://developer.apple.com/services-account/QH65B2/";

/// Structure that holds the portal session
///
/// Needed for every authorized request. Obtaining it (login, two factor
/// authentication) happens outside of this crate.
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub base_url: Option<Url>,
    pub team_id: Option<String>,
    pub(crate) cookie: Option<String>,
    pub(crate) csrf: Option<String>,
    pub(crate) csrf_ts: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates new empty Session
    pub fn new() -> Self {
        Session {
            base_url: None,
            team_id: None,
            cookie: None,
            csrf: None,
            csrf_ts: None,
            expires_at: None,
        }
    }

    /// Get session cookie
    pub fn cookie(&self) -> Option<String> {
        self.cookie.clone()
    }

    /// Set session cookie
    pub fn set_cookie(&mut self, cookie: Option<String>) {
        self.cookie = cookie;
    }

    /// Get the csrf token pair
    pub fn csrf(&self) -> (Option<String>, Option<String>) {
        (self.csrf.clone(), self.csrf_ts.clone())
    }

    /// Set the csrf token pair
    pub fn set_csrf(&mut self, csrf: Option<String>, csrf_ts: Option<String>) {
        self.csrf = csrf;
        self.csrf_ts = csrf_ts;
    }

    /// Base url to send requests to, falls back to the public portal
    pub fn base_url(&self) -> Url {
        match &self.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
        }
    }

    /// Updates only the present values in the existing session
    pub fn update(&mut self, new: Session) {
        if let Some(n) = new.base_url {
            self.base_url = Some(n)
        }
        if let Some(n) = new.team_id {
            self.team_id = Some(n)
        }
        if let Some(n) = new.cookie {
            self.cookie = Some(n)
        }
        if let Some(n) = new.csrf {
            self.csrf = Some(n)
        }
        if let Some(n) = new.csrf_ts {
            self.csrf_ts = Some(n)
        }
        if let Some(n) = new.expires_at {
            self.expires_at = Some(n)
        }
    }
}
