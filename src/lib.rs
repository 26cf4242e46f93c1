#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

//! # Developer Portal API
//!
//! A minimal asynchronous interface to the device benefits of a developer
//! portal account
//!
//! ## Current functionality
//!  - Session handling (bring your own cookie)
//!  - Listing device benefits
//!  - Selecting benefits by device class
//!
//! ```no_run
//! use portal_api::api::types::device_benefit::DeviceBenefit;
//! use portal_api::api::types::session::Session;
//! use portal_api::Portal;
//!
//! # async fn run(session: Session) -> Result<(), portal_api::api::error::PortalAPIError> {
//! let mut portal = Portal::with_session(session)?;
//! let benefits = portal.list_device_benefits().await?;
//! if let Some(ipad) = DeviceBenefit::select_ipad(&benefits) {
//!     println!("{} of {} iPad slots left", ipad.available, ipad.max);
//! }
//! # Ok(())
//! # }
//! ```

use log::{info, warn};

use api::error::PortalAPIError;
use api::types::device_benefit::DeviceBenefit;
use api::types::session::Session;

use crate::api::PortalAPI;

/// Module for authenticated API communication
pub mod api;

/// Struct to manage the communication with the developer portal
#[derive(Default, Debug, Clone)]
pub struct Portal {
    portal: PortalAPI,
}

impl Portal {
    /// Creates new object without a session
    pub fn new() -> Result<Self, PortalAPIError> {
        Portal::with_session(Session::new())
    }

    /// Creates new object using an existing session
    pub fn with_session(session: Session) -> Result<Self, PortalAPIError> {
        Ok(Portal {
            portal: PortalAPI::new(session)?,
        })
    }

    /// Check whether the session can still be used
    pub fn is_logged_in(&self) -> bool {
        if self.portal.session.cookie.is_none() {
            return false;
        }
        match self.portal.session.expires_at {
            Some(exp) => {
                let now = chrono::offset::Utc::now();
                let td = exp - now;
                td.num_seconds() > 600
            }
            None => true,
        }
    }

    /// Get session details
    pub fn session(&self) -> Session {
        self.portal.session.clone()
    }

    /// Update session details
    pub fn set_session(&mut self, session: Session) {
        self.portal.session.update(session);
    }

    /// Returns all device benefits of the account
    pub async fn list_device_benefits(&mut self) -> Result<Vec<DeviceBenefit>, PortalAPIError> {
        if !self.is_logged_in() {
            warn!("Session missing or about to expire");
        }
        let benefits = self.portal.device_benefit_records().await?;
        info!("Fetched {} device benefits", benefits.len());
        Ok(benefits)
    }
}
