use std::error::Error;
use std::fmt;

/// Error enum for the developer portal API
#[derive(Debug, Clone, PartialEq)]
pub enum PortalAPIError {
    /// Missing or rejected session
    InvalidCredentials,
    /// API error - see the contents
    APIError(String),
    /// Unknown error
    Unknown,
    /// Invalid parameters
    InvalidParams,
    /// Server error
    Server,
}

impl fmt::Display for PortalAPIError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PortalAPIError::InvalidCredentials => {
                write!(f, "Invalid Credentials")
            }
            PortalAPIError::Unknown => {
                write!(f, "Unknown Error")
            }
            PortalAPIError::Server => {
                write!(f, "Server Error")
            }
            PortalAPIError::APIError(e) => {
                write!(f, "API Error: {}", e)
            }
            PortalAPIError::InvalidParams => {
                write!(f, "Invalid Input Parameters")
            }
        }
    }
}

impl Error for PortalAPIError {}
