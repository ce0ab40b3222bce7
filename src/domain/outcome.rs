//! Transient results produced by network actions and location requests.

use std::fmt;

use thiserror::Error;

/// Standard `PositionError.PERMISSION_DENIED` code.
pub const PERMISSION_DENIED: u16 = 1;
/// Standard `PositionError.POSITION_UNAVAILABLE` code.
pub const POSITION_UNAVAILABLE: u16 = 2;
/// Standard `PositionError.TIMEOUT` code.
pub const TIMEOUT: u16 = 3;

/// Classified result of an entity request.
///
/// Produced by [`crate::client::EntityClient::handle_response`] after the
/// matching sink has already been invoked; callers only use it for logging or
/// assertions and drop it immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Status below 400 and the transport followed a redirect to this URL.
    Redirected(String),
    /// Status below 400 without a redirect. Nothing further happens.
    Completed,
    /// Status 400 or above (or no response at all).
    Failed {
        status_text: String,
        body_text: String,
    },
}

impl RequestOutcome {
    /// Message shown to the user for a failed request: `"<statusText>: <bodyText>"`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failed {
                status_text,
                body_text,
            } => Some(format!("{status_text}: {body_text}")),
            Self::Redirected(_) | Self::Completed => None,
        }
    }
}

/// Classification of a failed geolocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable, try again")]
    PositionUnavailable,
    #[error("timed out, try again")]
    Timeout,
    #[error("error code {0}")]
    Unknown(u16),
}

impl GeolocationError {
    /// Classifies a raw provider error code.
    ///
    /// ```
    /// use place_actions::GeolocationError;
    ///
    /// assert_eq!(GeolocationError::from_code(1), GeolocationError::PermissionDenied);
    /// assert_eq!(GeolocationError::from_code(9), GeolocationError::Unknown(9));
    /// ```
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            PERMISSION_DENIED => Self::PermissionDenied,
            POSITION_UNAVAILABLE => Self::PositionUnavailable,
            TIMEOUT => Self::Timeout,
            other => Self::Unknown(other),
        }
    }

    /// Human-readable alert text for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unknown(code) => format!("Failed to get browser location (error code {code})"),
            known => format!("Failed to get browser location: {known}"),
        }
    }
}

/// A device position reported by the geolocation provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    /// Formats as `<lat>,<lng>`, the `location` query parameter of search URLs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_match_alert_texts() {
        assert_eq!(
            GeolocationError::from_code(1).user_message(),
            "Failed to get browser location: permission denied"
        );
        assert_eq!(
            GeolocationError::from_code(2).user_message(),
            "Failed to get browser location: position unavailable, try again"
        );
        assert_eq!(
            GeolocationError::from_code(3).user_message(),
            "Failed to get browser location: timed out, try again"
        );
        assert_eq!(
            GeolocationError::from_code(0).user_message(),
            "Failed to get browser location (error code 0)"
        );
    }

    #[test]
    fn failed_outcome_joins_status_and_body() {
        let outcome = RequestOutcome::Failed {
            status_text: "Forbidden".to_string(),
            body_text: "not your comment".to_string(),
        };
        assert_eq!(outcome.error_message().as_deref(), Some("Forbidden: not your comment"));
        assert_eq!(RequestOutcome::Completed.error_message(), None);
    }

    #[test]
    fn coordinates_render_without_trailing_zeros() {
        let here = Coordinates {
            latitude: 51.5,
            longitude: -0.25,
        };
        assert_eq!(here.to_string(), "51.5,-0.25");
    }
}
