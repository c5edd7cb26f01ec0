//! Device position lookup
//!
//! Providers answer on a channel so the map applies the result on its own
//! thread, the same way tile downloads report back.

use crate::core::{config::PositionOptions, geo::LatLng};
use crossbeam_channel::Sender;

/// Why a position request failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Permission denied ({0})")]
    PermissionDenied(String),
    #[error("Position unavailable ({0})")]
    PositionUnavailable(String),
    #[error("Timeout ({0})")]
    Timeout(String),
    /// A code outside the three known ones
    #[error("Error ({0})")]
    Other(String),
}

impl GeolocationError {
    /// Maps a W3C-style error code (1, 2, 3) onto a reason; anything else is [`Self::Other`].
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            1 => Self::PermissionDenied(message),
            2 => Self::PositionUnavailable(message),
            3 => Self::Timeout(message),
            _ => Self::Other(message),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "Permission denied",
            Self::PositionUnavailable(_) => "Position unavailable",
            Self::Timeout(_) => "Timeout",
            Self::Other(_) => "Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::PermissionDenied(m)
            | Self::PositionUnavailable(m)
            | Self::Timeout(m)
            | Self::Other(m) => m,
        }
    }
}

pub type LocationResult = std::result::Result<LatLng, GeolocationError>;

/// A source of the device's position.
pub trait Geolocator: Send {
    /// Whether this platform can answer position requests at all.
    fn is_supported(&self) -> bool;

    /// Starts a request. Exactly one result must be sent on `reply`, now or later.
    fn locate(&self, options: &PositionOptions, reply: Sender<LocationResult>);
}

/// For platforms with no position capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedGeolocator;

impl Geolocator for UnsupportedGeolocator {
    fn is_supported(&self) -> bool {
        false
    }

    fn locate(&self, _options: &PositionOptions, reply: Sender<LocationResult>) {
        let _ = reply.send(Err(GeolocationError::PositionUnavailable(
            "geolocation is not supported".into(),
        )));
    }
}

/// Answers every request with a preset position or error. Used on desktop
/// builds where the position is given on the command line.
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    answer: LocationResult,
}

impl FixedGeolocator {
    pub fn at(position: LatLng) -> Self {
        Self {
            answer: Ok(position),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self { answer: Err(error) }
    }
}

impl Geolocator for FixedGeolocator {
    fn is_supported(&self) -> bool {
        true
    }

    fn locate(&self, options: &PositionOptions, reply: Sender<LocationResult>) {
        log::debug!(
            "fixed geolocation request (high accuracy: {}, timeout: {} ms)",
            options.high_accuracy,
            options.timeout_ms
        );
        let _ = reply.send(self.answer.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GeolocationError::from_code(1, "user said no").reason(),
            "Permission denied"
        );
        assert_eq!(GeolocationError::from_code(2, "").reason(), "Position unavailable");
        assert_eq!(GeolocationError::from_code(3, "").reason(), "Timeout");
    }

    #[test]
    fn test_unknown_code_is_generic_error() {
        let err = GeolocationError::from_code(0, "kernel said no");
        assert_eq!(err.reason(), "Error");
        assert_eq!(err.to_string(), "Error (kernel said no)");
    }

    #[test]
    fn test_error_display() {
        let err = GeolocationError::Timeout("took longer than 10000 ms".into());
        assert_eq!(err.to_string(), "Timeout (took longer than 10000 ms)");
        assert_eq!(err.message(), "took longer than 10000 ms");
    }

    #[test]
    fn test_fixed_geolocator_replies() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let geo = FixedGeolocator::at(LatLng::new(51.5, -0.12));
        geo.locate(&PositionOptions::default(), tx);
        assert_eq!(rx.try_recv().unwrap(), Ok(LatLng::new(51.5, -0.12)));
    }
}
