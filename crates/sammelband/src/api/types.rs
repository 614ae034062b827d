//! API state and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ServiceConfig;

/// API server size limit configuration.
///
/// Default limits are 100 MB, which comfortably covers typical image and
/// document upload batches. Override via `SAMMELBAND_MAX_UPLOAD_SIZE_MB` or
/// programmatically when creating the router.
#[derive(Debug, Clone, Copy)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes (all files plus
    /// form data combined).
    pub max_request_body_bytes: usize,

    /// Maximum size of a single multipart field in bytes.
    pub max_multipart_field_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 100 * 1024 * 1024,
            max_multipart_field_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ApiSizeLimits {
    /// Create new size limits with custom byte values.
    pub fn new(max_request_body_bytes: usize, max_multipart_field_bytes: usize) -> Self {
        Self {
            max_request_body_bytes,
            max_multipart_field_bytes,
        }
    }

    /// Create size limits from MB values (convenience method).
    pub fn from_mb(max_request_body_mb: usize, max_multipart_field_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            max_multipart_field_bytes: max_multipart_field_mb * 1024 * 1024,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
}

/// API server state.
///
/// Holds the service configuration created once at startup; handlers only
/// ever read it.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub config: Arc<ServiceConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_100_mb() {
        let limits = ApiSizeLimits::default();
        assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);
        assert_eq!(limits.max_multipart_field_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_from_mb() {
        let limits = ApiSizeLimits::from_mb(5, 2);
        assert_eq!(limits.max_request_body_bytes, 5 * 1024 * 1024);
        assert_eq!(limits.max_multipart_field_bytes, 2 * 1024 * 1024);
    }
}
