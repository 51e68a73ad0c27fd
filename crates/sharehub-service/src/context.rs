//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Produced by the external authentication layer and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting principal (username or email).
    pub principal: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for `principal`.
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            request_time: Utc::now(),
        }
    }
}
