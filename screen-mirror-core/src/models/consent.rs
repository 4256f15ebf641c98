use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MirrorError;

/// Identifies one outstanding consent request.
///
/// The platform echoes it back with the result so that stale or foreign
/// results can be told apart from the one the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentRequestId(Uuid);

impl ConsentRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConsentRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConsentRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome code reported by the consent dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentOutcome {
    Approved,
    /// Denied or dismissed; the platform does not distinguish.
    Canceled,
}

/// Payload of the asynchronous consent callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentResult<T> {
    pub request_id: ConsentRequestId,
    pub outcome: ConsentOutcome,
    pub token: Option<T>,
}

impl<T> ConsentResult<T> {
    pub fn approved(request_id: ConsentRequestId, token: T) -> Self {
        Self {
            request_id,
            outcome: ConsentOutcome::Approved,
            token: Some(token),
        }
    }

    pub fn denied(request_id: ConsentRequestId) -> Self {
        Self {
            request_id,
            outcome: ConsentOutcome::Canceled,
            token: None,
        }
    }

    /// Extract the approval token, mapping every non-approval to an error.
    pub fn into_token(self) -> Result<T, MirrorError> {
        match (self.outcome, self.token) {
            (ConsentOutcome::Approved, Some(token)) => Ok(token),
            (ConsentOutcome::Approved, None) => Err(MirrorError::MissingApprovalToken),
            (ConsentOutcome::Canceled, _) => Err(MirrorError::PermissionDenied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_yields_token() {
        let id = ConsentRequestId::new();
        assert_eq!(ConsentResult::approved(id, 7u32).into_token(), Ok(7));
    }

    #[test]
    fn denial_ignores_stray_token() {
        let result = ConsentResult {
            request_id: ConsentRequestId::new(),
            outcome: ConsentOutcome::Canceled,
            token: Some(1u32),
        };
        assert_eq!(result.into_token(), Err(MirrorError::PermissionDenied));
    }

    #[test]
    fn approval_without_token_is_an_error() {
        let result: ConsentResult<u32> = ConsentResult {
            request_id: ConsentRequestId::new(),
            outcome: ConsentOutcome::Approved,
            token: None,
        };
        let err = result.into_token().unwrap_err();
        assert_eq!(err, MirrorError::MissingApprovalToken);
        assert!(err.is_denial());
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(ConsentRequestId::new(), ConsentRequestId::new());
    }
}
