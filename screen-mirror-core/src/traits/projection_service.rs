use crate::models::error::MirrorError;
use crate::traits::capture_session::CaptureSession;

/// Exchanges an approval token for a capture session.
pub trait ProjectionService {
    /// Opaque token carried by an approving consent result.
    type Token;

    /// Trade `token` for a session. Tokens are single-use.
    fn obtain_session(&mut self, token: Self::Token) -> Result<Box<dyn CaptureSession>, MirrorError>;
}
