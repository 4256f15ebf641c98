use crate::models::consent::ConsentRequestId;
use crate::models::error::MirrorError;

/// Shows the system screen-capture consent dialog.
///
/// The call returns as soon as the dialog is up. The user's decision is
/// delivered later, on the event thread, through
/// `MirrorController::on_consent_result` tagged with the same `request`.
pub trait ConsentFacility {
    fn request_consent(&mut self, request: ConsentRequestId) -> Result<(), MirrorError>;
}
