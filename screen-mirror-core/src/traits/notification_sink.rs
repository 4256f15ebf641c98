use crate::models::error::MirrorError;
use crate::models::state::MirrorState;

/// User-facing feedback: a persistent status label, the toggle button
/// label, and transient notices.
///
/// Informational only; nothing the sink does feeds back into the
/// controller.
pub trait NotificationSink {
    fn set_status(&mut self, text: &str);

    fn set_toggle_label(&mut self, text: &str);

    /// Show a short-lived message (toast).
    fn show_notice(&mut self, text: &str);

    /// Called after every state transition.
    fn on_state_changed(&mut self, _state: MirrorState) {}

    /// Called when a failure has been recovered by returning to idle.
    fn on_error(&mut self, _error: &MirrorError) {}
}
