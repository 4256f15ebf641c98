use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::models::config::MirrorConfiguration;
use crate::models::consent::{ConsentRequestId, ConsentResult};
use crate::models::display::{DisplayDensity, VirtualDisplaySpec};
use crate::models::error::MirrorError;
use crate::models::snapshot::{BindingInfo, MirrorSnapshot};
use crate::models::state::MirrorState;
use crate::traits::capture_session::{CaptureSession, VirtualDisplay};
use crate::traits::consent_facility::ConsentFacility;
use crate::traits::notification_sink::NotificationSink;
use crate::traits::output_surface::{DisplayMetricsProvider, OutputSurface};
use crate::traits::projection_service::ProjectionService;

/// Capture session obtained from the projection service.
struct Session {
    handle: Box<dyn CaptureSession>,
    id: Uuid,
    started_at: DateTime<Utc>,
}

/// Virtual display created from the current session.
struct Binding {
    display: Box<dyn VirtualDisplay>,
    info: BindingInfo,
}

/// Drives the consent → session → virtual display → teardown lifecycle.
///
/// Generic over the platform services via the traits in `crate::traits`.
/// Every method runs on the host's event thread; the only suspension
/// point is the consent dialog, whose result comes back through
/// [`MirrorController::on_consent_result`].
///
/// ```text
/// toggle ──► [ConsentFacility] ··· on_consent_result ──► [ProjectionService]
///                                                              │ token → session
///                          [OutputSurface] size ──► session.create_binding ──► VirtualDisplay
/// ```
///
/// A binding exists iff a session exists iff the state is `Active`.
/// Both are released exactly once, binding first.
pub struct MirrorController<C, P, S, N>
where
    C: ConsentFacility,
    P: ProjectionService,
    S: OutputSurface,
    N: NotificationSink,
{
    config: MirrorConfiguration,
    consent: C,
    projection: P,
    surface: S,
    sink: N,
    density: DisplayDensity,
    state: MirrorState,
    pending_request: Option<ConsentRequestId>,
    session: Option<Session>,
    binding: Option<Binding>,
    status: String,
    toggle_label: String,
}

impl<C, P, S, N> MirrorController<C, P, S, N>
where
    C: ConsentFacility,
    P: ProjectionService,
    S: OutputSurface,
    N: NotificationSink,
{
    /// Build a controller in the idle state.
    ///
    /// The display density is read from `metrics` here and never again.
    pub fn new(
        config: MirrorConfiguration,
        consent: C,
        projection: P,
        surface: S,
        metrics: &impl DisplayMetricsProvider,
        sink: N,
    ) -> Result<Self, MirrorError> {
        config.validate().map_err(MirrorError::ConfigurationFailed)?;
        let density = DisplayDensity::new(metrics.density_dpi())?;

        let mut controller = Self {
            status: String::new(),
            toggle_label: String::new(),
            config,
            consent,
            projection,
            surface,
            sink,
            density,
            state: MirrorState::Idle,
            pending_request: None,
            session: None,
            binding: None,
        };
        controller.show_ready();
        log::debug!("Mirror controller created, screen density: {}", density);
        Ok(controller)
    }

    pub fn state(&self) -> MirrorState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn toggle_label(&self) -> &str {
        &self.toggle_label
    }

    pub fn density(&self) -> DisplayDensity {
        self.density
    }

    pub fn pending_request(&self) -> Option<ConsentRequestId> {
        self.pending_request
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_binding(&self) -> bool {
        self.binding.is_some()
    }

    pub fn binding_info(&self) -> Option<&BindingInfo> {
        self.binding.as_ref().map(|b| &b.info)
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn snapshot(&self) -> MirrorSnapshot {
        MirrorSnapshot {
            state: self.state,
            status: self.status.clone(),
            toggle_label: self.toggle_label.clone(),
            density: self.density,
            binding: self.binding_info().cloned(),
        }
    }

    /// The start/stop button.
    ///
    /// Idle starts a consent request, active stops capture. While the
    /// consent dialog is up the press is ignored.
    pub fn toggle(&mut self) -> Result<MirrorState, MirrorError> {
        match self.state {
            MirrorState::Idle => self.request_permission(),
            MirrorState::AwaitingPermission => {
                log::warn!("Toggle ignored while waiting for consent");
                Ok(self.state)
            }
            MirrorState::Active => {
                self.stop();
                Ok(self.state)
            }
        }
    }

    /// Deliver the user's decision from the consent dialog.
    ///
    /// Results that do not match the outstanding request are dropped.
    pub fn on_consent_result(
        &mut self,
        result: ConsentResult<P::Token>,
    ) -> Result<MirrorState, MirrorError> {
        if !self.state.is_awaiting_permission() || self.pending_request != Some(result.request_id) {
            log::warn!(
                "Ignoring consent result for request {} in state {}",
                result.request_id,
                self.state.name()
            );
            return Ok(self.state);
        }
        self.pending_request = None;

        match result.into_token() {
            Ok(token) => {
                log::debug!("Screen capture permission granted, starting capture");
                self.start_mirroring(token)
            }
            Err(err) if err.is_denial() => Err(self.deny(err)),
            Err(err) => Err(self.fail_closed(err)),
        }
    }

    /// Explicit stop. Releases the binding, then the session, and shows
    /// the stop notice.
    pub fn stop(&mut self) {
        match self.state {
            MirrorState::Idle => log::debug!("Stop requested while idle"),
            MirrorState::AwaitingPermission => {
                log::debug!("Abandoning consent request {:?}", self.pending_request);
                self.release_all(false);
            }
            MirrorState::Active => self.release_all(true),
        }
    }

    /// Forced teardown when the host view goes away. Same release order
    /// as [`stop`](Self::stop), without the notice. Idempotent.
    pub fn teardown(&mut self) {
        if self.state.is_idle() && self.session.is_none() && self.binding.is_none() {
            return;
        }
        log::debug!("Tearing down mirror controller in state {}", self.state.name());
        self.release_all(false);
    }

    // --- Internal helpers ---

    fn request_permission(&mut self) -> Result<MirrorState, MirrorError> {
        let request = ConsentRequestId::new();
        log::debug!("Requesting screen capture permission ({})", request);

        self.pending_request = Some(request);
        let text = self.config.requesting_status.clone();
        self.set_status(&text);
        self.set_state(MirrorState::AwaitingPermission);

        if let Err(err) = self.consent.request_consent(request) {
            self.pending_request = None;
            return Err(self.fail_closed(err));
        }
        Ok(self.state)
    }

    fn start_mirroring(&mut self, token: P::Token) -> Result<MirrorState, MirrorError> {
        // Checked before the token is spent so an unlaid-out view never
        // yields a session.
        let size = self.surface.size();
        if !size.is_renderable() {
            return Err(self.fail_closed(MirrorError::SurfaceNotReady {
                width: size.width,
                height: size.height,
            }));
        }

        let handle = match self.projection.obtain_session(token) {
            Ok(handle) => handle,
            Err(err) => return Err(self.fail_closed(err)),
        };
        let mut session = Session {
            handle,
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        };
        log::debug!("Capture session {} obtained", session.id);

        let spec = VirtualDisplaySpec::auto_mirror(self.config.display_name.clone(), size, self.density);
        log::debug!("Setting up virtual display: {} ({})", spec.size, spec.density);

        let target = self.surface.target();
        let display = match session.handle.create_binding(&spec, &target) {
            Ok(display) => display,
            Err(err) => {
                session.handle.stop();
                log::debug!("Capture session {} stopped after binding failure", session.id);
                return Err(self.fail_closed(err));
            }
        };

        let info = BindingInfo {
            name: spec.name,
            size: spec.size,
            density: spec.density,
            session_id: session.id.to_string(),
            started_at: session.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.session = Some(session);
        self.binding = Some(Binding { display, info });

        let status = self.config.active_status.clone();
        let label = self.config.stop_label.clone();
        let notice = self.config.started_notice.clone();
        self.set_status(&status);
        self.set_toggle_label(&label);
        self.set_state(MirrorState::Active);
        self.sink.show_notice(&notice);

        log::info!("Virtual display created: {} ({})", size, self.density);
        Ok(self.state)
    }

    /// Release binding then session, return to idle.
    fn release_all(&mut self, notify: bool) {
        if let Some(mut binding) = self.binding.take() {
            binding.display.release();
            log::debug!("Virtual display released");
        }

        if let Some(mut session) = self.session.take() {
            session.handle.stop();
            log::debug!("Capture session {} stopped", session.id);
        }

        self.pending_request = None;
        self.show_ready();
        self.set_state(MirrorState::Idle);

        if notify {
            let notice = self.config.stopped_notice.clone();
            self.sink.show_notice(&notice);
            log::info!("Screen capture stopped");
        }
    }

    fn deny(&mut self, err: MirrorError) -> MirrorError {
        log::warn!("Screen capture permission not granted: {}", err);
        let notice = self.config.denied_notice.clone();
        self.sink.show_notice(&notice);
        self.show_ready();
        self.set_state(MirrorState::Idle);
        self.sink.on_error(&err);
        err
    }

    /// Log, report and go back to idle. Nothing is held at this point.
    fn fail_closed(&mut self, err: MirrorError) -> MirrorError {
        log::error!("Screen capture failed: {}", err);
        self.sink.show_notice(&err.to_string());
        self.show_ready();
        self.set_state(MirrorState::Idle);
        self.sink.on_error(&err);
        err
    }

    fn show_ready(&mut self) {
        let status = self.config.ready_status.clone();
        let label = self.config.start_label.clone();
        self.set_status(&status);
        self.set_toggle_label(&label);
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
        self.sink.set_status(text);
    }

    fn set_toggle_label(&mut self, text: &str) {
        self.toggle_label = text.to_string();
        self.sink.set_toggle_label(text);
    }

    fn set_state(&mut self, new_state: MirrorState) {
        if self.state != new_state {
            log::debug!("Mirror state {} -> {}", self.state.name(), new_state.name());
        }
        self.state = new_state;
        self.sink.on_state_changed(new_state);
    }
}

impl<C, P, S, N> Drop for MirrorController<C, P, S, N>
where
    C: ConsentFacility,
    P: ProjectionService,
    S: OutputSurface,
    N: NotificationSink,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
