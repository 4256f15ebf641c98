use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use screen_mirror_core::{
    CaptureSession, ConsentFacility, ConsentRequestId, ConsentResult, DisplayMetricsProvider,
    MirrorController, MirrorError, MirrorState, NotificationSink, OutputSurface,
    ProjectionService, SurfaceSize, SurfaceTarget, VirtualDisplay, VirtualDisplaySpec,
};

pub type Controller =
    MirrorController<SimulatedConsentDialog, SimulatedProjection, SimulatedSurface, ConsoleSink>;

/// Single-use token handed out when the simulated dialog is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApprovalToken(Uuid);

impl fmt::Display for ApprovalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the simulated platform observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    DialogShown(ConsentRequestId),
    DialogClosed { approved: bool },
    SessionGranted(ApprovalToken),
    DisplayCreated { name: String, size: SurfaceSize, dpi: u32 },
    DisplayReleased(String),
    SessionStopped(ApprovalToken),
}

impl fmt::Display for PlatformEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DialogShown(request) => write!(f, "consent dialog shown ({})", request),
            Self::DialogClosed { approved } => write!(f, "consent dialog closed, approved={}", approved),
            Self::SessionGranted(token) => write!(f, "session granted for token {}", token),
            Self::DisplayCreated { name, size, dpi } => {
                write!(f, "virtual display {:?} created: {} @ {} dpi", name, size, dpi)
            }
            Self::DisplayReleased(name) => write!(f, "virtual display {:?} released", name),
            Self::SessionStopped(token) => write!(f, "session {} stopped", token),
        }
    }
}

/// State shared between the simulated services and the host.
#[derive(Default)]
struct PlatformShared {
    journal: Vec<PlatformEvent>,
    pending_dialog: Option<ConsentRequestId>,
    issued_tokens: HashSet<ApprovalToken>,
    surface_size: SurfaceSize,
}

/// In-process stand-in for the consent dialog, projection service and
/// output view.
///
/// Cloning yields another handle onto the same platform.
#[derive(Clone)]
pub struct SimulatedPlatform {
    shared: Arc<Mutex<PlatformShared>>,
}

impl SimulatedPlatform {
    pub fn new(surface_size: SurfaceSize) -> Self {
        Self {
            shared: Arc::new(Mutex::new(PlatformShared {
                surface_size,
                ..Default::default()
            })),
        }
    }

    pub fn consent_dialog(&self) -> SimulatedConsentDialog {
        SimulatedConsentDialog {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn projection(&self) -> SimulatedProjection {
        SimulatedProjection {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn surface(&self) -> SimulatedSurface {
        SimulatedSurface {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.shared.lock().pending_dialog.is_some()
    }

    /// Close the dialog the way the user would. Approval mints a token
    /// the projection service will accept once.
    pub fn resolve_dialog(&self, approved: bool) -> Option<ConsentResult<ApprovalToken>> {
        let mut shared = self.shared.lock();
        let request = shared.pending_dialog.take()?;
        shared.journal.push(PlatformEvent::DialogClosed { approved });

        if approved {
            let token = ApprovalToken(Uuid::new_v4());
            shared.issued_tokens.insert(token);
            Some(ConsentResult::approved(request, token))
        } else {
            Some(ConsentResult::denied(request))
        }
    }

    pub fn resize(&self, size: SurfaceSize) {
        self.shared.lock().surface_size = size;
    }

    pub fn journal(&self) -> Vec<PlatformEvent> {
        self.shared.lock().journal.clone()
    }
}

pub struct SimulatedConsentDialog {
    shared: Arc<Mutex<PlatformShared>>,
}

impl ConsentFacility for SimulatedConsentDialog {
    fn request_consent(&mut self, request: ConsentRequestId) -> Result<(), MirrorError> {
        let mut shared = self.shared.lock();
        if shared.pending_dialog.is_some() {
            return Err(MirrorError::ConsentRequestFailed(
                "a consent dialog is already showing".into(),
            ));
        }
        shared.pending_dialog = Some(request);
        shared.journal.push(PlatformEvent::DialogShown(request));
        println!("[dialog] Allow screen capture? (approve / deny)");
        Ok(())
    }
}

pub struct SimulatedProjection {
    shared: Arc<Mutex<PlatformShared>>,
}

impl ProjectionService for SimulatedProjection {
    type Token = ApprovalToken;

    fn obtain_session(&mut self, token: ApprovalToken) -> Result<Box<dyn CaptureSession>, MirrorError> {
        let mut shared = self.shared.lock();
        if !shared.issued_tokens.remove(&token) {
            return Err(MirrorError::SessionUnavailable(format!(
                "unknown or spent approval token {}",
                token
            )));
        }
        shared.journal.push(PlatformEvent::SessionGranted(token));
        Ok(Box::new(SimulatedSession {
            shared: Arc::clone(&self.shared),
            token,
        }))
    }
}

struct SimulatedSession {
    shared: Arc<Mutex<PlatformShared>>,
    token: ApprovalToken,
}

impl CaptureSession for SimulatedSession {
    fn create_binding(
        &mut self,
        spec: &VirtualDisplaySpec,
        target: &SurfaceTarget,
    ) -> Result<Box<dyn VirtualDisplay>, MirrorError> {
        log::debug!("Mirroring into surface {:?}", target);
        self.shared.lock().journal.push(PlatformEvent::DisplayCreated {
            name: spec.name.clone(),
            size: spec.size,
            dpi: spec.density.dpi(),
        });
        Ok(Box::new(SimulatedDisplay {
            shared: Arc::clone(&self.shared),
            name: spec.name.clone(),
        }))
    }

    fn stop(&mut self) {
        self.shared
            .lock()
            .journal
            .push(PlatformEvent::SessionStopped(self.token));
    }
}

struct SimulatedDisplay {
    shared: Arc<Mutex<PlatformShared>>,
    name: String,
}

impl VirtualDisplay for SimulatedDisplay {
    fn release(&mut self) {
        self.shared
            .lock()
            .journal
            .push(PlatformEvent::DisplayReleased(self.name.clone()));
    }
}

pub struct SimulatedSurface {
    shared: Arc<Mutex<PlatformShared>>,
}

impl OutputSurface for SimulatedSurface {
    fn size(&self) -> SurfaceSize {
        self.shared.lock().surface_size
    }

    fn target(&self) -> SurfaceTarget {
        SurfaceTarget(1)
    }
}

/// Fixed density, as read from the host display at startup.
pub struct FixedDisplayMetrics(pub u32);

impl DisplayMetricsProvider for FixedDisplayMetrics {
    fn density_dpi(&self) -> u32 {
        self.0
    }
}

/// Prints status, button and toast updates to stdout.
#[derive(Default)]
pub struct ConsoleSink {
    pub last_notice: Option<String>,
}

impl NotificationSink for ConsoleSink {
    fn set_status(&mut self, text: &str) {
        println!("[status] {}", text);
    }

    fn set_toggle_label(&mut self, text: &str) {
        println!("[button] {}", text);
    }

    fn show_notice(&mut self, text: &str) {
        println!("[toast] {}", text);
        self.last_notice = Some(text.to_string());
    }

    fn on_state_changed(&mut self, state: MirrorState) {
        log::debug!("state: {}", state.name());
    }

    fn on_error(&mut self, error: &MirrorError) {
        log::warn!("recovered from: {}", error);
    }
}
