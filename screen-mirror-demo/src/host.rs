use std::sync::mpsc::Sender;

use screen_mirror_core::{ConsentResult, MirrorConfiguration, MirrorError, SurfaceSize};

use crate::commands::{Command, HELP};
use crate::mirror_state::{
    ApprovalToken, ConsoleSink, Controller, FixedDisplayMetrics, SimulatedPlatform,
};

const DEFAULT_DENSITY_DPI: u32 = 420;
const DEFAULT_SURFACE: SurfaceSize = SurfaceSize {
    width: 1080,
    height: 2400,
};

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum HostEvent {
    Command(Command),
    /// The consent dialog was answered.
    Consent(ConsentResult<ApprovalToken>),
    /// stdin reached EOF.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Startup options for the simulated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostOptions {
    pub density_dpi: u32,
    pub surface: SurfaceSize,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            density_dpi: DEFAULT_DENSITY_DPI,
            surface: DEFAULT_SURFACE,
        }
    }
}

impl HostOptions {
    /// Reads `SCREEN_MIRROR_DENSITY` and `SCREEN_MIRROR_SURFACE` (WxH),
    /// keeping defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(value) = std::env::var("SCREEN_MIRROR_DENSITY") {
            match value.trim().parse() {
                Ok(dpi) => options.density_dpi = dpi,
                Err(_) => log::warn!("Ignoring SCREEN_MIRROR_DENSITY={:?}", value),
            }
        }
        if let Ok(value) = std::env::var("SCREEN_MIRROR_SURFACE") {
            match crate::commands::parse_size(&value) {
                Ok(size) => options.surface = size,
                Err(e) => log::warn!("Ignoring SCREEN_MIRROR_SURFACE: {}", e),
            }
        }
        options
    }
}

/// The host "activity": owns the controller on the event thread and
/// routes commands and dialog results into it.
pub struct Host {
    platform: SimulatedPlatform,
    controller: Controller,
    events: Sender<HostEvent>,
}

impl Host {
    pub fn new(options: HostOptions, events: Sender<HostEvent>) -> Result<Self, MirrorError> {
        let platform = SimulatedPlatform::new(options.surface);
        let controller = Controller::new(
            MirrorConfiguration::default(),
            platform.consent_dialog(),
            platform.projection(),
            platform.surface(),
            &FixedDisplayMetrics(options.density_dpi),
            ConsoleSink::default(),
        )?;

        Ok(Self {
            platform,
            controller,
            events,
        })
    }

    pub fn platform(&self) -> &SimulatedPlatform {
        &self.platform
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn handle(&mut self, event: HostEvent) -> Flow {
        match event {
            HostEvent::Command(command) => self.handle_command(command),
            HostEvent::Consent(result) => {
                // Failures are already reported through the sink.
                let _ = self.controller.on_consent_result(result);
                Flow::Continue
            }
            HostEvent::InputClosed => {
                log::debug!("Input closed");
                self.controller.teardown();
                Flow::Exit
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Toggle => {
                let _ = self.controller.toggle();
            }
            Command::Approve => self.answer_dialog(true),
            Command::Deny | Command::Cancel => self.answer_dialog(false),
            Command::Resize(size) => {
                self.platform.resize(size);
                println!("[view] resized to {}", size);
            }
            Command::Status => self.print_status(),
            Command::Destroy => {
                self.controller.teardown();
                log::debug!("View destroyed");
                return Flow::Exit;
            }
            Command::Quit => return Flow::Exit,
            Command::Help => println!("{}", HELP),
        }
        Flow::Continue
    }

    fn print_status(&self) {
        match self.controller.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
        if self.platform.dialog_open() {
            println!("[dialog] waiting for an answer");
        }
        if let Some(notice) = &self.controller.sink().last_notice {
            println!("[toast] last: {}", notice);
        }
        if let Some(event) = self.platform.journal().last() {
            println!("[platform] last: {}", event);
        }
    }

    /// The answer is posted back onto the event queue rather than handed
    /// to the controller directly, like a real dialog callback.
    fn answer_dialog(&mut self, approved: bool) {
        let Some(result) = self.platform.resolve_dialog(approved) else {
            println!("[dialog] no consent dialog is showing");
            return;
        };
        if self.events.send(HostEvent::Consent(result)).is_err() {
            log::error!("Event queue closed; dropping consent result");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use screen_mirror_core::MirrorState;

    use super::*;
    use crate::mirror_state::PlatformEvent;

    fn host() -> (Host, Receiver<HostEvent>) {
        let (tx, rx) = mpsc::channel();
        (Host::new(HostOptions::default(), tx).unwrap(), rx)
    }

    /// Deliver queued events the way the main loop does.
    fn pump(host: &mut Host, rx: &Receiver<HostEvent>) {
        while let Ok(event) = rx.try_recv() {
            host.handle(event);
        }
    }

    fn released_and_stopped(events: &[PlatformEvent]) -> (usize, usize) {
        let released = events
            .iter()
            .filter(|e| matches!(e, PlatformEvent::DisplayReleased(_)))
            .count();
        let stopped = events
            .iter()
            .filter(|e| matches!(e, PlatformEvent::SessionStopped(_)))
            .count();
        (released, stopped)
    }

    #[test]
    fn approval_is_delivered_asynchronously() {
        let (mut host, rx) = host();

        host.handle(HostEvent::Command(Command::Toggle));
        host.handle(HostEvent::Command(Command::Approve));
        assert_eq!(host.controller().state(), MirrorState::AwaitingPermission);

        pump(&mut host, &rx);
        assert_eq!(host.controller().state(), MirrorState::Active);

        let info = host.controller().binding_info().unwrap();
        assert_eq!(info.size, DEFAULT_SURFACE);
        assert_eq!(info.density.dpi(), DEFAULT_DENSITY_DPI);
    }

    #[test]
    fn deny_returns_to_idle() {
        let (mut host, rx) = host();

        host.handle(HostEvent::Command(Command::Toggle));
        host.handle(HostEvent::Command(Command::Deny));
        pump(&mut host, &rx);

        assert_eq!(host.controller().state(), MirrorState::Idle);
        assert_eq!(
            host.controller().sink().last_notice.as_deref(),
            Some("Permission denied")
        );
    }

    #[test]
    fn full_cycle_releases_in_order() {
        let (mut host, rx) = host();

        host.handle(HostEvent::Command(Command::Toggle));
        host.handle(HostEvent::Command(Command::Approve));
        pump(&mut host, &rx);
        host.handle(HostEvent::Command(Command::Toggle));

        let journal = host.platform().journal();
        let tail: Vec<_> = journal.iter().rev().take(2).rev().cloned().collect();
        assert!(matches!(tail[0], PlatformEvent::DisplayReleased(ref name) if name == "ScreenCapture"));
        assert!(matches!(tail[1], PlatformEvent::SessionStopped(_)));
        assert_eq!(host.controller().state(), MirrorState::Idle);
    }

    #[test]
    fn unlaid_out_view_fails_closed_then_recovers() {
        let (mut host, rx) = host();
        host.handle(HostEvent::Command(Command::Resize(SurfaceSize::new(0, 0))));

        host.handle(HostEvent::Command(Command::Toggle));
        host.handle(HostEvent::Command(Command::Approve));
        pump(&mut host, &rx);
        assert_eq!(host.controller().state(), MirrorState::Idle);
        assert!(!host
            .platform()
            .journal()
            .iter()
            .any(|e| matches!(e, PlatformEvent::SessionGranted(_))));

        host.handle(HostEvent::Command(Command::Resize(SurfaceSize::new(800, 600))));
        host.handle(HostEvent::Command(Command::Toggle));
        host.handle(HostEvent::Command(Command::Approve));
        pump(&mut host, &rx);
        assert_eq!(host.controller().state(), MirrorState::Active);
    }

    #[test]
    fn destroy_tears_down_once_and_exits() {
        let (mut host, rx) = host();

        host.handle(HostEvent::Command(Command::Toggle));
        host.handle(HostEvent::Command(Command::Approve));
        pump(&mut host, &rx);

        assert_eq!(host.handle(HostEvent::Command(Command::Destroy)), Flow::Exit);
        let platform = host.platform().clone();
        drop(host);

        assert_eq!(released_and_stopped(&platform.journal()), (1, 1));
    }

    #[test]
    fn approve_without_dialog_is_harmless() {
        let (mut host, rx) = host();

        assert_eq!(host.handle(HostEvent::Command(Command::Approve)), Flow::Continue);
        pump(&mut host, &rx);

        assert_eq!(host.controller().state(), MirrorState::Idle);
        assert!(host.platform().journal().is_empty());
    }

    #[test]
    fn input_closed_exits() {
        let (mut host, _rx) = host();
        assert_eq!(host.handle(HostEvent::InputClosed), Flow::Exit);
    }
}
