/// Configuration for a mirror controller.
///
/// Only the display name and user-facing texts are configurable; the
/// binding flags are fixed to auto-mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfiguration {
    /// Name given to the virtual display (default: "ScreenCapture").
    pub display_name: String,

    /// Status text while idle.
    pub ready_status: String,

    /// Status text while the consent dialog is up.
    pub requesting_status: String,

    /// Status text while mirroring.
    pub active_status: String,

    /// Toggle label while idle.
    pub start_label: String,

    /// Toggle label while mirroring.
    pub stop_label: String,

    pub denied_notice: String,
    pub started_notice: String,
    pub stopped_notice: String,
}

impl MirrorConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.display_name.trim().is_empty() {
            return Err("display name must not be empty".into());
        }
        let texts = [
            ("ready status", &self.ready_status),
            ("requesting status", &self.requesting_status),
            ("active status", &self.active_status),
            ("start label", &self.start_label),
            ("stop label", &self.stop_label),
            ("denied notice", &self.denied_notice),
            ("started notice", &self.started_notice),
            ("stopped notice", &self.stopped_notice),
        ];
        if let Some((field, _)) = texts.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(format!("{} must not be empty", field));
        }
        if self.start_label == self.stop_label {
            return Err(format!(
                "start and stop labels must differ: {:?}",
                self.start_label
            ));
        }
        Ok(())
    }
}

impl Default for MirrorConfiguration {
    fn default() -> Self {
        Self {
            display_name: "ScreenCapture".into(),
            ready_status: "Ready to test MediaProjection".into(),
            requesting_status: "Requesting MediaProjection permission...".into(),
            active_status: "Screen capture active! Check SurfaceView.".into(),
            start_label: "Start Capture".into(),
            stop_label: "Stop Capture".into(),
            denied_notice: "Permission denied".into(),
            started_notice: "Screen capture started!".into(),
            stopped_notice: "Screen capture stopped".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(MirrorConfiguration::default().validate().is_ok());
    }

    #[test]
    fn rejects_blank_display_name() {
        let config = MirrorConfiguration {
            display_name: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_texts() {
        let config = MirrorConfiguration {
            ready_status: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err("ready status must not be empty".to_string()));

        let config = MirrorConfiguration {
            stopped_notice: " ".into(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err("stopped notice must not be empty".to_string()));
    }

    #[test]
    fn rejects_identical_labels() {
        let config = MirrorConfiguration {
            stop_label: "Start Capture".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("must differ"));
    }
}
