pub mod capture_session;
pub mod consent_facility;
pub mod notification_sink;
pub mod output_surface;
pub mod projection_service;
