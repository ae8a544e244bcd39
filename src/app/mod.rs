// Application layer: inbound endpoint and the lead capture client

pub mod endpoint;
pub mod lead_capture;

pub use endpoint::{failure, handler_from_config, respond, ConfirmationResponse, ProviderHandler};
pub use lead_capture::LeadCaptureClient;
