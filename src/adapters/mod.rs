// Adapters layer: concrete implementations for external systems (providers, remote handler, storage)

pub mod gemini;
pub mod remote;
pub mod resend;
pub mod storage;

pub use gemini::GeminiClient;
pub use remote::RemoteConfirmationService;
pub use resend::ResendClient;
pub use storage::{InMemoryLeadStore, LocalLeadStore};
