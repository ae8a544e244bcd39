pub mod content;
pub mod handler;
pub mod sanitize;

pub use crate::domain::model::{DeliveryReceipt, EmailMessage, LeadRecord, LeadSubmission};
pub use crate::domain::ports::{ConfirmationService, ContentGenerator, EmailSender, LeadStore};
pub use crate::utils::error::Result;
