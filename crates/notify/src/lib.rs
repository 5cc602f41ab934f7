//! Administrative notification for new inscriptions.
//!
//! When a submission is persisted, the institute's mailbox receives an
//! HTML summary with the uploaded documents attached. Delivery is best
//! effort: configuration is optional (see [`EmailConfig::from_env`]) and a
//! failed or timed-out send never affects the persisted record.

pub mod email;
pub mod summary;

pub use email::{AttachmentFile, EmailConfig, EmailError, NotificationMailer};
