pub mod authorization;
pub mod error;
pub mod event;
pub mod record;
pub mod request;
pub mod target;

pub use authorization::UploadAuthorization;
pub use error::{UploadError, UploadStage};
pub use event::NotificationEvent;
pub use record::UploadRecord;
pub use request::UploadRequest;
pub use target::StorageTarget;
