pub mod config;
pub mod download;
pub mod error;
pub mod intake;
pub mod loading;
pub mod notify;
pub mod quality;
pub mod render;
pub mod request;
pub mod session;
pub mod visibility;

pub use config::DocsmithConfig;
pub use error::{DocsmithError, Result, ValidationError};
pub use intake::{IntakeTarget, UploadedFile};
pub use notify::{Toast, ToastKind};
pub use quality::QualityReport;
pub use request::{DocsRequest, PullRequestDraft, Purpose};
pub use session::{Connection, GeneratedDoc, Session, Tab};
pub use visibility::Visibility;
