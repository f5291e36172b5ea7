//! Conversion widgets
//!
//! A widget binds one [`ToolConfig`](crate::tools::ToolConfig) to a
//! [`ConversionSession`] and a [`ConversionBackend`]. [`Converter`] handles
//! file tools, [`UrlConverter`] handles tools that take a remote URL.
//!
//! ## Example
//!
//! ```rust,ignore
//! let tool = catalog.get("image-convert")?;
//! let mut widget = Converter::new(tool, backend);
//! widget.pick_files(vec![FileHandle::open("photo.jpg")?])?;
//! widget.choose_option("PNG")?;
//! widget.convert().await?;
//! let saved = widget.save_to(&store).await?;
//! ```

mod converter;
mod url;
mod view;

pub use converter::Converter;
pub use url::UrlConverter;
pub use view::{ConverterView, FileSummary, InputSummary, OptionChoice, ViewState};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::ConversionBackend;
use crate::observability::Metrics;
use crate::session::{ConversionSession, SessionError, SessionStatus};
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("There is no converted file to save")]
    NoResult,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Drive one session through begin, submit and complete
///
/// Validation failures never reach the backend. Exactly one backend call
/// is made otherwise.
async fn run_conversion<'a>(
    session: &'a mut ConversionSession,
    backend: &dyn ConversionBackend,
    metrics: &Metrics,
) -> Result<&'a SessionStatus, SessionError> {
    let request = match session.begin() {
        Ok(request) => request,
        Err(err) => {
            metrics.validation_rejected();
            debug!(
                session_id = %session.id(),
                tool = %session.tool().id,
                error = %err,
                "Conversion not started"
            );
            return Err(err);
        }
    };

    metrics.conversion_started();
    info!(
        session_id = %session.id(),
        tool = %session.tool().id,
        endpoint = %request.endpoint,
        "Starting conversion"
    );

    let outcome = backend.submit(request).await;
    let status = session.complete(outcome);

    match status {
        SessionStatus::Success(artifact) => {
            metrics.conversion_succeeded();
            info!(size = artifact.len(), content_type = %artifact.content_type, "Conversion succeeded");
        }
        SessionStatus::Error(message) => {
            metrics.conversion_failed();
            warn!(error = %message, "Conversion failed");
        }
        SessionStatus::Idle | SessionStatus::Converting => {}
    }

    Ok(status)
}
