//! Crate-level error type for building the page shell.

use crate::font::FontError;
use crate::ui::provider::RegistrationError;

/// Failures while assembling the root shell at startup.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The font resource could not be resolved.
    #[error(transparent)]
    Font(#[from] FontError),

    /// A composition needs a render mode the runtime does not offer.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// The runtime is interactive but no client bundle was configured.
    #[error("interactive rendering needs a client bundle (render.client_bundle)")]
    MissingClientBundle,
}
