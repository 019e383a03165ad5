//! Error types for the viewer.

use std::num::NonZeroU8;

use thiserror::Error;

/// Result type for viewer operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Errors that can occur while showing a preview.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Nothing to show.
    #[error("preview scene is empty")]
    EmptyScene,

    /// The app loop ended with an error code.
    #[error("viewer exited with code {0}")]
    Exit(NonZeroU8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(ViewerError::EmptyScene.to_string(), "preview scene is empty");
        let code = NonZeroU8::new(3).map(ViewerError::Exit);
        assert_eq!(code.map(|e| e.to_string()).as_deref(), Some("viewer exited with code 3"));
    }
}
