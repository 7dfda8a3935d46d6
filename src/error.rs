use thiserror::Error;

/// Reasons a template-area description could not be read.
///
/// These never reach callers of [`parse_templates`](crate::template::parse_templates):
/// a malformed template contributes no areas and the error is logged instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template row opened with {quote} at byte {offset} is never closed")]
    UnterminatedRow { quote: char, offset: usize },

    #[error("'{token}' is not a valid area name")]
    InvalidAreaName { token: String },
}

/// Errors produced while building [`LayoutOptions`](crate::config::LayoutOptions).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("breakpoint widths must be positive and strictly increasing, got {widths:?}")]
    UnorderedBreakpoints { widths: [f64; 5] },

    #[error("default unit must not be empty")]
    EmptyUnit,

    #[cfg(feature = "serde")]
    #[error("invalid layout options: {0}")]
    Json(#[from] serde_json::Error),
}
