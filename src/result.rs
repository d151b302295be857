use crate::error::StegoError;

/// Result type alias for all fallible operations of this crate.
pub type Result<T> = std::result::Result<T, StegoError>;
