/// Convenience result type used across statcard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the card APIs.
///
/// Only [`CardError::Configuration`], [`CardError::Render`], [`CardError::Encode`] and
/// [`CardError::Other`] ever reach a caller of [`Card`](crate::Card); asset and cache failures are
/// absorbed where they occur.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid render request (blank filename, unsupported format).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An image or font reference could not be loaded or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// A cached card could not be read back.
    #[error("cache read error: {0}")]
    CacheRead(String),

    /// Raster surfaces could not be created or combined.
    #[error("render error: {0}")]
    Render(String),

    /// The finished card could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CardError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`CardError::CacheRead`] value.
    pub fn cache_read(msg: impl Into<String>) -> Self {
        Self::CacheRead(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
