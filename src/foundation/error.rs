pub type TvgResult<T> = Result<T, TvgError>;

#[derive(thiserror::Error, Debug)]
pub enum TvgError {
    #[error("validation error: {0}")]
    Validation(String),

    /// The engine reported a negative readiness status.
    #[error("engine failed to load (status {status})")]
    EngineLoad { status: i32 },

    #[error("animation creation error: {0}")]
    Creation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("texture error: {0}")]
    Texture(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("animation texture has been disposed")]
    Disposed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TvgError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn creation(msg: impl Into<String>) -> Self {
        Self::Creation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn texture(msg: impl Into<String>) -> Self {
        Self::Texture(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TvgError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}
