use crate::{
    abs::{GlError, ShaderError},
    config::ConfigError,
};

/// Errors that stop the viewer before or while it starts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("initialization failed: {0}")]
    Init(String),
    #[error(transparent)]
    Gl(#[from] GlError),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
