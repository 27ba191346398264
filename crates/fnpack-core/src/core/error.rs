use thiserror::Error;

pub type PackResult<T> = Result<T, PackError>;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Dependency error: {0}.")]
    Dependency(String),

    #[error("Could not find packager '{0}'")]
    PackagerNotFound(String),

    #[error("{command} failed with code {code}")]
    Spawn {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },
}
