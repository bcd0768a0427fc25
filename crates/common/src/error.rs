// Error types for the sishc admin panel

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not determine {0} directory")]
    MissingBaseDir(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
