use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShooterError {
    #[error("could not read sprite {}: {source}", .path.display())]
    SpriteRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read tuning file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid tuning file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid tuning file {}: `{field}` {reason}", .path.display())]
    ConfigInvalid {
        path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },
}
