use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error(
        "Config file not found. Looked for:\n\
        - $CLOUDPANEL_CONFIG_PATH\n\
        - current directory: cloudpanel.local.yaml, cloudpanel.yaml\n\
        - ./.cloudpanel/ directory\n\
        - ~/.config/cloudpanel/cloudpanel.yaml"
    )]
    ConfigFileNotFound,

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
