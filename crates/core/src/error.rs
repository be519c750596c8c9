use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MenuError>;

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
    #[error("localized text is missing its source-language entry")]
    MissingSourceText,
    #[error("invalid menu data: {0}")]
    InvalidMenu(String),
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
