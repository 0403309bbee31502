/// Errors that can occur while reading or writing preset files.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable entries in {0}")]
    NoEntries(String),

    #[error("invalid import pattern: {0}")]
    Pattern(#[from] regex::Error),
}
