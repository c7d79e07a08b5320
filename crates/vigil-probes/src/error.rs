#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid probe definition `{0}`, expected name=host:port")]
    InvalidDefinition(String),
}
