#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read source file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to parse catalog: {0}")]
    CatalogParse(serde_json::Error),
    #[error("failed to parse selection list: {0}")]
    SelectionParse(serde_json::Error),
    #[error("slot index {index} out of range (slots: {len})")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("'{0}' is not an available option")]
    UnknownOption(String),

    #[error("RUT error: {0}")]
    Rut(#[from] intake_rut::RutError),
    #[error("text error: {0}")]
    Text(#[from] intake_types::TextError),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
