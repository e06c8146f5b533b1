#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Survey(#[from] percept_core::Error),
    #[error(transparent)]
    Layout(#[from] percept_layout::Error),
    #[error("unknown attribute id: {id}")]
    UnknownAttribute { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
