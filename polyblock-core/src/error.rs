/// Error type for catalog construction and piece notation parsing
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("piece catalog is empty")]
    EmptyCatalog,

    #[error("piece `{name}` has no cubes")]
    EmptyPiece { name: String },

    #[error("invalid piece notation at `{fragment}`")]
    Notation { fragment: String },
}
