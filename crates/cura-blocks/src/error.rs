//! Error types for cura-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot write export block: {0}")]
    Directive(#[from] cura_directive::Error),
}
