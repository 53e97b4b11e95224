use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Grid error: {0}")]
    Grid(#[from] crossweave_core::GridError),

    #[error("Dictionary error: {0}")]
    Dict(#[from] crossweave_dict::DictError),
}

pub type Result<T> = core::result::Result<T, Error>;
