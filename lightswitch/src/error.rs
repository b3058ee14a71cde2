use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The operation would desynchronize threads currently blocked on the primitive.
    #[error("reset forbidden while {waiting} thread(s) are waiting")]
    InvalidState { waiting: usize },
}
