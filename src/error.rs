use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("sample ring capacity must be greater than zero")]
    ZeroCapacity,
    #[error("logical index {index} out of range for ring holding {len} samples")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Ring(#[from] RingError),
    #[error("window failed: {0}")]
    Ui(#[from] eframe::Error),
}
