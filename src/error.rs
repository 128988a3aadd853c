use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown tween id: {0}")]
    UnknownTween(usize),
}
