//! 几何计算错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Lines are parallel")]
    ParallelLines,

    #[error("Lines are opposite")]
    LinesOpposite,

    #[error("Radius too large for the selected lines")]
    InsufficientLength,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
