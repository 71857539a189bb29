//! 命令错误定义

use svgcad_core::error::GeometryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("No elements selected. Command cancelled.")]
    NoSelection,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Another command is in progress.")]
    Busy,

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
