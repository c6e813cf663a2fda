//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    UnknownVertex(String),

    #[error("无效的边: {0}")]
    InvalidEdge(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// 构造顶点不存在错误
    pub(crate) fn unknown_vertex<V: std::fmt::Debug>(vertex: &V) -> Self {
        Error::UnknownVertex(format!("{:?}", vertex))
    }
}
