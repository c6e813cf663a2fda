//! CommGraph - 通信网络图分析
//!
//! 对小规模无向图进行分析：
//! - 顶点度、高影响力顶点、孤立顶点
//! - 连通分量与最短路径（BFS）
//! - 直径（同分量内最长的最短路径）
//! - 环消除（DFS 逐个删除环上的边，得到无环子图）

pub mod algorithm;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{Component, CycleReduction, DiameterResult, PathResult};
pub use analyzer::{AnalysisReport, Analyzer};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, VertexKey};
