//! 图算法模块
//!
//! 包含度分析、广度优先遍历、直径分析和环消除

mod cycle_reduction;
mod degree;
mod diameter;
mod traversal;

pub use cycle_reduction::{CycleReducer, CycleReduction};
pub use degree::{DegreeAnalysis, DEFAULT_INFLUENCE_THRESHOLD};
pub use diameter::{DiameterAnalysis, DiameterResult};
pub use traversal::{Component, PathResult, Traversal};
