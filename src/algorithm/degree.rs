//! 度分析
//!
//! 顶点度、高影响力顶点和孤立顶点

use crate::graph::{Graph, VertexKey};
use indexmap::IndexMap;
use std::sync::Arc;

/// 默认的影响力阈值（度严格大于该值）
pub const DEFAULT_INFLUENCE_THRESHOLD: usize = 3;

/// 度分析器
pub struct DegreeAnalysis<V: VertexKey> {
    graph: Arc<Graph<V>>,
}

impl<V: VertexKey> DegreeAnalysis<V> {
    pub fn new(graph: Arc<Graph<V>>) -> Self {
        Self { graph }
    }

    /// 每个顶点的度（顶点插入顺序）
    pub fn degrees(&self) -> IndexMap<V, usize> {
        self.graph
            .vertices()
            .map(|v| (v.clone(), self.graph.degree(v)))
            .collect()
    }

    /// 度严格大于阈值的顶点
    pub fn influential_vertices(&self, threshold: usize) -> Vec<V> {
        self.graph
            .vertices()
            .filter(|v| self.graph.degree(v) > threshold)
            .cloned()
            .collect()
    }

    /// 度为 0 的顶点
    pub fn isolated_vertices(&self) -> Vec<V> {
        self.graph
            .vertices()
            .filter(|v| self.graph.is_isolated(v))
            .cloned()
            .collect()
    }
}
