//! 图数据结构
//!
//! 无向、无权、插入有序的邻接表

use super::edge::Edge;
use super::vertex::VertexKey;
use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::debug;

/// 无向图
///
/// 顶点按首次出现的顺序保存，邻接表按边的插入顺序保存。
/// 这两个顺序决定了所有遍历的顺序，从而保证结果可复现。
///
/// 对称性不变量：`v ∈ adjacency[u]` 当且仅当 `u ∈ adjacency[v]`。
/// 孤立顶点只出现在 `vertices` 中，没有邻接表条目。
#[derive(Debug, Clone, Serialize)]
pub struct Graph<V: VertexKey = String> {
    /// 所有顶点（插入顺序）
    vertices: IndexSet<V>,
    /// 邻接表（插入顺序，重复边去重）
    adjacency: IndexMap<V, IndexSet<V>>,
}

impl<V: VertexKey> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexKey> Graph<V> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            adjacency: IndexMap::new(),
        }
    }

    /// 从有序边列表构建图
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        Self::from_edges_with_vertices(edges, std::iter::empty())
    }

    /// 从有序边列表和额外的孤立顶点构建图
    pub fn from_edges_with_vertices<I, J>(edges: I, isolated: J) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
        J: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        for v in isolated {
            graph.add_vertex(v);
        }
        Ok(graph)
    }

    /// 由顶点集和邻接表直接组装（调用方保证对称性）
    pub(crate) fn from_parts(vertices: IndexSet<V>, adjacency: IndexMap<V, IndexSet<V>>) -> Self {
        Self {
            vertices,
            adjacency,
        }
    }

    // ==================== 构建 ====================

    /// 注册顶点（可以没有任何边），返回是否为新顶点
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        self.vertices.insert(vertex)
    }

    /// 添加无向边
    ///
    /// 返回 `Ok(true)` 表示新边，`Ok(false)` 表示重复边（被忽略）。
    /// 自环返回 `InvalidEdge`。
    pub fn add_edge(&mut self, u: V, v: V) -> Result<bool> {
        if u == v {
            return Err(Error::InvalidEdge(format!("不允许自环: {:?}", u)));
        }

        self.vertices.insert(u.clone());
        self.vertices.insert(v.clone());

        if self.has_edge(&u, &v) {
            debug!(u = ?u, v = ?v, "忽略重复边");
            return Ok(false);
        }

        self.adjacency
            .entry(u.clone())
            .or_default()
            .insert(v.clone());
        self.adjacency.entry(v).or_default().insert(u);

        Ok(true)
    }

    // ==================== 查询 ====================

    /// 所有顶点（插入顺序）
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 无向边数量（每条边只计一次）
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// 顶点是否存在
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// 两点之间是否有边
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.adjacency
            .get(u)
            .map(|n| n.contains(v))
            .unwrap_or(false)
    }

    /// 顶点的度（未知顶点为 0）
    pub fn degree(&self, vertex: &V) -> usize {
        self.adjacency.get(vertex).map(|n| n.len()).unwrap_or(0)
    }

    /// 顶点的邻居（插入顺序，未知或孤立顶点为空）
    pub fn neighbors<'a>(&'a self, vertex: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.adjacency.get(vertex).into_iter().flatten()
    }

    /// 是否为孤立顶点
    ///
    /// 没有邻接表条目和邻接表为空都算孤立。
    pub fn is_isolated(&self, vertex: &V) -> bool {
        self.contains_vertex(vertex) && self.degree(vertex) == 0
    }

    /// 去重后的无向边列表，按邻接表遍历顺序首次出现排列
    pub fn edges(&self) -> Vec<Edge<V>> {
        let mut seen: IndexSet<Edge<V>> = IndexSet::new();
        for (u, neighbors) in &self.adjacency {
            for v in neighbors {
                seen.insert(Edge::normalized(u.clone(), v.clone()));
            }
        }
        seen.into_iter().collect()
    }

    /// 邻接表引用
    pub(crate) fn adjacency(&self) -> &IndexMap<V, IndexSet<V>> {
        &self.adjacency
    }

    /// 顶点集引用
    pub(crate) fn vertex_set(&self) -> &IndexSet<V> {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_basic() {
        let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C")]).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.vertices().copied().collect::<Vec<_>>(), vec!["A", "B", "C"]);

        // 邻居保持插入顺序
        assert_eq!(graph.neighbors(&"A").copied().collect::<Vec<_>>(), vec!["B", "C"]);
        assert_eq!(graph.neighbors(&"C").copied().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn test_graph_symmetry() {
        let graph = Graph::from_edges([(1u32, 2u32), (2, 3), (4, 1)]).unwrap();
        for u in graph.vertices() {
            for v in graph.neighbors(u) {
                assert!(graph.has_edge(v, u), "{} -> {} 缺少反向边", v, u);
            }
        }
    }

    #[test]
    fn test_graph_duplicate_edges() {
        let mut graph = Graph::new();
        assert!(graph.add_edge("A", "B").unwrap());
        assert!(!graph.add_edge("A", "B").unwrap());
        assert!(!graph.add_edge("B", "A").unwrap());

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(&"A"), 1);
        assert_eq!(graph.degree(&"B"), 1);
    }

    #[test]
    fn test_graph_self_loop_rejected() {
        let mut graph = Graph::new();
        let err = graph.add_edge("A", "A").unwrap_err();
        assert!(matches!(err, Error::InvalidEdge(_)));
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn test_graph_isolated_vertex() {
        let graph = Graph::from_edges_with_vertices([("L", "M")], ["Z"]).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.contains_vertex(&"Z"));
        assert!(graph.is_isolated(&"Z"));
        assert!(!graph.is_isolated(&"L"));
        assert_eq!(graph.degree(&"Z"), 0);
        assert_eq!(graph.neighbors(&"Z").count(), 0);

        // 未知顶点不是错误
        assert_eq!(graph.degree(&"Q"), 0);
        assert_eq!(graph.neighbors(&"Q").count(), 0);
        assert!(!graph.is_isolated(&"Q"));
    }

    #[test]
    fn test_graph_edges_listing() {
        let graph = Graph::from_edges([("B", "A"), ("B", "C"), ("C", "A")]).unwrap();
        let edges: Vec<_> = graph
            .edges()
            .into_iter()
            .map(|e| e.into_pair())
            .collect();
        assert_eq!(edges, vec![("A", "B"), ("B", "C"), ("A", "C")]);
    }
}
