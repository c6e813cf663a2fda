//! 环消除
//!
//! 反复执行 DFS：找到一个环就删除一条边，然后从头重新扫描，
//! 直到找不到环为止。这是启发式方法，删除的边集不保证最小。

use crate::graph::{Edge, Graph, VertexKey};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// 环消除结果
#[derive(Debug, Clone, Serialize)]
pub struct CycleReduction<V: VertexKey> {
    /// 发现的环（闭合：首尾顶点相同），按发现顺序
    pub cycles: Vec<Vec<V>>,
    /// 删除的边，与 `cycles` 一一对应
    pub removed_edges: Vec<Edge<V>>,
    /// 删除边之后的无环图（顶点集不变）
    pub reduced: Graph<V>,
}

impl<V: VertexKey> CycleReduction<V> {
    /// 原图是否本来就无环
    pub fn was_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// 环消除器
pub struct CycleReducer<V: VertexKey> {
    graph: Arc<Graph<V>>,
}

impl<V: VertexKey> CycleReducer<V> {
    pub fn new(graph: Arc<Graph<V>>) -> Self {
        Self { graph }
    }

    /// 消除所有环
    ///
    /// 只修改私有副本，原图保持不变。
    pub fn reduce(&self) -> CycleReduction<V> {
        let mut working = WorkingCopy::from_graph(&self.graph);
        let mut selected: HashSet<Edge<V>> = HashSet::new();
        let mut cycles = Vec::new();
        let mut removed_edges = Vec::new();

        while let Some((cycle, edge)) = working.find_cycle(&selected) {
            debug!(cycle = ?cycle, edge = ?edge, "删除环上的边");
            working.remove_edge(&edge);
            selected.insert(edge.clone());
            cycles.push(cycle);
            removed_edges.push(edge);
        }

        info!(
            cycles = cycles.len(),
            remaining_edges = working.edge_count(),
            "环消除完成"
        );

        CycleReduction {
            cycles,
            removed_edges,
            reduced: working.into_graph(),
        }
    }
}

/// DFS 栈帧
struct Frame<'a, V> {
    vertex: &'a V,
    parent: Option<&'a V>,
    /// 下一个待检查邻居的下标
    next: usize,
}

/// 可删除边的邻接表副本
struct WorkingCopy<V: VertexKey> {
    vertices: IndexSet<V>,
    adjacency: IndexMap<V, IndexSet<V>>,
}

impl<V: VertexKey> WorkingCopy<V> {
    fn from_graph(graph: &Graph<V>) -> Self {
        Self {
            vertices: graph.vertex_set().clone(),
            adjacency: graph.adjacency().clone(),
        }
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// 双向删除，保持其余邻居的顺序
    fn remove_edge(&mut self, edge: &Edge<V>) {
        let (u, v) = edge.endpoints();
        if let Some(neighbors) = self.adjacency.get_mut(u) {
            neighbors.shift_remove(v);
        }
        if let Some(neighbors) = self.adjacency.get_mut(v) {
            neighbors.shift_remove(u);
        }
    }

    /// 扫描全部顶点，返回第一个环及要删除的边
    ///
    /// 显式栈模拟递归 DFS。当 `u` 遇到已访问且不是其父节点的 `v`，
    /// 且 `v` 仍在当前路径上时，路径中从 `v` 到 `u` 的部分加上 `v` 构成环。
    fn find_cycle(&self, selected: &HashSet<Edge<V>>) -> Option<(Vec<V>, Edge<V>)> {
        let mut visited: HashSet<&V> = HashSet::new();

        for root in &self.vertices {
            if !visited.insert(root) {
                continue;
            }

            let mut path: Vec<&V> = vec![root];
            let mut stack = vec![Frame {
                vertex: root,
                parent: None,
                next: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                let neighbor = self
                    .adjacency
                    .get(frame.vertex)
                    .and_then(|n| n.get_index(frame.next));

                let Some(neighbor) = neighbor else {
                    stack.pop();
                    path.pop();
                    continue;
                };

                frame.next += 1;
                let (current, parent) = (frame.vertex, frame.parent);

                if Some(neighbor) == parent {
                    continue;
                }

                if !visited.contains(neighbor) {
                    visited.insert(neighbor);
                    path.push(neighbor);
                    stack.push(Frame {
                        vertex: neighbor,
                        parent: Some(current),
                        next: 0,
                    });
                    continue;
                }

                // 已访问但不在路径上：该分支已结束，不构成新环
                let Some(start) = path.iter().position(|v| *v == neighbor) else {
                    continue;
                };

                let edge = Edge::normalized(current.clone(), neighbor.clone());
                if selected.contains(&edge) {
                    continue;
                }

                let mut cycle: Vec<V> = path[start..].iter().map(|v| (*v).clone()).collect();
                cycle.push(neighbor.clone());
                return Some((cycle, edge));
            }
        }

        None
    }

    fn into_graph(self) -> Graph<V> {
        Graph::from_parts(self.vertices, self.adjacency)
    }
}
