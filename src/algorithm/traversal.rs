//! 广度优先遍历
//!
//! 连通分量划分与最短路径查找

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexKey};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult<V> {
    /// 路径上的顶点序列（含起点和终点）
    pub vertices: Vec<V>,
    /// 路径长度（边数）
    pub length: usize,
}

impl<V: VertexKey> PathResult<V> {
    fn with_start(start: V) -> Self {
        Self {
            vertices: vec![start],
            length: 0,
        }
    }

    fn from_vertices(vertices: Vec<V>) -> Self {
        let length = vertices.len().saturating_sub(1);
        Self { vertices, length }
    }

    /// 起点
    pub fn start(&self) -> Option<&V> {
        self.vertices.first()
    }

    /// 终点
    pub fn end(&self) -> Option<&V> {
        self.vertices.last()
    }

    /// 路径上相邻顶点组成的边
    pub fn steps(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.vertices.windows(2).map(|w| (&w[0], &w[1]))
    }
}

/// 连通分量
///
/// 顶点按 BFS 出队顺序排列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Component<V: VertexKey> {
    vertices: IndexSet<V>,
}

impl<V: VertexKey> Component<V> {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// 分量内顶点（BFS 顺序）
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    /// 按索引取顶点
    pub fn get(&self, index: usize) -> Option<&V> {
        self.vertices.get_index(index)
    }
}

/// 遍历器
pub struct Traversal<V: VertexKey> {
    graph: Arc<Graph<V>>,
}

impl<V: VertexKey> Traversal<V> {
    /// 创建遍历器
    pub fn new(graph: Arc<Graph<V>>) -> Self {
        Self { graph }
    }

    /// 划分连通分量
    ///
    /// 按顶点插入顺序扫描，每个未访问顶点启动一次 BFS，
    /// 每次 BFS 产出一个分量。复杂度 O(V+E)。
    pub fn components(&self) -> Vec<Component<V>> {
        let mut visited: HashSet<&V> = HashSet::new();
        let mut components = Vec::new();

        for start in self.graph.vertices() {
            if !visited.insert(start) {
                continue;
            }

            let mut component = IndexSet::new();
            let mut queue = VecDeque::new();
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                component.insert(current.clone());
                for neighbor in self.graph.neighbors(current) {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }

            components.push(Component {
                vertices: component,
            });
        }

        components
    }

    /// 顶点所在的连通分量
    pub fn component_of(&self, vertex: &V) -> Result<Component<V>> {
        if !self.graph.contains_vertex(vertex) {
            return Err(Error::unknown_vertex(vertex));
        }

        let mut visited: HashSet<&V> = HashSet::new();
        let mut component = IndexSet::new();
        let mut queue = VecDeque::new();
        visited.insert(vertex);
        queue.push_back(vertex);

        while let Some(current) = queue.pop_front() {
            component.insert(current.clone());
            for neighbor in self.graph.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        Ok(Component {
            vertices: component,
        })
    }

    /// BFS 最短路径查找
    ///
    /// 多条最短路径时，返回按邻接表插入顺序最先发现的那条。
    /// 不连通（包括终点未知）返回 `Ok(None)`；只有起点未知才报错。
    pub fn shortest_path(&self, start: &V, end: &V) -> Result<Option<PathResult<V>>> {
        if !self.graph.contains_vertex(start) {
            return Err(Error::unknown_vertex(start));
        }
        Ok(self.bfs_path(start, end))
    }

    /// 在已知起点上执行 BFS
    pub(crate) fn bfs_path(&self, start: &V, end: &V) -> Option<PathResult<V>> {
        if start == end {
            return Some(PathResult::with_start(start.clone()));
        }

        let mut visited: HashSet<&V> = HashSet::new();
        let mut queue = VecDeque::new();
        let mut parent: HashMap<&V, &V> = HashMap::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.graph.neighbors(current) {
                if visited.insert(neighbor) {
                    parent.insert(neighbor, current);
                    queue.push_back(neighbor);

                    if neighbor == end {
                        // 重构路径
                        return Some(Self::reconstruct_path(start, neighbor, &parent));
                    }
                }
            }
        }

        None
    }

    /// 重构路径
    fn reconstruct_path<'a>(start: &V, end: &'a V, parent: &HashMap<&'a V, &'a V>) -> PathResult<V> {
        let mut vertices = vec![end.clone()];
        let mut current = end;

        while current != start {
            match parent.get(current) {
                Some(&prev) => {
                    vertices.push(prev.clone());
                    current = prev;
                }
                None => break,
            }
        }

        vertices.reverse();
        PathResult::from_vertices(vertices)
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: &V, end: &V) -> Result<bool> {
        Ok(self.shortest_path(start, end)?.is_some())
    }
}
