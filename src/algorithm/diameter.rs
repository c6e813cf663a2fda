//! 直径分析
//!
//! 在同一连通分量内的所有顶点对上求最短路径的最大值。
//! 每个顶点对各跑一次 BFS，最坏 O(V²·(V+E))，只适用于小图。

use super::traversal::{Component, PathResult, Traversal};
use crate::graph::{Graph, VertexKey};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// 直径结果
///
/// 没有任何边的图返回空结果：`endpoints` 和 `path` 为 `None`，`distance` 为 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiameterResult<V> {
    /// 距离最远的顶点对
    pub endpoints: Option<(V, V)>,
    /// 最短路径边数
    pub distance: usize,
    /// 达到直径的最短路径
    pub path: Option<PathResult<V>>,
}

impl<V: VertexKey> DiameterResult<V> {
    fn empty() -> Self {
        Self {
            endpoints: None,
            distance: 0,
            path: None,
        }
    }

    fn from_path(start: V, end: V, path: PathResult<V>) -> Self {
        Self {
            endpoints: Some((start, end)),
            distance: path.length,
            path: Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_none()
    }
}

/// 单个起点上的最优候选
struct Candidate<V> {
    start: V,
    end: V,
    path: PathResult<V>,
}

/// 直径分析器
pub struct DiameterAnalysis<V: VertexKey> {
    traversal: Traversal<V>,
}

impl<V: VertexKey> DiameterAnalysis<V> {
    pub fn new(graph: Arc<Graph<V>>) -> Self {
        Self {
            traversal: Traversal::new(graph),
        }
    }

    /// 计算直径
    ///
    /// 分量按发现顺序、顶点对按分量内 `(i, j), i < j` 顺序枚举，
    /// 距离相同时先找到的胜出。跨分量的顶点对直接跳过。
    pub fn diameter(&self) -> DiameterResult<V> {
        let mut best: Option<Candidate<V>> = None;

        for component in self.traversal.components() {
            for i in 0..component.len() {
                if let Some(candidate) = self.best_from(&component, i) {
                    if beats(&candidate, best.as_ref()) {
                        best = Some(candidate);
                    }
                }
            }
        }

        self.finish(best)
    }

    /// 以分量内第 `i` 个顶点为起点，在其后的顶点中找最远的一个
    fn best_from(&self, component: &Component<V>, i: usize) -> Option<Candidate<V>> {
        let start = component.get(i)?;
        let mut best: Option<Candidate<V>> = None;

        for j in (i + 1)..component.len() {
            let Some(end) = component.get(j) else {
                continue;
            };
            let Some(path) = self.traversal.bfs_path(start, end) else {
                continue;
            };
            let candidate = Candidate {
                start: start.clone(),
                end: end.clone(),
                path,
            };
            if beats(&candidate, best.as_ref()) {
                best = Some(candidate);
            }
        }

        best
    }

    fn finish(&self, best: Option<Candidate<V>>) -> DiameterResult<V> {
        match best {
            Some(c) => {
                debug!(start = ?c.start, end = ?c.end, distance = c.path.length, "直径");
                DiameterResult::from_path(c.start, c.end, c.path)
            }
            None => DiameterResult::empty(),
        }
    }
}

impl<V: VertexKey + Send + Sync> DiameterAnalysis<V> {
    /// 并行计算直径
    ///
    /// 每个 (分量, 起点) 一个任务，各自只读共享图；结果按顺序归并，
    /// 因此与 [`DiameterAnalysis::diameter`] 完全一致。
    pub fn diameter_parallel(&self) -> DiameterResult<V> {
        let components = self.traversal.components();
        let sources: Vec<(&Component<V>, usize)> = components
            .iter()
            .flat_map(|c| (0..c.len()).map(move |i| (c, i)))
            .collect();

        let candidates: Vec<Option<Candidate<V>>> = sources
            .par_iter()
            .map(|&(component, i)| self.best_from(component, i))
            .collect();

        let best = candidates
            .into_iter()
            .flatten()
            .fold(None, |best: Option<Candidate<V>>, candidate| {
                if beats(&candidate, best.as_ref()) {
                    Some(candidate)
                } else {
                    best
                }
            });

        self.finish(best)
    }
}

/// 严格更长才替换
fn beats<V>(candidate: &Candidate<V>, current: Option<&Candidate<V>>) -> bool {
    match current {
        Some(current) => candidate.path.length > current.path.length,
        None => true,
    }
}
