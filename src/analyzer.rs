//! 分析器
//!
//! 持有不可变图，按需调用各项分析并汇总为报告

use crate::algorithm::{
    Component, CycleReducer, CycleReduction, DegreeAnalysis, DiameterAnalysis, DiameterResult,
    PathResult, Traversal,
};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::graph::{Graph, VertexKey};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// 完整分析报告
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<V: VertexKey> {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// 每个顶点的度
    pub degrees: IndexMap<V, usize>,
    /// 使用的影响力阈值
    pub influence_threshold: usize,
    /// 度严格大于阈值的顶点
    pub influential: Vec<V>,
    /// 孤立顶点
    pub isolated: Vec<V>,
    /// 连通分量
    pub components: Vec<Component<V>>,
    /// 直径
    pub diameter: DiameterResult<V>,
    /// 环消除
    pub cycle_reduction: CycleReduction<V>,
}

/// 图分析器
pub struct Analyzer<V: VertexKey = String> {
    graph: Arc<Graph<V>>,
    config: AnalyzerConfig,
}

impl<V: VertexKey> Analyzer<V> {
    /// 创建分析器，图此后只读
    pub fn new(graph: Graph<V>, config: AnalyzerConfig) -> Self {
        Self {
            graph: Arc::new(graph),
            config,
        }
    }

    /// 从有序边列表创建
    pub fn from_edges<I>(edges: I, config: AnalyzerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        Ok(Self::new(Graph::from_edges(edges)?, config))
    }

    pub fn graph(&self) -> &Graph<V> {
        &self.graph
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn degrees(&self) -> IndexMap<V, usize> {
        DegreeAnalysis::new(self.graph.clone()).degrees()
    }

    /// 使用配置中的阈值
    pub fn influential_vertices(&self) -> Vec<V> {
        self.influential_vertices_with(self.config.influence_threshold)
    }

    pub fn influential_vertices_with(&self, threshold: usize) -> Vec<V> {
        DegreeAnalysis::new(self.graph.clone()).influential_vertices(threshold)
    }

    pub fn isolated_vertices(&self) -> Vec<V> {
        DegreeAnalysis::new(self.graph.clone()).isolated_vertices()
    }

    pub fn components(&self) -> Vec<Component<V>> {
        Traversal::new(self.graph.clone()).components()
    }

    pub fn shortest_path(&self, start: &V, end: &V) -> Result<Option<PathResult<V>>> {
        Traversal::new(self.graph.clone()).shortest_path(start, end)
    }

    pub fn diameter(&self) -> DiameterResult<V> {
        DiameterAnalysis::new(self.graph.clone()).diameter()
    }

    pub fn reduce_cycles(&self) -> CycleReduction<V> {
        CycleReducer::new(self.graph.clone()).reduce()
    }
}

impl<V: VertexKey + Send + Sync> Analyzer<V> {
    pub fn diameter_parallel(&self) -> DiameterResult<V> {
        DiameterAnalysis::new(self.graph.clone()).diameter_parallel()
    }

    /// 运行全部分析
    #[tracing::instrument(skip(self), fields(vertices = self.graph.vertex_count(), edges = self.graph.edge_count()))]
    pub fn run(&self) -> AnalysisReport<V> {
        let diameter = if self.config.parallel_diameter {
            self.diameter_parallel()
        } else {
            self.diameter()
        };

        let report = AnalysisReport {
            vertex_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            degrees: self.degrees(),
            influence_threshold: self.config.influence_threshold,
            influential: self.influential_vertices(),
            isolated: self.isolated_vertices(),
            components: self.components(),
            diameter,
            cycle_reduction: self.reduce_cycles(),
        };

        info!(
            components = report.components.len(),
            influential = report.influential.len(),
            diameter = report.diameter.distance,
            removed_edges = report.cycle_reduction.removed_edges.len(),
            "分析完成"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    const COMMUNICATION_EDGES: [(&str, &str); 16] = [
        ("A", "B"),
        ("A", "C"),
        ("A", "D"),
        ("B", "E"),
        ("C", "E"),
        ("C", "F"),
        ("D", "G"),
        ("E", "G"),
        ("E", "H"),
        ("F", "I"),
        ("H", "I"),
        ("G", "J"),
        ("I", "J"),
        ("J", "K"),
        ("H", "K"),
        ("L", "M"),
    ];

    fn random_graph(rng: &mut StdRng) -> Graph<u32> {
        let n = rng.gen_range(1..14u32);
        let mut graph = Graph::new();
        for v in 0..n {
            graph.add_vertex(v);
        }
        for _ in 0..rng.gen_range(0..(2 * n)) {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u != v {
                graph.add_edge(u, v).unwrap();
            }
        }
        graph
    }

    #[test]
    fn test_communication_network_report() {
        let analyzer =
            Analyzer::from_edges(COMMUNICATION_EDGES.iter().copied(), AnalyzerConfig::default())
                .unwrap();
        let report = analyzer.run();

        assert_eq!(report.vertex_count, 13);
        assert_eq!(report.edge_count, 16);
        assert_eq!(report.degrees[&"E"], 4);
        assert_eq!(report.degrees[&"A"], 3);
        assert_eq!(report.influential, vec!["E"]);
        assert!(report.isolated.is_empty());

        let components: Vec<Vec<&str>> = report
            .components
            .iter()
            .map(|c| c.vertices().copied().collect())
            .collect();
        assert_eq!(
            components,
            vec![
                vec!["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K"],
                vec!["L", "M"],
            ]
        );

        assert_eq!(report.diameter.endpoints, Some(("A", "K")));
        assert_eq!(report.diameter.distance, 4);
        assert_eq!(
            report.diameter.path.as_ref().map(|p| p.vertices.clone()),
            Some(vec!["A", "B", "E", "H", "K"])
        );

        assert_eq!(report.cycle_reduction.removed_edges.len(), 5);
        assert_eq!(report.cycle_reduction.reduced.edge_count(), 11);
    }

    #[test]
    fn test_parallel_config_gives_same_report() {
        let sequential =
            Analyzer::from_edges(COMMUNICATION_EDGES.iter().copied(), AnalyzerConfig::default())
                .unwrap();
        let parallel = Analyzer::from_edges(
            COMMUNICATION_EDGES.iter().copied(),
            AnalyzerConfig::default().with_parallel_diameter(true),
        )
        .unwrap();
        assert_eq!(sequential.run().diameter, parallel.run().diameter);
    }

    #[test]
    fn test_threshold_from_config() {
        let analyzer = Analyzer::from_edges(
            COMMUNICATION_EDGES.iter().copied(),
            AnalyzerConfig::default().with_influence_threshold(2),
        )
        .unwrap();
        assert_eq!(
            analyzer.influential_vertices(),
            vec!["A", "C", "E", "G", "H", "I", "J"]
        );
        assert_eq!(analyzer.influential_vertices_with(3), vec!["E"]);
    }

    #[test]
    fn test_disjoint_pair_scenario() {
        let graph = Graph::from_edges_with_vertices([("L", "M")], ["Z"]).unwrap();
        let analyzer = Analyzer::new(graph, AnalyzerConfig::default());

        assert_eq!(analyzer.components().len(), 2);
        assert_eq!(analyzer.isolated_vertices(), vec!["Z"]);
        assert_eq!(analyzer.shortest_path(&"L", &"Z").unwrap(), None);
        assert!(matches!(
            analyzer.shortest_path(&"Q", &"Z"),
            Err(Error::UnknownVertex(_))
        ));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let graph = Graph::from_edges_with_vertices(
            [("A".to_string(), "B".to_string()), ("B".to_string(), "C".to_string()), ("A".to_string(), "C".to_string())],
            ["Z".to_string()],
        )
        .unwrap();
        let report = Analyzer::new(graph, AnalyzerConfig::default()).run();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["degrees"]["A"], 2);
        assert_eq!(json["isolated"], serde_json::json!(["Z"]));
        assert_eq!(json["components"], serde_json::json!([["A", "B", "C"], ["Z"]]));
        assert_eq!(json["cycle_reduction"]["removed_edges"], serde_json::json!([["A", "C"]]));
        assert_eq!(json["diameter"]["distance"], 1);
    }

    #[test]
    fn test_random_graph_properties() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..40 {
            let analyzer = Analyzer::new(random_graph(&mut rng), AnalyzerConfig::default());
            let graph = analyzer.graph();

            // 度之和等于边数的两倍
            let degree_sum: usize = analyzer.degrees().values().sum();
            assert_eq!(degree_sum, 2 * graph.edge_count());

            // 分量划分顶点集
            let components = analyzer.components();
            let mut seen = HashSet::new();
            for component in &components {
                for v in component.vertices() {
                    assert!(seen.insert(*v), "顶点 {} 出现在多个分量中", v);
                }
            }
            assert_eq!(seen.len(), graph.vertex_count());

            let component_index = |v: &u32| components.iter().position(|c| c.contains(v));
            let vertices: Vec<u32> = graph.vertices().copied().collect();
            let mut max_distance = 0;
            for u in &vertices {
                assert_eq!(
                    analyzer.shortest_path(u, u).unwrap().map(|p| p.vertices),
                    Some(vec![*u])
                );
                for v in &vertices {
                    let path = analyzer.shortest_path(u, v).unwrap();
                    // 无路径当且仅当不在同一分量
                    assert_eq!(path.is_none(), component_index(u) != component_index(v));
                    if let Some(path) = path {
                        assert_eq!(path.start(), Some(u));
                        assert_eq!(path.end(), Some(v));
                        assert!(path.steps().all(|(a, b)| graph.has_edge(a, b)));
                        max_distance = max_distance.max(path.length);
                    }
                }
            }

            // 直径不小于任意同分量顶点对的距离
            let diameter = analyzer.diameter();
            assert_eq!(diameter.distance, max_distance);
            assert_eq!(diameter.is_empty(), graph.edge_count() == 0);
            if let Some(path) = &diameter.path {
                assert_eq!(diameter.distance, path.vertices.len() - 1);
            }
        }
    }
}
