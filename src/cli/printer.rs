//! 报告打印器
//!
//! 将分析报告渲染为表格文本

use crate::algorithm::{CycleReduction, DiameterResult};
use crate::analyzer::AnalysisReport;
use crate::graph::VertexKey;
use prettytable::{format, row, Table};
use std::fmt::Display;

/// 报告打印器
pub struct ReportPrinter;

impl ReportPrinter {
    /// 渲染完整报告
    pub fn render<V: VertexKey + Display>(report: &AnalysisReport<V>) -> String {
        let mut out = String::new();

        out.push_str(&Self::section("图统计"));
        out.push_str(&Self::print_stats(report.vertex_count, report.edge_count));

        out.push_str(&Self::section("顶点度"));
        out.push_str(&Self::format_degrees(report));

        out.push_str(&Self::section(&format!(
            "1. 高影响力顶点 (度 > {})",
            report.influence_threshold
        )));
        out.push_str(&format!("{}\n", join(&report.influential)));

        out.push_str(&Self::section("2. 环消除"));
        out.push_str(&Self::format_cycles(&report.cycle_reduction));

        out.push_str(&Self::section("3. 最长最短路径（直径）"));
        out.push_str(&Self::format_diameter(&report.diameter));

        out.push_str(&Self::section(&format!(
            "4. 连通分量 (共 {} 个)",
            report.components.len()
        )));
        let mut table = boxed_table();
        table.set_titles(row!["#", "Size", "Vertices"]);
        for (i, component) in report.components.iter().enumerate() {
            let mut vertices: Vec<&V> = component.vertices().collect();
            vertices.sort();
            table.add_row(row![i + 1, component.len(), join(vertices)]);
        }
        out.push_str(&table.to_string());

        out.push_str(&Self::section("5. 孤立顶点 (度 = 0)"));
        out.push_str(&format!("{}\n", join(&report.isolated)));

        out
    }

    /// 打印统计信息
    pub fn print_stats(vertex_count: usize, edge_count: usize) -> String {
        let mut table = boxed_table();
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", vertex_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.to_string()
    }

    fn format_degrees<V: VertexKey + Display>(report: &AnalysisReport<V>) -> String {
        let mut table = boxed_table();
        table.set_titles(row!["Vertex", "Degree"]);
        for (vertex, degree) in &report.degrees {
            table.add_row(row![vertex, degree]);
        }
        table.to_string()
    }

    fn format_cycles<V: VertexKey + Display>(reduction: &CycleReduction<V>) -> String {
        if reduction.was_acyclic() {
            return "图中没有环\n".to_string();
        }

        let mut table = boxed_table();
        table.set_titles(row!["#", "Cycle", "Removed Edge"]);
        for (i, (cycle, edge)) in reduction
            .cycles
            .iter()
            .zip(&reduction.removed_edges)
            .enumerate()
        {
            let (u, v) = edge.endpoints();
            let cycle_text = cycle
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" - ");
            table.add_row(row![i + 1, cycle_text, format!("({}, {})", u, v)]);
        }

        format!(
            "{}剩余边数: {}\n",
            table,
            reduction.reduced.edge_count()
        )
    }

    fn format_diameter<V: VertexKey + Display>(diameter: &DiameterResult<V>) -> String {
        match (&diameter.endpoints, &diameter.path) {
            (Some((start, end)), Some(path)) => format!(
                "最远顶点对: ({}, {})\n距离（边数）: {}\n路径: {}\n",
                start,
                end,
                diameter.distance,
                path.vertices
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ")
            ),
            _ => "图中没有边\n".to_string(),
        }
    }

    fn section(title: &str) -> String {
        format!("\n── {} ──\n", title)
    }
}

fn boxed_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let parts: Vec<String> = items.into_iter().map(|v| v.to_string()).collect();
    if parts.is_empty() {
        "(无)".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::config::AnalyzerConfig;
    use crate::graph::Graph;

    #[test]
    fn test_render_report() {
        let graph = Graph::from_edges_with_vertices(
            [("A", "B"), ("B", "C"), ("A", "C"), ("L", "M")],
            ["Z"],
        )
        .unwrap();
        let report = Analyzer::new(graph, AnalyzerConfig::default()).run();
        let text = ReportPrinter::render(&report);

        assert!(text.contains("A - B - C - A"));
        assert!(text.contains("(A, C)"));
        assert!(text.contains("最远顶点对: (A, B)"));
        assert!(text.contains("连通分量 (共 3 个)"));
        assert!(text.contains("度 > 3"));
    }

    #[test]
    fn test_render_edgeless_graph() {
        let graph: Graph<&str> = Graph::from_edges_with_vertices([], ["X"]).unwrap();
        let report = Analyzer::new(graph, AnalyzerConfig::default()).run();
        let text = ReportPrinter::render(&report);

        assert!(text.contains("图中没有边"));
        assert!(text.contains("图中没有环"));
    }

    #[test]
    fn test_print_stats() {
        let text = ReportPrinter::print_stats(13, 16);
        assert!(text.contains("Vertex Count"));
        assert!(text.contains("16"));
    }
}
