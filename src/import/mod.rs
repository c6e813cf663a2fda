//! 边列表导入模块
//!
//! 支持从 CSV、JSON Lines 读取边列表

use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// 读取的记录数
    pub records: usize,
    /// 新增的边
    pub edges_imported: usize,
    /// 被忽略的重复边
    pub duplicate_edges: usize,
    /// 显式注册的孤立顶点
    pub isolated_vertices: usize,
    pub duration_ms: u64,
}

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeListFormat {
    /// 表头为 `source,target` 的 CSV
    Csv,
    /// 每行一个 `{"source": .., "target": ..}`
    JsonLines,
}

impl FromStr for EdgeListFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(EdgeListFormat::Csv),
            "jsonl" | "json" | "ndjson" => Ok(EdgeListFormat::JsonLines),
            other => Err(Error::ImportError(format!("不支持的格式: {}", other))),
        }
    }
}

impl EdgeListFormat {
    /// 根据扩展名推断格式
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }
}

/// 单条记录；`target` 为空表示孤立顶点
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: String,
    #[serde(default)]
    target: Option<String>,
}

/// 边列表加载器
pub struct EdgeListLoader {
    format: EdgeListFormat,
}

impl EdgeListLoader {
    pub fn new(format: EdgeListFormat) -> Self {
        Self { format }
    }

    /// 从文件加载
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), format = ?self.format, "读取边列表");
        self.load_reader(file)
    }

    /// 从任意输入流加载
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<(Graph, ImportStats)> {
        let start = std::time::Instant::now();
        let mut graph = Graph::new();
        let mut stats = ImportStats::default();

        match self.format {
            EdgeListFormat::Csv => self.load_csv(reader, &mut graph, &mut stats)?,
            EdgeListFormat::JsonLines => self.load_jsonl(reader, &mut graph, &mut stats)?,
        }

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            duplicates = stats.duplicate_edges,
            "边列表导入完成"
        );

        Ok((graph, stats))
    }

    fn load_csv<R: Read>(&self, reader: R, graph: &mut Graph, stats: &mut ImportStats) -> Result<()> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| Error::ImportError(format!("CSV 表头错误: {}", e)))?
            .clone();

        // csv 会跳过空行，行号取自记录位置
        for (i, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| Error::ImportError(e.to_string()))?;
            let line = record
                .position()
                .and_then(|p| usize::try_from(p.line()).ok())
                .unwrap_or(i + 2);
            let record: EdgeRecord = record
                .deserialize(Some(&headers))
                .map_err(|e| Error::ImportError(format!("第 {} 行: {}", line, e)))?;
            apply_record(graph, stats, record, line)?;
        }

        Ok(())
    }

    fn load_jsonl<R: Read>(&self, reader: R, graph: &mut Graph, stats: &mut ImportStats) -> Result<()> {
        let reader = BufReader::new(reader);

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: EdgeRecord = serde_json::from_str(&line)
                .map_err(|e| Error::ImportError(format!("第 {} 行 JSON 解析错误: {}", line_no, e)))?;
            apply_record(graph, stats, record, line_no)?;
        }

        Ok(())
    }
}

/// 将一条记录写入图
fn apply_record(graph: &mut Graph, stats: &mut ImportStats, record: EdgeRecord, line: usize) -> Result<()> {
    let source = record.source.trim().to_string();
    if source.is_empty() {
        return Err(Error::ImportError(format!("第 {} 行: source 为空", line)));
    }
    stats.records += 1;

    let target = record
        .target
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    match target {
        None => {
            graph.add_vertex(source);
            stats.isolated_vertices += 1;
        }
        Some(target) => {
            let added = graph.add_edge(source, target).map_err(|e| match e {
                Error::InvalidEdge(detail) => {
                    Error::InvalidEdge(format!("第 {} 行: {}", line, detail))
                }
                other => other,
            })?;
            if added {
                stats.edges_imported += 1;
            } else {
                stats.duplicate_edges += 1;
            }
        }
    }

    Ok(())
}
