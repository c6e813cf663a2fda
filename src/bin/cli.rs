//! CommGraph 命令行工具
//!
//! 读取边列表，运行全部分析并输出报告

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use commgraph::cli::ReportPrinter;
use commgraph::config::AnalyzerConfig;
use commgraph::import::{EdgeListFormat, EdgeListLoader};
use commgraph::Analyzer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "commgraph")]
#[command(about = "CommGraph 通信网络分析工具")]
struct Args {
    /// 边列表文件
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, jsonl（默认按扩展名推断）
    #[arg(short, long)]
    format: Option<String>,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 影响力阈值（覆盖配置文件）
    #[arg(short, long)]
    threshold: Option<usize>,

    /// 并行计算直径
    #[arg(short, long)]
    parallel: bool,

    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_influence_threshold(threshold);
    }
    if args.parallel {
        config = config.with_parallel_diameter(true);
    }

    let format = match &args.format {
        Some(f) => f.parse::<EdgeListFormat>()?,
        None => match EdgeListFormat::from_path(&args.input) {
            Some(f) => f,
            None => bail!("无法根据扩展名推断格式，请使用 --format 指定"),
        },
    };

    let (graph, stats) = EdgeListLoader::new(format)
        .load_path(&args.input)
        .with_context(|| format!("读取边列表失败: {}", args.input.display()))?;

    if stats.duplicate_edges > 0 {
        eprintln!(
            "{}",
            format!("已忽略 {} 条重复边", stats.duplicate_edges).yellow()
        );
    }

    let report = Analyzer::new(graph, config).run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", "--- 图分析结果 ---".bold());
        print!("{}", ReportPrinter::render(&report));
    }

    Ok(())
}
