//! 命令行输出

pub mod printer;

pub use printer::ReportPrinter;
