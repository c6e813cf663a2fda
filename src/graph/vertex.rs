//! 顶点定义
//!
//! 顶点是不透明的标识符，只要求可比较、可哈希、可排序

use std::fmt::Debug;
use std::hash::Hash;

/// 顶点键
///
/// 相等性用于邻接查询，排序只用于规范化无向边 `(min, max)`。
/// 遍历顺序始终由插入顺序决定，与 `Ord` 无关。
pub trait VertexKey: Clone + Eq + Hash + Ord + Debug {}

impl<T> VertexKey for T where T: Clone + Eq + Hash + Ord + Debug {}
