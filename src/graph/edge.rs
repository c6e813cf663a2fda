//! 边定义
//!
//! 无向边：两个不同顶点组成的无序对

use super::vertex::VertexKey;
use crate::error::{Error, Result};
use serde::{Serialize, Serializer};

/// 无向边
///
/// 端点按 `Ord` 规范化存储，因此 `{u, v}` 与 `{v, u}` 是同一条边。
/// 序列化为二元组 `[low, high]`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<V> {
    low: V,
    high: V,
}

impl<V: VertexKey> Edge<V> {
    /// 创建无向边，自环返回 `InvalidEdge`
    pub fn new(u: V, v: V) -> Result<Self> {
        if u == v {
            return Err(Error::InvalidEdge(format!("不允许自环: {:?}", u)));
        }
        Ok(Self::normalized(u, v))
    }

    /// 规范化端点顺序（调用方保证 u != v）
    pub(crate) fn normalized(u: V, v: V) -> Self {
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    /// 端点对 `(min, max)`
    pub fn endpoints(&self) -> (&V, &V) {
        (&self.low, &self.high)
    }

    /// 是否与顶点相连
    pub fn touches(&self, vertex: &V) -> bool {
        &self.low == vertex || &self.high == vertex
    }

    /// 另一端点
    pub fn other(&self, vertex: &V) -> Option<&V> {
        if &self.low == vertex {
            Some(&self.high)
        } else if &self.high == vertex {
            Some(&self.low)
        } else {
            None
        }
    }

    pub fn into_pair(self) -> (V, V) {
        (self.low, self.high)
    }
}

impl<V: Serialize> Serialize for Edge<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.low, &self.high).serialize(serializer)
    }
}
