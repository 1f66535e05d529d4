//! Product 实体

use chrono::{DateTime, Duration, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 商品 ID
///
/// 由存储生成，对上层是不透明字符串。格式是否合法由具体存储判断
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 自增主键形式的 ID：1 到 18 位十进制数字，无前导 0（保证落在 i64 范围内且写法唯一）
pub fn is_serial_id(id: &str) -> bool {
    matches!(id.as_bytes().first(), Some(b'1'..=b'9'))
        && id.len() <= 18
        && id.bytes().all(|b| b.is_ascii_digit())
}

/// 计算新的 `updated_at`，保证严格大于上一次的值
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
