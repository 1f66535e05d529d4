//! 请求体校验与规范化
//!
//! 创建要求 `name` 与 `price` 同时存在；更新允许只提交其中之一

use products_errors::AppError;
use serde::Deserialize;
use serde_json::Value;

/// 客户端提交的原始请求体
///
/// 字段保持弱类型，类型检查在 [`NewProduct`] / [`ProductPatch`] 中完成。
/// `null` 视为未提交，其余字段（`id`、时间戳等）一律忽略
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

/// 商品校验错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("name & price required")]
    MissingFields,

    #[error("name or price required")]
    EmptyUpdate,

    #[error("name must be a non-empty string")]
    InvalidName,

    #[error("price must be a number")]
    InvalidPrice,

    #[error("price must be >= 0")]
    NegativePrice,
}

impl From<ProductError> for AppError {
    fn from(error: ProductError) -> Self {
        AppError::validation(error.to_string())
    }
}

/// 通过校验的新商品
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ProductError> {
        Ok(Self {
            name: normalize_name(&name.into())?,
            price: check_price(price)?,
        })
    }

    pub fn from_payload(payload: ProductPayload) -> Result<Self, ProductError> {
        match (payload.name, payload.price) {
            (Some(name), Some(price)) => Ok(Self {
                name: parse_name(&name)?,
                price: parse_price(&price)?,
            }),
            _ => Err(ProductError::MissingFields),
        }
    }
}

/// 通过校验的部分更新，仅包含客户端提交的字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn from_payload(payload: ProductPayload) -> Result<Self, ProductError> {
        if payload.name.is_none() && payload.price.is_none() {
            return Err(ProductError::EmptyUpdate);
        }

        Ok(Self {
            name: payload.name.as_ref().map(parse_name).transpose()?,
            price: payload.price.as_ref().map(parse_price).transpose()?,
        })
    }
}

fn parse_name(value: &Value) -> Result<String, ProductError> {
    match value {
        Value::String(name) => normalize_name(name),
        _ => Err(ProductError::InvalidName),
    }
}

fn normalize_name(name: &str) -> Result<String, ProductError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProductError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// 数字或可解析为数字的字符串（前后空白忽略）
fn parse_price(value: &Value) -> Result<f64, ProductError> {
    let price = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    check_price(price.ok_or(ProductError::InvalidPrice)?)
}

fn check_price(price: f64) -> Result<f64, ProductError> {
    if !price.is_finite() {
        return Err(ProductError::InvalidPrice);
    }
    if price < 0.0 {
        return Err(ProductError::NegativePrice);
    }
    Ok(price)
}
