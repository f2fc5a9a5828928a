//! 令牌声明解析
//!
//! 只解码 payload 段用于界面展示，不校验签名也不校验过期时间。
//! 解码成功不代表令牌可信，路由守卫也从不读取这里的结果。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::protocol::Role;

/// 解码后的令牌声明
#[derive(Debug, Clone, PartialEq)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// 按名称读取任意声明
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// 后端签发的用户 ID
    pub fn user_id(&self) -> Option<u64> {
        self.get("user_id").and_then(Value::as_u64)
    }

    /// 用户角色，未知角色返回 `None`
    pub fn role(&self) -> Option<Role> {
        self.get("role")
            .and_then(Value::as_str)
            .and_then(|r| r.parse().ok())
    }

    /// 过期时间 (Unix 秒)
    pub fn expires_at(&self) -> Option<u64> {
        // 数值可能被编码成浮点数
        let exp = self.get("exp")?;
        exp.as_u64()
            .or_else(|| exp.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
    }

    /// 仅供展示：以给定时间判断是否已过期，没有 `exp` 时视为未过期
    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now_secs)
    }
}

/// 解码令牌 payload 段
///
/// 格式错误、段数不对、编码无效时返回 [`DecodeError`]，不会 panic。
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount {
            found: segments.len(),
        });
    }

    // 兼容带填充的编码
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;

    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(map) => Ok(Claims(map)),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// 展示用包装：解码失败时记录日志并返回 `None`
pub fn parse_token(token: &str) -> Option<Claims> {
    match decode_claims(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::error!("令牌解析失败: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests;
