use serde::Deserialize;

// =========================================================
// 默认配置
// =========================================================

/// 后端 API 的默认访问地址
pub const DEFAULT_API_BASE_URL: &str = "http://192.168.93.85:3000/api";

/// 凭据在 KV 存储中使用的固定键名
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// 前端外壳配置
///
/// 所有字段都有默认值，宿主可以整体反序列化，也可以只覆盖其中一部分。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// 所有相对请求路径的前缀
    pub api_base_url: String,
    /// 凭据存储键
    pub token_key: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl ShellConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }
}
