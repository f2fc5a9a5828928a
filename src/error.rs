use thiserror::Error;

// =========================================================
// 令牌解码错误
// =========================================================

/// 解析令牌 payload 段时可能出现的错误
///
/// 这些错误只影响展示，不会中断调用方。
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 紧凑格式必须恰好是 header.payload.signature 三段
    #[error("令牌应包含 3 段，实际为 {found} 段")]
    SegmentCount { found: usize },

    #[error("payload 段不是合法的 base64url 编码: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload 段不是合法的 JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload 段不是 JSON 对象")]
    NotAnObject,
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Error)]
pub enum ShellError {
    /// 后端返回了非 2xx 状态码
    #[error("请求失败 ({status}): {message}")]
    Http { status: u16, message: String },

    /// 网络层错误，请求未能得到响应
    #[error("网络错误: {0}")]
    Transport(String),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 凭据存储拒绝写入（隐私模式、配额已满等）
    #[error("无法保存凭据: {key}")]
    Storage { key: String },

    /// 本地校验失败，请求没有发出
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 路由重定向链过长或成环
    #[error("路由重定向成环: {path}")]
    RedirectLoop { path: String },
}

impl ShellError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// 是否为后端拒绝鉴权 (401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

pub type ShellResult<T> = std::result::Result<T, ShellError>;
