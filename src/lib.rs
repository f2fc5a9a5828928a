//! ebid 前端外壳核心
//!
//! 与宿主 UI 运行时无关的逻辑，按依赖顺序：
//! - `claims`: 令牌声明解码（仅用于展示）
//! - `route` / `guard` / `router`: 路由表、导航守卫与导航流程
//! - `request` / `session` / `auth`: 请求默认值、会话引导与认证流程
//!
//! 持久化存储与 HTTP 传输都以 trait 形式注入，浏览器端实现在 `frontend` crate 中。

pub mod auth;
pub mod claims;
pub mod config;
pub mod error;
pub mod guard;
pub mod protocol;
pub mod request;
pub mod route;
pub mod router;
pub mod session;
pub mod storage;

pub use claims::{Claims, decode_claims, parse_token};
pub use config::ShellConfig;
pub use error::{DecodeError, ShellError, ShellResult};
pub use guard::{GuardDecision, NavTarget, NavigationGuard, NavigationIntent, decide};
pub use request::{ApiClient, HttpClient, HttpDefaults, HttpRequest, HttpResponse};
pub use route::{RouteDeclaration, RouteTable, RouteTarget, ViewId};
pub use router::{Navigator, Outcome, resolve_navigation};
pub use storage::{CredentialStore, MemoryStore};

#[cfg(feature = "reqwest-client")]
pub use request::ReqwestHttpClient;
