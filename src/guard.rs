//! 导航守卫
//!
//! 每次视图切换前执行，决定放行还是重定向。
//! 判定只依赖目标路由的认证要求、凭据是否存在以及目标路径，
//! 不读取令牌内容，也不修改任何状态。

use crate::config::ShellConfig;
use crate::route::RouteDeclaration;
use crate::storage::{CredentialStore, read_credential};

/// 未认证时的统一入口
pub const UNAUTHENTICATED_ENTRY: &str = "/setup";

/// 仅在未登录时可访问的页面
pub const LOGGED_OUT_ONLY: [&str; 2] = ["/login", "/register"];

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// 导航的一端（目标或来源）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTarget<'a> {
    pub path: &'a str,
    pub requires_auth: bool,
}

impl<'a> NavTarget<'a> {
    /// 未声明认证要求的路径
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            requires_auth: false,
        }
    }

    pub fn protected(path: &'a str) -> Self {
        Self {
            path,
            requires_auth: true,
        }
    }
}

impl<'a> From<&'a RouteDeclaration> for NavTarget<'a> {
    fn from(route: &'a RouteDeclaration) -> Self {
        Self {
            path: route.path,
            requires_auth: route.requires_auth,
        }
    }
}

/// **核心守卫逻辑**
///
/// 按顺序匹配，先命中者生效：
/// 1. 目标需要认证但没有凭据 -> 重定向到 `/setup`
/// 2. 已有凭据却访问登录/注册页 -> 重定向到 `/setup`
/// 3. 其余情况放行
///
/// `origin` 不参与判定，保留在签名中以匹配宿主路由的回调形态。
pub fn decide(
    target: &NavTarget<'_>,
    _origin: &NavTarget<'_>,
    credential_present: bool,
) -> GuardDecision {
    if target.requires_auth && !credential_present {
        GuardDecision::Redirect(UNAUTHENTICATED_ENTRY)
    } else if credential_present && LOGGED_OUT_ONLY.contains(&target.path) {
        GuardDecision::Redirect(UNAUTHENTICATED_ENTRY)
    } else {
        GuardDecision::Allow
    }
}

/// 一次导航的完整意图，只在守卫判定期间存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target_path: String,
    pub origin_path: String,
    pub target_requires_auth: bool,
}

impl NavigationIntent {
    pub fn decide(&self, credential_present: bool) -> GuardDecision {
        let target = NavTarget {
            path: &self.target_path,
            requires_auth: self.target_requires_auth,
        };
        decide(&target, &NavTarget::new(&self.origin_path), credential_present)
    }
}

/// 绑定凭据存储的守卫
///
/// 每次判定都重新读取存储，登录/注销后无需通知守卫。
#[derive(Debug, Clone)]
pub struct NavigationGuard<S> {
    store: S,
    token_key: String,
}

impl<S: CredentialStore> NavigationGuard<S> {
    pub fn new(store: S, config: &ShellConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
        }
    }

    pub fn credential_present(&self) -> bool {
        read_credential(&self.store, &self.token_key).is_some()
    }

    pub fn check(&self, target: &NavTarget<'_>, origin: &NavTarget<'_>) -> GuardDecision {
        decide(target, origin, self.credential_present())
    }

    pub fn check_intent(&self, intent: &NavigationIntent) -> GuardDecision {
        intent.decide(self.credential_present())
    }
}

#[cfg(test)]
mod tests;
