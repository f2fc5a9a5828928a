//! 导航流程
//!
//! 把路由解析与守卫串起来：请求 -> 解析 -> 验证(Guard) -> 渲染。
//! 宿主路由只需把结果写入历史记录并挂载对应视图。

use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::guard::{GuardDecision, NavTarget, NavigationGuard, decide};
use crate::route::{MAX_REDIRECT_HOPS, Resolved, RouteDeclaration, RouteTable, normalize_path};
use crate::storage::CredentialStore;

/// 一次导航的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// 渲染 `route`，若守卫或路由表发生过重定向，`redirected_from` 记录原始请求路径
    Render {
        route: &'a RouteDeclaration,
        redirected_from: Option<String>,
    },
    NotFound { path: String },
}

impl<'a> Outcome<'a> {
    /// 最终应写入地址栏的路径
    pub fn path(&self) -> &str {
        match self {
            Outcome::Render { route, .. } => route.path,
            Outcome::NotFound { path } => path.as_str(),
        }
    }

    /// 地址栏应显示的位置
    ///
    /// 未发生重定向时保留调用方请求的原始路径（含查询串与锚点），
    /// 否则使用最终路由的声明路径。
    pub fn location(&self, requested: &str) -> String {
        match self {
            Outcome::Render {
                redirected_from: None,
                ..
            } => requested.to_string(),
            _ => self.path().to_string(),
        }
    }

    pub fn was_redirected(&self) -> bool {
        matches!(
            self,
            Outcome::Render {
                redirected_from: Some(_),
                ..
            }
        )
    }
}

/// 给定凭据状态，计算从 `origin` 到 `target` 的导航结果
pub fn resolve_navigation<'a>(
    table: &RouteTable<'a>,
    target: &str,
    origin: &str,
    credential_present: bool,
) -> ShellResult<Outcome<'a>> {
    let origin_route = table.resolve(origin);
    let origin = origin_route
        .map(NavTarget::from)
        .unwrap_or_else(|| NavTarget::new(origin));

    let mut current = target.to_string();
    for _ in 0..=MAX_REDIRECT_HOPS {
        let route = match table.follow(&current)? {
            Resolved::Route(route) => route,
            // 未声明的路径没有认证要求，守卫总是放行
            Resolved::NotFound { path } => return Ok(Outcome::NotFound { path }),
        };

        match decide(&NavTarget::from(route), &origin, credential_present) {
            GuardDecision::Allow => {
                let redirected_from =
                    (route.path != normalize_path(target)).then(|| target.to_string());
                return Ok(Outcome::Render {
                    route,
                    redirected_from,
                });
            }
            GuardDecision::Redirect(to) => {
                if credential_present {
                    log::info!(
                        "[Router] Already authenticated. Redirecting {} to {}.",
                        route.path,
                        to
                    );
                } else {
                    log::debug!(
                        "[Router] No credential for {}. Redirecting to {}.",
                        route.path,
                        to
                    );
                }
                current = to.to_string();
            }
        }
    }

    Err(ShellError::RedirectLoop {
        path: target.to_string(),
    })
}

/// 绑定路由表与凭据存储的导航器
#[derive(Debug, Clone)]
pub struct Navigator<'a, S> {
    table: RouteTable<'a>,
    guard: NavigationGuard<S>,
}

impl<S: CredentialStore> Navigator<'static, S> {
    /// 使用标准路由表
    pub fn standard(store: S, config: &ShellConfig) -> Self {
        Self::new(RouteTable::standard(), NavigationGuard::new(store, config))
    }
}

impl<'a, S: CredentialStore> Navigator<'a, S> {
    pub fn new(table: RouteTable<'a>, guard: NavigationGuard<S>) -> Self {
        Self { table, guard }
    }

    /// 凭据在每次导航时重新读取
    pub fn navigate(&self, target: &str, origin: &str) -> ShellResult<Outcome<'a>> {
        resolve_navigation(&self.table, target, origin, self.guard.credential_present())
    }
}
