//! 路由定义模块 - 领域模型
//!
//! 纯粹的路由声明与解析，不依赖 DOM。
//! 路由表是静态有序列表，按声明顺序匹配，先声明者生效。

use std::fmt::{self, Display};

use crate::error::{ShellError, ShellResult};

/// 重定向链的最大跳数
pub const MAX_REDIRECT_HOPS: usize = 8;

/// 视图标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Setup,
    Main,
    Login,
    Register,
    Table,
    Create,
}

/// 路由指向：渲染视图或重定向到另一路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View(ViewId),
    Redirect(&'static str),
}

/// 路由声明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDeclaration {
    pub path: &'static str,
    pub name: Option<&'static str>,
    /// 未显式声明时为 false
    pub requires_auth: bool,
    pub target: RouteTarget,
}

impl RouteDeclaration {
    pub const fn view(path: &'static str, name: &'static str, view: ViewId) -> Self {
        Self {
            path,
            name: Some(name),
            requires_auth: false,
            target: RouteTarget::View(view),
        }
    }

    pub const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            requires_auth: false,
            target: RouteTarget::Redirect(to),
        }
    }

    /// 标记为需要认证
    pub const fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn view_id(&self) -> Option<ViewId> {
        match self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

/// 应用路由表
///
/// 注意 `/` 被声明了两次：先是重定向到 `/setup`，后是表格视图。
/// 按先声明者生效，第二条永远不会被匹配，启动时会给出警告。
pub static ROUTES: [RouteDeclaration; 8] = [
    RouteDeclaration::redirect("/", "/setup"),
    RouteDeclaration::view("/setup", "Setup", ViewId::Setup),
    RouteDeclaration::view("/main", "MainPage", ViewId::Main).authenticated(),
    RouteDeclaration::view("/login", "Login", ViewId::Login),
    RouteDeclaration::view("/register", "Register", ViewId::Register),
    RouteDeclaration::view("/table", "Table", ViewId::Table).authenticated(),
    RouteDeclaration::view("/", "Table", ViewId::Table),
    RouteDeclaration::view("/create", "Create", ViewId::Create),
];

/// 被前面同路径声明遮蔽的路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowedRoute<'a> {
    pub index: usize,
    pub shadowed_by: usize,
    pub route: &'a RouteDeclaration,
}

/// 跟随重定向后的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    Route(&'a RouteDeclaration),
    NotFound { path: String },
}

#[derive(Debug, Clone, Copy)]
pub struct RouteTable<'a> {
    routes: &'a [RouteDeclaration],
}

impl RouteTable<'static> {
    pub fn standard() -> Self {
        Self { routes: &ROUTES }
    }
}

impl<'a> RouteTable<'a> {
    pub fn new(routes: &'a [RouteDeclaration]) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &'a [RouteDeclaration] {
        self.routes
    }

    /// 按声明顺序查找第一条匹配的路由，忽略查询串、锚点和末尾斜杠
    pub fn resolve(&self, path: &str) -> Option<&'a RouteDeclaration> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&'a RouteDeclaration> {
        self.routes.iter().find(|r| r.name == Some(name))
    }

    /// 解析路径并跟随重定向
    pub fn follow(&self, path: &str) -> ShellResult<Resolved<'a>> {
        let mut current = path.to_string();
        for _ in 0..=MAX_REDIRECT_HOPS {
            match self.resolve(&current) {
                None => return Ok(Resolved::NotFound { path: current }),
                Some(route) => match route.target {
                    RouteTarget::View(_) => return Ok(Resolved::Route(route)),
                    RouteTarget::Redirect(to) => current = to.to_string(),
                },
            }
        }
        Err(ShellError::RedirectLoop {
            path: path.to_string(),
        })
    }

    /// 唯一性检查：列出被遮蔽的声明
    pub fn shadowed(&self) -> Vec<ShadowedRoute<'a>> {
        self.routes
            .iter()
            .enumerate()
            .filter_map(|(index, route)| {
                let first = self.routes.iter().position(|r| r.path == route.path)?;
                (first < index).then_some(ShadowedRoute {
                    index,
                    shadowed_by: first,
                    route,
                })
            })
            .collect()
    }

    /// 启动时调用，记录被遮蔽的路由并返回数量
    pub fn warn_shadowed(&self) -> usize {
        let shadowed = self.shadowed();
        for s in &shadowed {
            log::warn!(
                "[Router] route #{} [{}] is shadowed by route #{} with the same path and will never match",
                s.index,
                s.route,
                s.shadowed_by
            );
        }
        shadowed.len()
    }
}

/// 规范化路径：去掉查询串、锚点以及末尾斜杠（根路径除外）
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

impl Display for RouteDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name, self.target) {
            (_, RouteTarget::Redirect(to)) => write!(f, "{} -> {}", self.path, to),
            (Some(name), RouteTarget::View(_)) => write!(f, "{} ({})", self.path, name),
            (None, RouteTarget::View(_)) => write!(f, "{}", self.path),
        }
    }
}
