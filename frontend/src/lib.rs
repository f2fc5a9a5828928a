//! ebid 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `session`: 会话引导与认证状态
//! - `web::router`: 路由服务（守卫判定由 `ebid_shell` 完成）
//! - `components`: UI 组件层

mod components {
    pub mod login;
    pub mod main_page;
    pub mod pages;
    pub mod register;
}
mod session;

use crate::components::login::LoginPage;
use crate::components::main_page::MainPage;
use crate::components::pages::{CreatePage, NotFoundPage, SetupPage, TablePage};
use crate::components::register::RegisterPage;
use crate::session::SessionContext;

use ebid_shell::{RouteTable, ShellConfig, ViewId};
use leptos::prelude::*;

// 浏览器 API 封装
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// 运行时配置，构建时可通过 `EBID_API_BASE_URL` 覆盖后端地址
pub(crate) fn shell_config() -> ShellConfig {
    let config = ShellConfig::default();
    match option_env!("EBID_API_BASE_URL") {
        Some(url) => config.with_api_base_url(url),
        None => config,
    }
}

/// 路由匹配函数
///
/// 根据视图标识返回对应的视图组件。
fn route_matcher(view: Option<ViewId>) -> AnyView {
    match view {
        Some(ViewId::Setup) => view! { <SetupPage /> }.into_any(),
        Some(ViewId::Main) => view! { <MainPage /> }.into_any(),
        Some(ViewId::Login) => view! { <LoginPage /> }.into_any(),
        Some(ViewId::Register) => view! { <RegisterPage /> }.into_any(),
        Some(ViewId::Table) => view! { <TablePage /> }.into_any(),
        Some(ViewId::Create) => view! { <CreatePage /> }.into_any(),
        None => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话引导：早于任何请求与导航
    let session = SessionContext::bootstrap(&shell_config());
    provide_context(session);

    // 2. 路由表唯一性检查，被遮蔽的声明只告警
    RouteTable::standard().warn_shadowed();

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
