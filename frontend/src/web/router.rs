//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 路由解析与守卫判定交给 `ebid_shell::Navigator`，这里只负责
//! "监听 -> 判定 -> 写入历史 -> 加载" 的浏览器部分。

use ebid_shell::guard::UNAUTHENTICATED_ENTRY;
use ebid_shell::{Navigator, Outcome, ViewId};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::storage::LocalStorage;
use crate::shell_config;

/// 当前渲染的视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub path: String,
    /// `None` 表示路径未声明
    pub view: Option<ViewId>,
}

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 执行一次导航判定，凭据在每次调用时从 LocalStorage 重新读取
fn resolve(target: &str, origin: &str) -> CurrentView {
    let navigator = Navigator::standard(LocalStorage, &shell_config());
    match navigator.navigate(target, origin) {
        Ok(outcome) => {
            let path = outcome.location(target);
            match outcome {
                Outcome::Render { route, .. } => CurrentView {
                    path,
                    view: route.view_id(),
                },
                Outcome::NotFound { .. } => CurrentView { path, view: None },
            }
        }
        Err(e) => {
            log::error!("[Router] {}", e);
            CurrentView {
                path: UNAUTHENTICATED_ENTRY.to_string(),
                view: Some(ViewId::Setup),
            }
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前视图（只读信号）
    current: ReadSignal<CurrentView>,
    /// 设置当前视图（写入信号）
    set_current: WriteSignal<CurrentView>,
}

impl RouterService {
    /// 创建路由服务，初始路径同样经过守卫
    fn new() -> Self {
        let path = current_path();
        let initial = resolve(&path, "/");
        if initial.path != path {
            replace_history_state(&initial.path);
        }
        let (current, set_current) = signal(initial);

        Self {
            current,
            set_current,
        }
    }

    /// 获取当前视图信号
    pub fn current(&self) -> ReadSignal<CurrentView> {
        self.current
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let origin = self.current.get_untracked().path;
        let next = resolve(path, &origin);
        push_history_state(&next.path);
        self.set_current.set(next);
    }

    /// 凭据变化（登录/注销）后重新评估当前页面
    pub fn refresh(&self) {
        let current = self.current.get_untracked().path;
        let next = resolve(&current, &current);
        if next.path != current {
            replace_history_state(&next.path);
        }
        self.set_current.set(next);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let current = self.current;
        let set_current = self.set_current;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let origin = current.get_untracked().path;

            // popstate 时也执行守卫逻辑
            let next = resolve(&path, &origin);
            if next.path != path {
                replace_history_state(&next.path);
            }
            set_current.set(next);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router();

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前视图，返回对应组件
    matcher: fn(Option<ViewId>) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current().get();
        matcher(current.view)
    }
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to on:click=on_click>
            {children()}
        </a>
    }
}
