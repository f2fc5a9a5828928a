//! 会话模块
//!
//! 在应用启动时完成会话引导，并通过 Context 共享 API 客户端。
//! 路由守卫直接读取 LocalStorage，不依赖这里的状态。

use ebid_shell::protocol::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use ebid_shell::storage::read_credential;
use ebid_shell::{ApiClient, Claims, ShellConfig, ShellResult, auth, parse_token, session};
use leptos::prelude::*;

use crate::shell_config;
use crate::web::{FetchClient, LocalStorage};

pub type Api = ApiClient<FetchClient>;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 带默认值的 API 客户端
    pub api: RwSignal<Api>,
    /// 是否持有凭据（用于界面刷新）
    pub signed_in: RwSignal<bool>,
}

impl SessionContext {
    /// 会话引导：设置基础地址与请求头，并加载已保存的凭据
    pub fn bootstrap(config: &ShellConfig) -> Self {
        let mut client = ApiClient::new(FetchClient);
        let authorized = session::initialize(&LocalStorage, client.defaults_mut(), config);
        log::info!(
            "[Session] bootstrap complete, api={}, authorized={}",
            config.api_base_url,
            authorized
        );

        Self {
            api: RwSignal::new(client),
            signed_in: RwSignal::new(authorized),
        }
    }

    /// 解析当前凭据的声明，仅用于展示
    pub fn claims(&self) -> Option<Claims> {
        // 订阅登录状态，使展示随之刷新
        self.signed_in.track();
        let token = read_credential(&LocalStorage, &shell_config().token_key)?;
        parse_token(&token)
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 登录
///
/// 请求在客户端副本上完成，之后按存储重新同步信号中的请求默认值，
/// 期间完成的注销不会被旧副本覆盖。
pub async fn login(
    ctx: SessionContext,
    username: String,
    password: String,
) -> ShellResult<LoginResponse> {
    let config = shell_config();
    let mut client = ctx.api.get_untracked();
    let result = auth::login(
        &mut client,
        &LocalStorage,
        &config,
        LoginRequest { username, password },
    )
    .await;

    let authorized = sync_defaults(ctx, &config);
    ctx.signed_in.set(authorized);
    result
}

pub async fn register(
    ctx: SessionContext,
    request: RegisterRequest,
) -> ShellResult<RegisterResponse> {
    let client = ctx.api.get_untracked();
    auth::register(&client, request).await
}

/// 注销，本地凭据总会被清除
pub async fn logout(ctx: SessionContext) {
    let config = shell_config();
    let mut client = ctx.api.get_untracked();
    if let Err(e) = auth::logout(&mut client, &LocalStorage, &config).await {
        log::warn!("[Session] logout: {}", e);
    }
    let authorized = sync_defaults(ctx, &config);
    ctx.signed_in.set(authorized);
}

/// 让信号中的请求默认值与 LocalStorage 保持一致
fn sync_defaults(ctx: SessionContext, config: &ShellConfig) -> bool {
    let mut authorized = false;
    ctx.api.update(|api| {
        authorized = session::initialize(&LocalStorage, api.defaults_mut(), config);
    });
    authorized
}
