//! 认证流程
//!
//! 登录、注册与注销的请求封装。登录成功后保存凭据，注销时无论后端结果如何都清除本地凭据，
//! 使导航守卫和请求默认值始终与存储一致。

use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::protocol::{
    LoginRequest, LoginResponse, LogoutRequest, RegisterRequest, RegisterResponse,
};
use crate::request::{ApiClient, HttpClient};
use crate::session;
use crate::storage::{CredentialStore, read_credential};

/// 登录并保存凭据
///
/// 凭据写入存储失败时回滚认证头并返回 [`ShellError::Storage`]，
/// 避免请求已带认证头而守卫仍视为未登录。
pub async fn login<C, S>(
    client: &mut ApiClient<C>,
    store: &S,
    config: &ShellConfig,
    request: LoginRequest,
) -> ShellResult<LoginResponse>
where
    C: HttpClient,
    S: CredentialStore + ?Sized,
{
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ShellError::invalid_input("用户名和密码不能为空"));
    }

    let response = client.call(&request).await?;
    if response.token.is_empty() {
        return Err(ShellError::invalid_input("后端返回了空令牌"));
    }

    if !session::sign_in(store, client.defaults_mut(), config, &response.token) {
        session::sign_out(store, client.defaults_mut(), config);
        return Err(ShellError::Storage {
            key: config.token_key.clone(),
        });
    }
    log::info!("[Auth] signed in as {} ({})", request.username, response.role);
    Ok(response)
}

/// 注册新用户，不会自动登录
pub async fn register<C: HttpClient>(
    client: &ApiClient<C>,
    request: RegisterRequest,
) -> ShellResult<RegisterResponse> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ShellError::invalid_input("用户名和密码不能为空"));
    }
    client.call(&request).await
}

/// 注销
///
/// 有凭据时通知后端吊销令牌；本地凭据总会被清除，后端错误会原样返回。
pub async fn logout<C, S>(
    client: &mut ApiClient<C>,
    store: &S,
    config: &ShellConfig,
) -> ShellResult<()>
where
    C: HttpClient,
    S: CredentialStore + ?Sized,
{
    let remote = if read_credential(store, &config.token_key).is_some() {
        client.call(&LogoutRequest::default()).await.map(|_| ())
    } else {
        Ok(())
    };

    session::sign_out(store, client.defaults_mut(), config);

    if let Err(e) = &remote {
        log::warn!("[Auth] server-side logout failed: {}", e);
    }
    remote
}
