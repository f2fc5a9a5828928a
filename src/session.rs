//! 会话引导
//!
//! 进程启动时执行一次，必须早于第一个外发请求：
//! 设置请求基础地址与公共请求头，并把已保存的凭据挂到 `Authorization` 上。
//! 登录/注销后也通过这里保持请求默认值与存储一致。

use crate::config::ShellConfig;
use crate::request::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HttpDefaults};
use crate::storage::{CredentialStore, read_credential};

/// 生成 Bearer 认证头的值
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// 初始化请求默认值
///
/// 没有凭据不是错误，后续请求只是不带认证头。重复调用结果相同。
///
/// # Returns
/// 是否安装了认证头
pub fn initialize<S: CredentialStore + ?Sized>(
    store: &S,
    defaults: &mut HttpDefaults,
    config: &ShellConfig,
) -> bool {
    defaults.set_base_url(&config.api_base_url);
    defaults.set_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

    match read_credential(store, &config.token_key) {
        Some(token) => {
            defaults.set_header(HEADER_AUTHORIZATION, &bearer(&token));
            log::debug!("[Session] credential found, authorization header installed");
            true
        }
        None => {
            defaults.remove_header(HEADER_AUTHORIZATION);
            false
        }
    }
}

/// 保存新凭据并更新认证头
///
/// # Returns
/// 凭据是否成功写入存储；写入失败时认证头仍会更新，但刷新页面后会丢失
pub fn sign_in<S: CredentialStore + ?Sized>(
    store: &S,
    defaults: &mut HttpDefaults,
    config: &ShellConfig,
    token: &str,
) -> bool {
    let persisted = store.set(&config.token_key, token);
    if !persisted {
        log::warn!("[Session] failed to persist credential under '{}'", config.token_key);
    }
    defaults.set_header(HEADER_AUTHORIZATION, &bearer(token));
    persisted
}

/// 清除凭据与认证头
pub fn sign_out<S: CredentialStore + ?Sized>(
    store: &S,
    defaults: &mut HttpDefaults,
    config: &ShellConfig,
) {
    if !store.remove(&config.token_key) {
        log::warn!("[Session] failed to remove credential '{}'", config.token_key);
    }
    defaults.remove_header(HEADER_AUTHORIZATION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_initialize_without_token() {
        let store = MemoryStore::new();
        let mut defaults = HttpDefaults::new();

        let authorized = initialize(&store, &mut defaults, &ShellConfig::default());

        assert!(!authorized);
        assert_eq!(defaults.base_url(), "http://192.168.93.85:3000/api");
        assert_eq!(defaults.header("Content-Type"), Some("application/json"));
        assert_eq!(defaults.header("Authorization"), None);
    }

    #[test]
    fn test_initialize_with_token() {
        let store = MemoryStore::with_entry("token", "abc.def.ghi");
        let mut defaults = HttpDefaults::new();

        assert!(initialize(&store, &mut defaults, &ShellConfig::default()));
        assert_eq!(defaults.header("Authorization"), Some("Bearer abc.def.ghi"));
        assert_eq!(defaults.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_initialize_ignores_empty_token() {
        let store = MemoryStore::with_entry("token", "");
        let mut defaults = HttpDefaults::new();

        assert!(!initialize(&store, &mut defaults, &ShellConfig::default()));
        assert_eq!(defaults.header("Authorization"), None);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = MemoryStore::with_entry("token", "abc.def.ghi");
        let config = ShellConfig::default();
        let mut once = HttpDefaults::new();
        initialize(&store, &mut once, &config);

        let mut twice = HttpDefaults::new();
        initialize(&store, &mut twice, &config);
        initialize(&store, &mut twice, &config);

        assert_eq!(once, twice);
        assert_eq!(twice.headers().count(), 2);
    }

    #[test]
    fn test_initialize_drops_stale_authorization() {
        let store = MemoryStore::with_entry("token", "abc.def.ghi");
        let config = ShellConfig::default();
        let mut defaults = HttpDefaults::new();
        initialize(&store, &mut defaults, &config);

        store.remove("token");
        assert!(!initialize(&store, &mut defaults, &config));
        assert_eq!(defaults.header("Authorization"), None);
    }

    #[test]
    fn test_initialize_uses_configured_origin() {
        let store = MemoryStore::new();
        let config = ShellConfig::default().with_api_base_url("https://ebid.example/api");
        let mut defaults = HttpDefaults::new();
        initialize(&store, &mut defaults, &config);
        assert_eq!(defaults.resolve_url("/login"), "https://ebid.example/api/login");
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = MemoryStore::new();
        let config = ShellConfig::default();
        let mut defaults = HttpDefaults::new();
        initialize(&store, &mut defaults, &config);

        assert!(sign_in(&store, &mut defaults, &config, "new.token.value"));
        assert_eq!(store.get("token").as_deref(), Some("new.token.value"));
        assert_eq!(defaults.header("Authorization"), Some("Bearer new.token.value"));

        sign_out(&store, &mut defaults, &config);
        assert_eq!(store.get("token"), None);
        assert_eq!(defaults.header("Authorization"), None);
        assert_eq!(defaults.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_resync_after_concurrent_sign_out() {
        let store = MemoryStore::with_entry("token", "abc.def.ghi");
        let config = ShellConfig::default();
        let mut live = HttpDefaults::new();
        initialize(&store, &mut live, &config);

        // 一个仍持有认证头的旧副本
        let stale = live.clone();
        sign_out(&store, &mut live, &config);
        assert_eq!(stale.header("Authorization"), Some("Bearer abc.def.ghi"));

        // 按存储重新同步，而不是写回旧副本
        let mut synced = stale;
        assert!(!initialize(&store, &mut synced, &config));
        assert_eq!(synced, live);
        assert_eq!(synced.header("Authorization"), None);
    }
}
