//! 凭据存储抽象
//!
//! 核心逻辑只通过 [`CredentialStore`] 访问持久化的凭据，
//! 浏览器端由 localStorage 实现，测试和原生宿主使用 [`MemoryStore`]。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 字符串键值存储
///
/// 语义与浏览器 `getItem` / `setItem` / `removeItem` 一致。
pub trait CredentialStore {
    /// 获取存储的字符串值，键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值，返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除键值对，返回操作是否成功
    fn remove(&self, key: &str) -> bool;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

/// 读取有效凭据
///
/// 空字符串与缺失等价。
pub fn read_credential<S: CredentialStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store.get(key).filter(|token| !token.is_empty())
}

/// 内存实现
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以一个已存在的凭据初始化
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("token"), None);

        assert!(store.set("token", "abc.def.ghi"));
        assert_eq!(store.get("token").as_deref(), Some("abc.def.ghi"));

        assert!(store.remove("token"));
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn test_empty_value_is_not_a_credential() {
        let store = MemoryStore::with_entry("token", "");
        assert_eq!(store.get("token").as_deref(), Some(""));
        assert_eq!(read_credential(&store, "token"), None);
    }

    #[test]
    fn test_shared_store_through_rc() {
        let store = Rc::new(MemoryStore::new());
        let other = Rc::clone(&store);
        other.set("token", "t");
        assert_eq!(read_credential(&store, "token").as_deref(), Some("t"));
    }
}
