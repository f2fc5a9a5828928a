use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::{ShellError, ShellResult};
use crate::protocol::{ApiRequest, ErrorBody, HttpMethod};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 常量定义
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        insert_header(&mut self.headers, key, value);
        self
    }

    /// 按名称读取请求头（大小写不敏感）
    pub fn header(&self, key: &str) -> Option<&str> {
        find_header(&self.headers, key).map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 空 body 按 JSON `null` 处理
    pub fn json<T: DeserializeOwned>(&self) -> ShellResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        Ok(serde_json::from_str(body)?)
    }

    /// 从失败响应中提取提示信息
    pub fn error_message(&self) -> String {
        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&self.body) {
            return error;
        }
        let body = self.body.trim();
        if body.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            body.to_string()
        }
    }
}

/// HTTP 客户端特性 (Trait)
/// 浏览器环境下的 future 不是 Send 的，因此使用 (?Send)
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ShellResult<HttpResponse>;
}

fn find_header<'a>(
    headers: &'a HashMap<String, String>,
    key: &str,
) -> Option<(&'a String, &'a String)> {
    headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(key))
}

/// 插入请求头，已存在的同名头（大小写不敏感）会被替换
fn insert_header(headers: &mut HashMap<String, String>, key: &str, value: &str) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(key));
    headers.insert(key.to_string(), value.to_string());
}

// =========================================================
// 请求默认值
// =========================================================

/// 应用于所有后续请求的默认值：基础地址和公共请求头
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpDefaults {
    base_url: String,
    headers: HashMap<String, String>,
}

impl HttpDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.to_string();
    }

    pub fn set_header(&mut self, key: &str, value: &str) {
        insert_header(&mut self.headers, key, value);
    }

    pub fn remove_header(&mut self, key: &str) -> Option<String> {
        let name = find_header(&self.headers, key).map(|(k, _)| k.clone())?;
        self.headers.remove(&name)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        find_header(&self.headers, key).map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 将相对路径拼接到基础地址上，绝对地址原样返回
    pub fn resolve_url(&self, path: &str) -> String {
        let is_absolute = path.starts_with("http://") || path.starts_with("https://");
        if is_absolute || self.base_url.is_empty() {
            return path.to_string();
        }
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// 把默认请求头补充到请求上，不覆盖请求自身已设置的同名头
    pub fn apply(&self, req: &mut HttpRequest) {
        for (key, value) in &self.headers {
            if find_header(&req.headers, key).is_none() {
                req.headers.insert(key.clone(), value.clone());
            }
        }
    }
}

// =========================================================
// API 客户端
// =========================================================

/// 带默认值的 API 客户端
///
/// 传输层通过 [`HttpClient`] 注入，浏览器和测试各自提供实现。
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    transport: C,
    defaults: HttpDefaults,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            defaults: HttpDefaults::new(),
        }
    }

    pub fn defaults(&self) -> &HttpDefaults {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut HttpDefaults {
        &mut self.defaults
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// 创建一个指向基础地址下路径的请求
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(&self.defaults.resolve_url(path), method)
    }

    /// 补充默认请求头后发送
    pub async fn send(&self, mut req: HttpRequest) -> ShellResult<HttpResponse> {
        self.defaults.apply(&mut req);
        log::debug!("{} {}", req.method.as_str(), req.url);
        self.transport.send(req).await
    }

    /// 发送类型化的 API 请求
    pub async fn call<R: ApiRequest>(&self, payload: &R) -> ShellResult<R::Response> {
        let mut req = self.request(R::METHOD, R::PATH);
        if R::METHOD != HttpMethod::Get {
            req.body = Some(serde_json::to_string(payload)?);
        }

        let resp = self.send(req).await?;
        if !resp.is_success() {
            return Err(ShellError::Http {
                status: resp.status,
                message: resp.error_message(),
            });
        }

        resp.json::<R::Response>()
    }
}

// =========================================================
// 实现层: reqwest 客户端 (原生宿主)
// =========================================================

#[cfg(feature = "reqwest-client")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(feature = "reqwest-client")]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置的 reqwest 客户端（代理、超时等）
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "reqwest-client")]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ShellResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ShellError::transport(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ShellError::transport(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> (Status, Response Body)
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
    // 模拟网络中断
    offline: std::cell::Cell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            offline: std::cell::Cell::new(false),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ShellResult<HttpResponse> {
        self.requests.borrow_mut().push(req.clone());

        if self.offline.get() {
            return Err(ShellError::transport("connection refused"));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&req.url) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
