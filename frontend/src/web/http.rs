//! HTTP 传输层
//!
//! 基于 `gloo-net` 的 fetch 封装，实现核心库的 [`HttpClient`]。

use ebid_shell::protocol::HttpMethod;
use ebid_shell::{HttpClient, HttpRequest, HttpResponse, ShellError, ShellResult};
use gloo_net::http::Request;

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ShellResult<HttpResponse> {
        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ShellError::transport(format!("请求构建失败: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ShellError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShellError::transport(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
