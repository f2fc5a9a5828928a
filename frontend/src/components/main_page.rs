use crate::session::{logout, use_session};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 主页面：展示当前令牌中的声明
///
/// 声明只做展示，未经签名校验。
#[component]
pub fn MainPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let claims = move || session.claims();

    let on_logout = move |_| {
        spawn_local(async move {
            logout(session).await;
            router.refresh();
        });
    };

    view! {
        <div class="container mx-auto p-6">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-bold">"ebid"</h1>
                <button class="btn btn-ghost" on:click=on_logout>"注销"</button>
            </div>
            {move || match claims() {
                Some(c) => view! {
                    <dl class="grid grid-cols-2 gap-2">
                        <dt>"用户 ID"</dt>
                        <dd>{c.user_id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"角色"</dt>
                        <dd>{c.role().map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"过期时间"</dt>
                        <dd>{c.expires_at().map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())}</dd>
                    </dl>
                }
                .into_any(),
                None => view! { <p class="text-error">"无法解析当前令牌"</p> }.into_any(),
            }}
            <nav class="flex gap-4 mt-6">
                <Link to="/table">"订单表"</Link>
                <Link to="/create">"新建订单"</Link>
            </nav>
        </div>
    }
}
