//! 没有交互逻辑的简单页面

use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn SetupPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-4xl font-bold">"ebid"</h1>
                <div class="flex gap-4 justify-center mt-6">
                    <Link to="/login">"登录"</Link>
                    <Link to="/register">"注册"</Link>
                    <Link to="/main">"进入主页"</Link>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn TablePage() -> impl IntoView {
    view! {
        <div class="container mx-auto p-6">
            <h1 class="text-2xl font-bold">"订单"</h1>
            <Link to="/main">"返回"</Link>
        </div>
    }
}

#[component]
pub fn CreatePage() -> impl IntoView {
    view! {
        <div class="container mx-auto p-6">
            <h1 class="text-2xl font-bold">"新建订单"</h1>
            <Link to="/main">"返回"</Link>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"页面未找到"</p>
            </div>
        </div>
    }
}
