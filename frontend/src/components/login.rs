use crate::session::{login, use_session};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if username.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请填写用户名和密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match login(session, username.get_untracked(), password.get_untracked()).await {
                Ok(_) => router.navigate("/main"),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="text-3xl font-bold text-center">"登录"</h1>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <label class="label" for="username">"用户名"</label>
                    <input
                        id="username"
                        type="text"
                        class="input input-bordered"
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        prop:value=username
                        required
                    />
                    <label class="label" for="password">"密码"</label>
                    <input
                        id="password"
                        type="password"
                        class="input input-bordered"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />

                    <button class="btn btn-primary mt-6" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "登录中..." } else { "登录" }}
                    </button>
                    <Link to="/register">"没有账号？去注册"</Link>
                </form>
            </div>
        </div>
    }
}
