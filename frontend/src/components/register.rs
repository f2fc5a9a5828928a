use crate::session::{register, use_session};
use crate::web::router::{Link, use_router};
use ebid_shell::protocol::{RegisterRequest, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

const ROLES: [Role; 4] = [Role::Client, Role::Seller, Role::Sales, Role::Trader];

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Client);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let request = RegisterRequest {
            username: username.get_untracked(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        spawn_local(async move {
            match register(session, request).await {
                Ok(_) => router.navigate("/login"),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="text-3xl font-bold text-center">"注册"</h1>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <input
                        type="text"
                        placeholder="用户名"
                        class="input input-bordered"
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        prop:value=username
                    />
                    <input
                        type="password"
                        placeholder="密码"
                        class="input input-bordered"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                    />
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Ok(r) = event_target_value(&ev).parse::<Role>() {
                                set_role.set(r);
                            }
                        }
                    >
                        {ROLES
                            .iter()
                            .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                            .collect_view()}
                    </select>

                    <button class="btn btn-primary mt-6">"注册"</button>
                    <Link to="/login">"已有账号？去登录"</Link>
                </form>
            </div>
        </div>
    }
}
