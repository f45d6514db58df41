//! 认证模块
//!
//! 整个应用只创建一个 `SessionStore`，并只订阅一次 BaaS 的认证事件流。
//! 组件通过 `SessionContext` 读取同一份会话快照。

use crate::api::BaasClient;
use crate::components::toast::ToastContext;
use crate::config::{AppConfig, SESSION_REFRESH_MS};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use modelgen::{AuthClient, SessionStore, Subscription, observe_session};
use modelgen_shared::{SessionState, User};

/// 会话上下文
///
/// 包含只读会话信号和 BaaS 客户端，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    client: StoredValue<BaasClient, LocalStorage>,
    // 与根组件同生命周期，drop 时取消订阅 / 停止定时复查
    _subscription: StoredValue<Subscription, LocalStorage>,
    _refresh: StoredValue<Interval, LocalStorage>,
}

impl SessionContext {
    pub fn client(&self) -> BaasClient {
        self.client.get_value()
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 初始化会话：创建存储、启动观察者与定时复查，并提供到 Context
pub fn provide_session(config: &AppConfig) -> SessionContext {
    let client = BaasClient::new(&config.baas_url, &config.project_id);
    let (state, set_state) = signal(SessionState::default());

    let store = SessionStore::new();
    let subscription = store.subscribe(move |s| set_state.set(s.clone()));
    spawn_local(observe_session(store, client.auth_events()));

    let refresh = {
        let client = client.clone();
        Interval::new(SESSION_REFRESH_MS, move || {
            let client = client.clone();
            spawn_local(async move { client.refresh_session().await });
        })
    };

    let ctx = SessionContext {
        state,
        client: StoredValue::new_local(client),
        _subscription: StoredValue::new_local(subscription),
        _refresh: StoredValue::new_local(refresh),
    };
    provide_context(ctx);
    ctx
}

/// 跳转到托管登录页
pub fn sign_in(ctx: SessionContext, toast: ToastContext) {
    let client = ctx.client();
    spawn_local(async move {
        if let Err(e) = client.login().await {
            log::error!("[Auth] sign-in redirect failed: {}", e);
            toast.error("Sign in failed", e.message().to_string());
        }
    });
}

/// 注销
///
/// 导航由路由服务监听会话变化后自动处理。
pub fn sign_out(ctx: SessionContext, toast: ToastContext) {
    let client = ctx.client();
    spawn_local(async move {
        if let Err(e) = client.logout().await {
            log::error!("[Auth] sign-out failed: {}", e);
            toast.error("Sign out failed", e.message().to_string());
        }
    });
}
