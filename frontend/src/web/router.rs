//! 路由服务模块 - 核心引擎
//!
//! 把纯逻辑的 `Navigator` 包装成信号，并在会话变化时自动跳转。
//! 页面不与浏览器 URL / History 同步。

use leptos::prelude::*;
use modelgen::{Navigator, Page, View};
use modelgen_shared::SessionState;

/// 路由器服务
///
/// 通过注入的会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    navigator: RwSignal<Navigator>,
    session: ReadSignal<SessionState>,
}

impl RouterService {
    fn new(session: ReadSignal<SessionState>) -> Self {
        Self {
            navigator: RwSignal::new(Navigator::new()),
            session,
        }
    }

    pub fn page(&self) -> Page {
        self.navigator.with(|n| n.page())
    }

    /// 当前应渲染的视图（结合会话做守卫）
    pub fn view(&self) -> View {
        let navigator = self.navigator.get();
        self.session.with(|s| navigator.resolve(s))
    }

    pub fn navigate(&self, page: Page) {
        log::info!("[Router] navigate to {}", page);
        self.navigator.update(|n| n.navigate(page));
    }

    /// 会话变化时的自动跳转
    fn setup_session_redirect(&self) {
        let navigator = self.navigator;
        let session = self.session;

        Effect::new(move |_| {
            let state = session.get();
            let mut changed = false;
            navigator.maybe_update(|n| {
                changed = n.on_session(&state);
                changed
            });
            if changed {
                log::info!(
                    "[Router] session changed, now on {}",
                    navigator.get_untracked().page()
                );
            }
        });
    }
}

fn provide_router(session: ReadSignal<SessionState>) -> RouterService {
    let router = RouterService::new(session);
    router.setup_session_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话状态信号
    session: ReadSignal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session);
    children()
}

/// 路由出口组件
///
/// 根据当前视图渲染对应的页面。
#[component]
pub fn RouterOutlet(
    /// 视图匹配函数
    matcher: fn(View) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let view = Memo::new(move |_| router.view());

    move || matcher(view.get())
}
