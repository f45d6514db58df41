//! AI Model Generator 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `config`: 后端地址与生成参数
//! - `auth`: 会话状态管理（唯一的 `SessionStore`）
//! - `web::router`: 页面路由与会话守卫
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod generator;
    pub mod header;
    pub mod history;
    mod icons;
    pub mod landing;
    pub mod toast;
}
mod config;

use crate::auth::provide_session;
use crate::components::dashboard::DashboardPage;
use crate::components::generator::GeneratorPage;
use crate::components::header::Header;
use crate::components::history::HistoryPage;
use crate::components::landing::LandingPage;
use crate::components::toast::{ToastHost, provide_toasts};
use crate::config::AppConfig;

use leptos::prelude::*;
use modelgen::View;

// 浏览器 API 封装
pub(crate) mod web {
    pub mod file;
    pub mod router;
    mod storage;

    pub use storage::BrowserStorage;
}

use web::router::{Router, RouterOutlet};

/// 视图匹配函数
fn view_matcher(view: View) -> AnyView {
    match view {
        View::Loading => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        View::Landing => view! { <LandingPage /> }.into_any(),
        View::Dashboard => view! { <DashboardPage /> }.into_any(),
        View::Generator => view! { <GeneratorPage /> }.into_any(),
        View::History => view! { <HistoryPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 加载配置（LocalStorage 覆盖 > 编译期变量 > 默认值）
    let config = AppConfig::load();
    provide_context(config.clone());

    // 2. 提示消息与会话
    provide_toasts();
    let session = provide_session(&config);

    view! {
        // 3. 路由器组件：注入会话信号实现守卫
        <Router session=session.state>
            <div class="min-h-screen bg-base-200 font-sans">
                <Header />
                <main>
                    <RouterOutlet matcher=view_matcher />
                </main>
            </div>
        </Router>
        <ToastHost />
    }
}
