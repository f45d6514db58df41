use crate::auth::{sign_in, sign_out, use_session};
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::web::router::use_router;
use leptos::prelude::*;
use modelgen::Page;

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let toast = use_toast();

    let nav_items = move || {
        Page::NAV
            .into_iter()
            .map(|page| {
                let class = move || {
                    if router.page() == page {
                        "btn btn-sm btn-primary"
                    } else {
                        "btn btn-sm btn-ghost"
                    }
                };
                view! {
                    <button class=class on:click=move |_| router.navigate(page)>
                        {page.label()}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-40 px-4">
            <div class="flex-1 gap-2">
                <button
                    class="btn btn-ghost text-xl gap-2"
                    on:click=move |_| router.navigate(Page::Landing)
                >
                    <Sparkles attr:class="h-6 w-6 text-primary" />
                    "AI Model Generator"
                </button>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || session.state.with(|s| s.loading)
                    fallback=move || {
                        view! {
                            <Show
                                when=move || session.user().is_some()
                                fallback=move || {
                                    view! {
                                        <button
                                            class="btn btn-primary btn-sm"
                                            on:click=move |_| sign_in(session, toast)
                                        >
                                            "Sign In"
                                        </button>
                                    }
                                }
                            >
                                <nav class="hidden md:flex gap-1">{nav_items}</nav>
                                <div class="dropdown dropdown-end">
                                    <div tabindex="0" role="button" class="btn btn-ghost btn-circle avatar placeholder">
                                        <div class="bg-primary text-primary-content rounded-full w-9">
                                            <UserIcon attr:class="h-5 w-5" />
                                        </div>
                                    </div>
                                    <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-60">
                                        {move || {
                                            session
                                                .user()
                                                .map(|user| {
                                                    view! {
                                                        <li class="menu-title">
                                                            <span class="font-semibold">{user.greeting_name().to_string()}</span>
                                                            <span class="text-xs opacity-60">{user.email.clone()}</span>
                                                        </li>
                                                    }
                                                })
                                        }}
                                        <li class="md:hidden">
                                            <a on:click=move |_| router.navigate(Page::Dashboard)>"Dashboard"</a>
                                        </li>
                                        <li class="md:hidden">
                                            <a on:click=move |_| router.navigate(Page::Generator)>"Generate"</a>
                                        </li>
                                        <li class="md:hidden">
                                            <a on:click=move |_| router.navigate(Page::History)>"History"</a>
                                        </li>
                                        <li>
                                            <a class="text-error" on:click=move |_| sign_out(session, toast)>
                                                <LogOut attr:class="h-4 w-4" />
                                                "Sign Out"
                                            </a>
                                        </li>
                                    </ul>
                                </div>
                            </Show>
                        }
                    }
                >
                    <span class="loading loading-spinner loading-sm"></span>
                </Show>
            </div>
        </div>
    }
}
