use crate::auth::use_session;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::config::use_config;
use crate::web::file::{local_offset, now};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use modelgen::{Dashboard, GenerationRepository, Page, load_dashboard};
use modelgen_shared::GenerationRecord;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let toast = use_toast();
    let collection = use_config().generation.collection;

    // None 表示仍在加载
    let (dashboard, set_dashboard) = signal(Option::<Dashboard>::None);

    Effect::new(move |_| {
        let Some(user) = session.user() else {
            return;
        };
        let client = session.client();
        let collection = collection.clone();
        spawn_local(async move {
            let repo = GenerationRepository::with_collection(&client, &collection);
            match load_dashboard(&repo, &user.id, now(), local_offset()).await {
                Ok(data) => {
                    set_dashboard.try_set(Some(data));
                }
                Err(e) => {
                    log::error!("[Dashboard] load failed: {}", e);
                    toast.error("Failed to load dashboard", e.message().to_string());
                    set_dashboard.try_set(Some(Dashboard::default()));
                }
            }
        });
    });

    let greeting = move || {
        session
            .user()
            .map(|u| u.greeting_name().to_string())
            .unwrap_or_default()
    };
    let stat = move |pick: fn(&Dashboard) -> usize| {
        move || dashboard.with(|d| d.as_ref().map(pick).unwrap_or(0))
    };

    view! {
        <div class="container mx-auto px-4 py-8 space-y-8">
            <div>
                <h1 class="text-3xl font-bold mb-2">"Welcome back, " {greeting} "!"</h1>
                <p class="text-base-content/70">"Ready to create some amazing AI-generated models?"</p>
            </div>

            // 快捷操作
            <div class="grid md:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow-xl border border-primary/20">
                    <div class="card-body">
                        <h3 class="card-title">
                            <Sparkles attr:class="h-5 w-5 text-primary" />
                            "Create New Model"
                        </h3>
                        <p class="text-base-content/70 text-sm">"Start the wizard to generate your next AI model"</p>
                        <button class="btn btn-primary w-full gap-2" on:click=move |_| router.navigate(Page::Generator)>
                            <Plus attr:class="h-4 w-4" />
                            "Start Generator"
                        </button>
                    </div>
                </div>
                <div class="card bg-base-100 shadow-xl border border-accent/20">
                    <div class="card-body">
                        <h3 class="card-title">
                            <HistoryIcon attr:class="h-5 w-5 text-accent" />
                            "View History"
                        </h3>
                        <p class="text-base-content/70 text-sm">"Browse your previous generations and favorites"</p>
                        <button class="btn btn-outline btn-accent w-full gap-2" on:click=move |_| router.navigate(Page::History)>
                            <HistoryIcon attr:class="h-4 w-4" />
                            "Browse History"
                        </button>
                    </div>
                </div>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <ImageIcon attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Generations"</div>
                    <div class="stat-value text-primary">{stat(|d| d.stats.total)}</div>
                    <div class="stat-desc">"All time"</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <Calendar attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"This Month"</div>
                    <div class="stat-value text-secondary">{stat(|d| d.stats.this_month)}</div>
                    <div class="stat-desc">"New generations"</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent">
                        <Heart attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Favorites"</div>
                    <div class="stat-value text-accent">{stat(|d| d.stats.favorites)}</div>
                    <div class="stat-desc">"Saved models"</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <div>
                            <h3 class="card-title">"Recent Generations"</h3>
                            <p class="text-base-content/70 text-sm">"Your latest AI-generated models"</p>
                        </div>
                        <button class="btn btn-outline btn-sm" on:click=move |_| router.navigate(Page::History)>
                            "View All"
                        </button>
                    </div>

                    {move || match dashboard.get() {
                        None => view! {
                            <div class="text-center py-12">
                                <span class="loading loading-spinner loading-md"></span>
                            </div>
                        }
                        .into_any(),
                        Some(data) if data.is_empty() => view! {
                            <div class="text-center py-12">
                                <ImageIcon attr:class="h-16 w-16 text-base-content/40 mx-auto mb-4" />
                                <h3 class="text-lg font-semibold mb-2">"No generations yet"</h3>
                                <p class="text-base-content/70 mb-4">"Create your first AI model to see it here"</p>
                                <button class="btn btn-primary gap-2" on:click=move |_| router.navigate(Page::Generator)>
                                    <Plus attr:class="h-4 w-4" />
                                    "Create First Model"
                                </button>
                            </div>
                        }
                        .into_any(),
                        Some(data) => view! {
                            <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
                                {data.recent.into_iter().map(|record| view! { <RecentCard record /> }).collect_view()}
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn RecentCard(record: GenerationRecord) -> impl IntoView {
    let cover = record.cover_image().map(str::to_string);
    let created = record.created_at.to_date_string();
    let summary = format!("{} • {}", record.ethnicity, record.fashion_style);

    view! {
        <div class="card bg-base-200 overflow-hidden">
            <figure class="aspect-square bg-base-300 flex items-center justify-center">
                {match cover {
                    Some(src) => view! { <img src=src alt="Generated model" class="w-full h-full object-cover" /> }.into_any(),
                    None => view! { <ImageIcon attr:class="h-16 w-16 text-base-content/40" /> }.into_any(),
                }}
            </figure>
            <div class="p-3 space-y-1">
                <div class="flex items-center justify-between">
                    <span class="badge badge-outline badge-sm">{record.gender.as_str()}</span>
                    <span class="text-xs text-base-content/60">{created}</span>
                </div>
                <p class="text-sm text-base-content/70 truncate">{summary}</p>
            </div>
        </div>
    }
}
