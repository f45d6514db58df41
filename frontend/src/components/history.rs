use crate::auth::use_session;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::config::use_config;
use crate::web::file::{confirm, download, now};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use modelgen::{
    BrowserCell, GenerationRepository, HistoryBrowser, HistoryFilter, Page, delete_record,
    load_history, toggle_favorite,
};
use modelgen_shared::GenerationRecord;

/// 页面信号；`None`（仍在加载）或已卸载时视为不可用
#[derive(Clone, Copy)]
struct BrowserSignal(RwSignal<Option<HistoryBrowser>>);

impl BrowserCell for BrowserSignal {
    fn with_browser<R>(&self, f: impl FnOnce(&mut HistoryBrowser) -> R) -> Option<R> {
        self.0.try_update(|b| b.as_mut().map(f)).flatten()
    }
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let toast = use_toast();
    let collection = StoredValue::new(use_config().generation.collection);

    // None 表示仍在加载
    let browser = RwSignal::new(Option::<HistoryBrowser>::None);

    Effect::new(move |_| {
        let Some(user) = session.user() else {
            return;
        };
        let client = session.client();
        spawn_local(async move {
            let collection = collection.get_value();
            let repo = GenerationRepository::with_collection(&client, &collection);
            match load_history(&repo, &user.id, now()).await {
                Ok(loaded) => {
                    browser.try_set(Some(loaded));
                }
                Err(e) => {
                    log::error!("[History] load failed: {}", e);
                    toast.error("Failed to load history", e.message().to_string());
                    browser.try_set(Some(HistoryBrowser::default()));
                }
            }
        });
    });

    // 乐观更新：先切换本地状态，写入失败再回滚
    let on_favorite = move |id: String| {
        let client = session.client();
        spawn_local(async move {
            let collection = collection.get_value();
            let repo = GenerationRepository::with_collection(&client, &collection);
            if let Err(e) = toggle_favorite(&BrowserSignal(browser), &repo, &id).await {
                toast.error("Failed to update favorite", e.message().to_string());
            }
        });
    };

    let on_delete = move |id: String| {
        if !confirm("Are you sure you want to delete this generation?") {
            return;
        }
        let client = session.client();
        spawn_local(async move {
            let collection = collection.get_value();
            let repo = GenerationRepository::with_collection(&client, &collection);
            match delete_record(&BrowserSignal(browser), &repo, &id).await {
                Ok(()) => {
                    toast.success("Generation deleted", "The generation was removed from your history.");
                }
                Err(e) => {
                    log::error!("[History] delete {} failed: {}", id, e);
                    toast.error("Failed to delete generation", e.message().to_string());
                }
            }
        });
    };

    let stats = move || browser.with(|b| b.as_ref().map(|b| b.stats()).unwrap_or_default());
    let visible = move || {
        browser.with(|b| {
            b.as_ref()
                .map(|b| b.visible().into_iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let narrowed = move || {
        browser.with(|b| {
            b.as_ref()
                .is_some_and(|b| !b.query().is_empty() || b.filter() != HistoryFilter::All)
        })
    };

    view! {
        <div class="container mx-auto px-4 py-8 space-y-8">
            <div>
                <h1 class="text-3xl font-bold mb-2">"Generation History"</h1>
                <p class="text-base-content/70">"Browse and manage your AI model generations"</p>
            </div>

            <div class="flex flex-col md:flex-row gap-4">
                <label class="input input-bordered flex items-center gap-2 flex-1">
                    <Search attr:class="h-4 w-4 opacity-60" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by gender, ethnicity, style, background..."
                        prop:value=move || browser.with(|b| b.as_ref().map(|b| b.query().to_string()).unwrap_or_default())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            browser.update(|b| {
                                if let Some(b) = b {
                                    b.set_query(query);
                                }
                            });
                        }
                    />
                </label>
                <div class="join">
                    {HistoryFilter::ALL
                        .into_iter()
                        .map(|filter| {
                            let active = move || browser.with(|b| b.as_ref().is_some_and(|b| b.filter() == filter));
                            view! {
                                <button
                                    class=move || if active() { "btn join-item btn-primary" } else { "btn join-item" }
                                    on:click=move |_| browser.update(|b| {
                                        if let Some(b) = b {
                                            b.set_filter(filter);
                                        }
                                    })
                                >
                                    {filter.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat place-items-center">
                    <div class="stat-value text-primary">{move || stats().total}</div>
                    <div class="stat-desc">"Total Generations"</div>
                </div>
                <div class="stat place-items-center">
                    <div class="stat-value text-error">{move || stats().favorites}</div>
                    <div class="stat-desc">"Favorites"</div>
                </div>
                <div class="stat place-items-center">
                    <div class="stat-value text-info">{move || stats().male}</div>
                    <div class="stat-desc">"Male Models"</div>
                </div>
                <div class="stat place-items-center">
                    <div class="stat-value text-secondary">{move || stats().female}</div>
                    <div class="stat-desc">"Female Models"</div>
                </div>
            </div>

            <Show
                when=move || browser.with(Option::is_some)
                fallback=|| view! {
                    <div class="text-center py-12 text-base-content/60">
                        <span class="loading loading-spinner loading-md"></span>
                        " Loading your generations..."
                    </div>
                }
            >
                <Show
                    when=move || !visible().is_empty()
                    fallback=move || view! {
                        <div class="text-center py-12">
                            <div class="w-16 h-16 bg-base-300 rounded-full flex items-center justify-center mx-auto mb-4">
                                <Search attr:class="w-8 h-8 text-base-content/50" />
                            </div>
                            {move || if narrowed() {
                                view! {
                                    <h3 class="text-lg font-medium mb-2">"No matching generations"</h3>
                                    <p class="text-base-content/60 mb-4">"Try adjusting your search or filters"</p>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <h3 class="text-lg font-medium mb-2">"No generations yet"</h3>
                                    <p class="text-base-content/60 mb-4">"Start creating AI models to see them here"</p>
                                    <button class="btn btn-primary" on:click=move |_| router.navigate(Page::Generator)>
                                        "Create Your First Model"
                                    </button>
                                }
                                .into_any()
                            }}
                        </div>
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                        <For
                            each=visible
                            key=|r| (r.id.clone(), r.is_favorite)
                            children=move |record| {
                                view! {
                                    <HistoryCard
                                        record
                                        on_favorite=Callback::new(on_favorite)
                                        on_delete=Callback::new(on_delete)
                                    />
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn HistoryCard(
    record: GenerationRecord,
    on_favorite: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let id = record.id.clone();
    let cover = record.cover_image().map(str::to_string);
    let heart_class = if record.is_favorite {
        "h-4 w-4 fill-current text-error"
    } else {
        "h-4 w-4"
    };
    let downloads = record
        .generated_images
        .iter()
        .enumerate()
        .map(|(index, url)| {
            let url = url.clone();
            let file_name = record.download_name(index);
            view! {
                <button class="btn btn-outline btn-xs" on:click=move |_| download(&url, &file_name)>
                    <Download attr:class="h-3 w-3" />
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow-xl overflow-hidden">
            <figure class="aspect-square relative bg-base-300">
                {match cover {
                    Some(src) => view! { <img src=src alt="Generated model" class="w-full h-full object-cover" /> }.into_any(),
                    None => view! { <span class="text-base-content/50">"No image"</span> }.into_any(),
                }}
                <button
                    class="btn btn-sm btn-circle absolute top-2 right-2"
                    on:click={
                        let id = id.clone();
                        move |_| on_favorite.run(id.clone())
                    }
                >
                    <Heart attr:class=heart_class />
                </button>
            </figure>
            <div class="card-body p-4">
                <div class="flex items-center justify-between mb-2">
                    <span class="badge badge-outline badge-primary gap-1">
                        <UserIcon attr:class="h-3 w-3" />
                        {record.gender.as_str()}
                    </span>
                    <span class="text-xs text-base-content/60">{record.created_at.to_date_string()}</span>
                </div>
                <div class="space-y-1 text-sm text-base-content/80">
                    <div class="flex items-center gap-2">
                        <Palette attr:class="h-3 w-3 opacity-60" />
                        {record.ethnicity.clone()}
                    </div>
                    <div class="flex items-center gap-2">
                        <Shirt attr:class="h-3 w-3 opacity-60" />
                        {record.fashion_style.to_string()}
                    </div>
                    <div class="flex items-center gap-2">
                        <Mountain attr:class="h-3 w-3 opacity-60" />
                        {record.background.to_string()}
                    </div>
                </div>
                {record.custom_prompt.clone().map(|prompt| view! {
                    <p class="text-xs text-base-content/60 line-clamp-2">"\"" {prompt} "\""</p>
                })}
                <div class="card-actions justify-between items-center mt-2">
                    <div class="flex gap-1">{downloads}</div>
                    <button
                        class="btn btn-outline btn-error btn-xs"
                        on:click=move |_| on_delete.run(id.clone())
                    >
                        <Trash2 attr:class="h-3 w-3" />
                    </button>
                </div>
            </div>
        </div>
    }
}
