//! 模型生成向导页面
//!
//! 子模块按步骤拆分，共享 `WizardState`：
//! - `state`: 向导状态与预览资源
//! - `upload_step` / `choice_steps` / `features_step` / `generate_step`: 各步骤 UI

mod choice_steps;
mod features_step;
mod generate_step;
mod state;
mod upload_step;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::use_session;
use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::components::toast::use_toast;
use crate::config::use_config;
use crate::web::file::now;
use leptos::prelude::*;
use leptos::task::spawn_local;
use modelgen::{GenerationOutcome, GenerationService, WizardStep, failure_message};

use choice_steps::{BackgroundStep, EthnicityStep, FashionStep, GenderStep};
use features_step::FeaturesStep;
use generate_step::GenerateStep;
use state::WizardState;
use upload_step::UploadStep;

#[component]
pub fn GeneratorPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let settings = use_config().generation;
    let state = WizardState::new();

    // 页面卸载后丢弃仍在进行的生成结果
    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || {
            alive.store(false, Ordering::Relaxed);
            state.release_previews();
        }
    });

    let on_generate = move |_: ()| {
        if state.generating.get_untracked() {
            return;
        }
        let form = state.form_snapshot();
        let client = session.client();
        let settings = settings.clone();
        let alive = alive.clone();

        state.generating.set(true);
        spawn_local(async move {
            let service = GenerationService::with_settings(&client, settings);
            let result = service.submit(&form, now()).await;

            if !alive.load(Ordering::Relaxed) {
                log::info!("[Generator] view closed, discarding generation result");
                return;
            }
            state.generating.set(false);

            match result {
                Ok(outcome) => {
                    toast.success("Generation Complete!", outcome.success_message());
                    let GenerationOutcome { images, record, .. } = outcome;
                    state.wizard.update(|w| {
                        w.complete(images);
                    });
                    state.record.set(Some(record));
                }
                Err(e) => {
                    log::error!("[Generator] generation failed: {}", e);
                    toast.error("Generation Failed", failure_message(&e));
                }
            }
        });
    };

    let step = Memo::new(move |_| state.step());
    let step_content = move || match step.get() {
        WizardStep::Upload => view! { <UploadStep state /> }.into_any(),
        WizardStep::Gender => view! { <GenderStep state /> }.into_any(),
        WizardStep::Ethnicity => view! { <EthnicityStep state /> }.into_any(),
        WizardStep::Fashion => view! { <FashionStep state /> }.into_any(),
        WizardStep::Features => view! { <FeaturesStep state /> }.into_any(),
        WizardStep::Background => view! { <BackgroundStep state /> }.into_any(),
        WizardStep::Generate => {
            view! { <GenerateStep state on_generate=on_generate.clone() /> }.into_any()
        }
    };

    let indicators = WizardStep::ALL
        .into_iter()
        .map(|s| {
            let reached = move || s <= step.get();
            view! {
                <div class="flex flex-col items-center gap-1">
                    <div class=move || {
                        if reached() {
                            "w-10 h-10 rounded-full flex items-center justify-center bg-primary text-primary-content"
                        } else {
                            "w-10 h-10 rounded-full flex items-center justify-center bg-base-300 text-base-content/50"
                        }
                    }>{s.index() + 1}</div>
                    <p class=move || {
                        if reached() {
                            "text-xs font-medium hidden md:block"
                        } else {
                            "text-xs font-medium hidden md:block text-base-content/50"
                        }
                    }>{s.title()}</p>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="container mx-auto px-4 py-8">
            <div class="max-w-4xl mx-auto space-y-6">
                <div>
                    <div class="flex items-center justify-between mb-4">
                        <h1 class="text-2xl font-bold">"AI Model Generator"</h1>
                        <span class="badge badge-outline">
                            {move || format!("Step {} of {}", step.get().index() + 1, WizardStep::ALL.len())}
                        </span>
                    </div>
                    <progress
                        class="progress progress-primary w-full h-2 mb-6"
                        max="100"
                        value=move || state.wizard.with(|w| w.progress_percent())
                    ></progress>
                    <div class="flex justify-between">{indicators}</div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{move || step.get().title()}</h2>
                        <p class="text-base-content/60">{move || step.get().description()}</p>
                        <div class="mt-4">{step_content}</div>
                    </div>
                </div>

                <div class="flex justify-between">
                    <button
                        class="btn btn-outline gap-2"
                        disabled=move || step.get() == WizardStep::Upload || state.generating.get()
                        on:click=move |_| {
                            state.wizard.update(|w| {
                                w.previous();
                            })
                        }
                    >
                        <ChevronLeft attr:class="w-4 h-4" />
                        "Previous"
                    </button>
                    <Show when=move || step.get() != WizardStep::LAST>
                        <button
                            class="btn btn-primary gap-2"
                            disabled=move || !state.wizard.with(|w| w.can_proceed())
                            on:click=move |_| {
                                state.wizard.update(|w| {
                                    w.next();
                                })
                            }
                        >
                            "Next"
                            <ChevronRight attr:class="w-4 h-4" />
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
