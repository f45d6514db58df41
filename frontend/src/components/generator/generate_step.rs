//! 最后一步：提交生成并展示结果

use leptos::prelude::*;

use super::state::WizardState;
use crate::components::icons::{Download, RotateCcw, Sparkles};
use crate::web::file::download;

#[component]
pub fn GenerateStep(state: WizardState, #[prop(into)] on_generate: Callback<()>) -> impl IntoView {
    let images = move || state.wizard.with(|w| w.generated_images().to_vec());
    let file_name = move |index: usize| {
        state.record.with_untracked(|r| match r {
            Some(record) => record.download_name(index),
            None => format!("model-{}.png", index + 1),
        })
    };

    view! {
        {move || {
            if state.generating.get() {
                view! {
                    <div class="text-center space-y-4 py-8">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                        <h3 class="text-xl font-medium">"Generating Your Model"</h3>
                        <p class="text-base-content/60">"This may take a few moments..."</p>
                    </div>
                }
                .into_any()
            } else if images().is_empty() {
                view! {
                    <div class="text-center space-y-4 py-8">
                        <Sparkles attr:class="w-16 h-16 text-primary mx-auto" />
                        <h3 class="text-xl font-medium">"Ready to Generate"</h3>
                        <p class="text-base-content/60">"Click the button below to create your AI model"</p>
                        <button class="btn btn-primary btn-lg gap-2" on:click=move |_| on_generate.run(())>
                            <Sparkles attr:class="w-5 h-5" />
                            "Generate AI Model"
                        </button>
                    </div>
                }
                .into_any()
            } else {
                let urls = images();
                let count = urls.len();
                view! {
                    <div class="space-y-6">
                        <div class="text-center">
                            <h3 class="text-xl font-medium mb-2">"Your AI Models"</h3>
                            <p class="text-base-content/60">{format!("Generated {} variations", count)}</p>
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            {urls
                                .into_iter()
                                .enumerate()
                                .map(|(index, url)| {
                                    let alt = format!("Generated model {}", index + 1);
                                    let src = url.clone();
                                    view! {
                                        <div class="relative group">
                                            <img src=src alt=alt class="w-full aspect-square object-cover rounded-lg" />
                                            <div class="absolute bottom-2 right-2 opacity-0 group-hover:opacity-100 transition-opacity">
                                                <button
                                                    class="btn btn-sm btn-square"
                                                    on:click=move |_| download(&url, &file_name(index))
                                                >
                                                    <Download attr:class="w-4 h-4" />
                                                </button>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <div class="text-center">
                            <button class="btn btn-outline btn-primary gap-2" on:click=move |_| state.restart()>
                                <RotateCcw attr:class="w-4 h-4" />
                                "Generate Another Model"
                            </button>
                        </div>
                    </div>
                }
                .into_any()
            }
        }}
    }
}
