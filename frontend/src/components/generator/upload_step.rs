//! 参考文件上传步骤

use leptos::prelude::*;

use super::state::WizardState;
use crate::components::icons::{Upload, Video, X};
use crate::components::toast::use_toast;
use crate::web::file::take_selected_files;

#[component]
pub fn UploadStep(state: WizardState) -> impl IntoView {
    let toast = use_toast();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let rejected = state.add_files(take_selected_files(&input));
        if !rejected.is_empty() {
            log::warn!("[Generator] rejected non-media files: {:?}", rejected);
            toast.error(
                "Unsupported file",
                format!("Only images and videos are accepted: {}", rejected.join(", ")),
            );
        }
    };

    view! {
        <div class="space-y-6">
            <div
                class="border-2 border-dashed border-primary/30 rounded-lg p-8 text-center hover:border-primary/60 transition-colors cursor-pointer"
                on:click=move |_| {
                    if let Some(input) = input_ref.get() {
                        input.click();
                    }
                }
            >
                <Upload attr:class="w-12 h-12 text-primary mx-auto mb-4" />
                <h3 class="text-lg font-medium mb-2">"Upload Reference Images"</h3>
                <p class="text-base-content/60 mb-4">
                    "Upload clear face photos to replicate facial features in generated models"
                </p>
                <span class="btn btn-outline btn-primary">"Choose Files"</span>
                <input
                    node_ref=input_ref
                    type="file"
                    multiple
                    accept="image/*,video/*"
                    class="hidden"
                    on:change=on_change
                />
            </div>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <For
                    each=move || state.wizard.with(|w| {
                        w.form()
                            .reference_files
                            .iter()
                            .map(|f| (f.id, f.name.clone(), f.preview.clone()))
                            .collect::<Vec<_>>()
                    })
                    key=|(id, _, _)| *id
                    children=move |(id, name, preview)| {
                        view! {
                            <div class="relative group">
                                <div class="aspect-square bg-base-300 rounded-lg overflow-hidden flex items-center justify-center">
                                    {match preview {
                                        Some(src) => view! {
                                            <img src=src alt=name.clone() class="w-full h-full object-cover" />
                                        }
                                        .into_any(),
                                        None => view! {
                                            <div class="text-center p-2">
                                                <Video attr:class="w-8 h-8 text-primary mx-auto mb-2" />
                                                <p class="text-sm text-base-content/60 break-all">{name.clone()}</p>
                                            </div>
                                        }
                                        .into_any(),
                                    }}
                                </div>
                                <button
                                    class="btn btn-error btn-circle btn-xs absolute -top-2 -right-2 opacity-0 group-hover:opacity-100"
                                    on:click=move |_| state.remove_file(id)
                                >
                                    <X attr:class="w-4 h-4" />
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
