//! 面部与身体特征滑块

use leptos::prelude::*;
use modelgen_shared::{BodyFeature, FacialFeature, SLIDER_MAX, SLIDER_MIN};

use super::state::WizardState;

#[component]
pub fn FeaturesStep(state: WizardState) -> impl IntoView {
    let facial = FacialFeature::ALL
        .into_iter()
        .map(|feature| {
            view! {
                <FeatureSlider
                    label=feature.label()
                    value=Signal::derive(move || {
                        state.wizard.with(|w| w.form().facial_features.get(feature).get())
                    })
                    on_change=move |v| state.wizard.update(|w| w.set_facial_feature(feature, v))
                />
            }
        })
        .collect_view();

    let body = BodyFeature::ALL
        .into_iter()
        .map(|feature| {
            view! {
                <FeatureSlider
                    label=feature.label()
                    value=Signal::derive(move || {
                        state.wizard.with(|w| w.form().body_features.get(feature).get())
                    })
                    on_change=move |v| state.wizard.update(|w| w.set_body_feature(feature, v))
                />
            }
        })
        .collect_view();

    view! {
        <div class="space-y-8">
            <div>
                <h3 class="text-lg font-medium mb-4">"Facial Features"</h3>
                <div class="grid md:grid-cols-2 gap-6">{facial}</div>
            </div>
            <div class="divider"></div>
            <div>
                <h3 class="text-lg font-medium mb-4">"Body Features"</h3>
                <div class="grid md:grid-cols-2 gap-6">{body}</div>
            </div>
        </div>
    }
}

#[component]
fn FeatureSlider(
    label: &'static str,
    value: Signal<u8>,
    #[prop(into)] on_change: Callback<u8>,
) -> impl IntoView {
    view! {
        <div class="form-control space-y-2">
            <div class="flex justify-between">
                <span class="label-text">{label}</span>
                <span class="text-sm text-base-content/60">{move || value.get()}</span>
            </div>
            <input
                type="range"
                class="range range-primary range-sm"
                min=SLIDER_MIN
                max=SLIDER_MAX
                step="1"
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<u8>() {
                        on_change.run(v);
                    }
                }
            />
        </div>
    }
}
