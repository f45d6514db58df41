//! 单选类步骤：性别、族裔、服装风格、背景

use leptos::prelude::*;
use modelgen_shared::{Background, ETHNICITIES, FashionStyle, Gender};

use super::state::WizardState;

fn option_class(selected: bool) -> &'static str {
    if selected {
        "card card-bordered cursor-pointer text-center transition-all border-primary bg-primary/10"
    } else {
        "card card-bordered cursor-pointer text-center transition-all hover:border-primary"
    }
}

#[component]
pub fn GenderStep(state: WizardState) -> impl IntoView {
    let subtitle = |gender: Gender| match gender {
        Gender::Male => ("👨", "Generate male models"),
        Gender::Female => ("👩", "Generate female models"),
    };

    view! {
        <div class="grid grid-cols-2 gap-6">
            {Gender::ALL
                .into_iter()
                .map(|gender| {
                    let (icon, text) = subtitle(gender);
                    let selected = move || state.wizard.with(|w| w.form().gender == Some(gender));
                    view! {
                        <div
                            class=move || option_class(selected())
                            on:click=move |_| state.wizard.update(|w| w.set_gender(Some(gender)))
                        >
                            <div class="card-body items-center p-6">
                                <div class="text-4xl mb-4">{icon}</div>
                                <h3 class="text-lg font-medium">{gender.label()}</h3>
                                <p class="text-base-content/60 text-sm">{text}</p>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn EthnicityStep(state: WizardState) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
            {ETHNICITIES
                .into_iter()
                .map(|ethnicity| {
                    let selected = move || {
                        state.wizard.with(|w| w.form().ethnicity.as_deref() == Some(ethnicity))
                    };
                    view! {
                        <div
                            class=move || option_class(selected())
                            on:click=move |_| state.wizard.update(|w| w.set_ethnicity(ethnicity))
                        >
                            <div class="card-body p-4">
                                <h3 class="text-sm font-medium">{ethnicity}</h3>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn FashionStep(state: WizardState) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {FashionStyle::CATALOG
                .into_iter()
                .map(|style| {
                    let icon = style.icon();
                    let label = style.label().to_string();
                    let selected = {
                        let style = style.clone();
                        move || state.wizard.with(|w| w.form().fashion_style.as_ref() == Some(&style))
                    };
                    view! {
                        <div
                            class=move || option_class(selected())
                            on:click=move |_| {
                                let style = style.clone();
                                state.wizard.update(|w| w.set_fashion_style(Some(style)))
                            }
                        >
                            <div class="card-body items-center p-4">
                                <div class="text-2xl mb-2">{icon}</div>
                                <h3 class="text-sm font-medium">{label}</h3>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn BackgroundStep(state: WizardState) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
                {Background::CATALOG
                    .into_iter()
                    .map(|background| {
                        let icon = background.icon();
                        let label = background.label().to_string();
                        let selected = {
                            let background = background.clone();
                            move || state.wizard.with(|w| w.form().background.as_ref() == Some(&background))
                        };
                        view! {
                            <div
                                class=move || option_class(selected())
                                on:click=move |_| {
                                    let background = background.clone();
                                    state.wizard.update(|w| w.set_background(Some(background)))
                                }
                            >
                                <div class="card-body items-center p-6">
                                    <div class="text-3xl mb-2">{icon}</div>
                                    <h3 class="text-sm font-medium">{label}</h3>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Custom Background Details (Optional)"</span>
                </label>
                <textarea
                    class="textarea textarea-bordered w-full"
                    placeholder="Add any specific details or modifications..."
                    prop:value=move || state.wizard.with(|w| w.form().custom_prompt.clone())
                    on:input=move |ev| state.wizard.update(|w| w.set_custom_prompt(event_target_value(&ev)))
                ></textarea>
            </div>
        </div>
    }
}
