use crate::auth::{sign_in, use_session};
use crate::components::icons::*;
use crate::components::toast::use_toast;
use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let get_started = move |_| sign_in(session, toast);

    view! {
        <div class="bg-gradient-to-br from-base-200 via-base-200 to-primary/5">
            // Hero
            <section class="container mx-auto px-4 py-20 text-center">
                <div class="max-w-4xl mx-auto">
                    <div class="flex justify-center mb-6">
                        <div class="p-4 bg-primary/10 rounded-full">
                            <Sparkles attr:class="h-16 w-16 text-primary" />
                        </div>
                    </div>
                    <h1 class="text-5xl md:text-7xl font-bold mb-6">"AI Model Generator"</h1>
                    <p class="text-xl md:text-2xl text-base-content/70 mb-8 max-w-3xl mx-auto">
                        "Transform your reference images and videos into stunning custom male and female models with advanced AI technology"
                    </p>
                    <button class="btn btn-primary btn-lg gap-2" on:click=get_started>
                        <Sparkles attr:class="h-5 w-5" />
                        "Get Started Free"
                    </button>

                    <div class="grid md:grid-cols-3 gap-6 mt-16">
                        <FeatureCard title="Upload & Customize" text="Upload reference images or videos and customize every detail">
                            <Upload attr:class="h-12 w-12 text-primary mx-auto mb-4" />
                        </FeatureCard>
                        <FeatureCard title="AI Generation" text="Advanced AI creates stunning models based on your specifications">
                            <Zap attr:class="h-12 w-12 text-accent mx-auto mb-4" />
                        </FeatureCard>
                        <FeatureCard title="Download" text="Get high-resolution results of your creations">
                            <Download attr:class="h-12 w-12 text-primary mx-auto mb-4" />
                        </FeatureCard>
                    </div>
                </div>
            </section>

            // Features
            <section class="container mx-auto px-4 py-20">
                <div class="text-center mb-16">
                    <h2 class="text-4xl font-bold mb-4">"Powerful Features"</h2>
                    <p class="text-xl text-base-content/70 max-w-2xl mx-auto">
                        "Everything you need to create stunning AI-generated models"
                    </p>
                </div>
                <div class="grid md:grid-cols-2 lg:grid-cols-4 gap-8">
                    <Feature title="Multi-Format Upload" text="Support for images and videos as reference material">
                        <ImageIcon attr:class="h-8 w-8 text-primary" />
                    </Feature>
                    <Feature title="Gender & Ethnicity" text="Choose from diverse gender and ethnicity options">
                        <UserIcon attr:class="h-8 w-8 text-accent" />
                    </Feature>
                    <Feature title="Style Customization" text="Extensive fashion and feature customization options">
                        <Palette attr:class="h-8 w-8 text-primary" />
                    </Feature>
                    <Feature title="AI-Powered" text="State-of-the-art AI for realistic model generation">
                        <Sparkles attr:class="h-8 w-8 text-accent" />
                    </Feature>
                </div>
            </section>

            // CTA
            <section class="container mx-auto px-4 py-20 text-center">
                <div class="max-w-2xl mx-auto">
                    <h2 class="text-4xl font-bold mb-6">"Ready to Create?"</h2>
                    <p class="text-xl text-base-content/70 mb-8">
                        "Join thousands of creators using AI to generate stunning models"
                    </p>
                    <button class="btn btn-primary btn-lg gap-2" on:click=get_started>
                        <Sparkles attr:class="h-5 w-5" />
                        "Start Creating Now"
                    </button>
                </div>
            </section>
        </div>
    }
}

#[component]
fn FeatureCard(title: &'static str, text: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100/50 backdrop-blur-sm shadow">
            <div class="card-body items-center text-center">
                {children()}
                <h3 class="text-lg font-semibold mb-2">{title}</h3>
                <p class="text-base-content/70">{text}</p>
            </div>
        </div>
    }
}

#[component]
fn Feature(title: &'static str, text: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="text-center">
            <div class="p-4 bg-primary/10 rounded-full w-16 h-16 mx-auto mb-4 flex items-center justify-center">
                {children()}
            </div>
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            <p class="text-base-content/70">{text}</p>
        </div>
    }
}
