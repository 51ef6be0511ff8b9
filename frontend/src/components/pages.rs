//! Static marketing and legal pages.

use crate::web::router::Link;
use leptos::prelude::*;

const OVERVIEW_VIDEO: &str = "https://www.youtube.com/embed/br4h19Tv0ok?autoplay=1";
const CONTACT_EMAIL: &str = "developer@farmvizion.com";
const LINKEDIN_URL: &str = "https://www.linkedin.com/company/farmvizion.com/";

const FEATURES: [(&str, &str); 3] = [
    (
        "AI Crop Diagnostics",
        "Identify plant diseases, pests, and health issues using AI-powered analysis of images and data.",
    ),
    (
        "IoT Sensor Integration",
        "Monitor soil, climate, and crop conditions in real-time with intelligent sensor networks.",
    ),
    (
        "Actionable Insights",
        "Receive alerts and treatment suggestions tailored to each crop and region.",
    ),
];

struct TeamMember {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
}

const TEAM: [TeamMember; 2] = [
    TeamMember {
        name: "Ravindra Vemuri",
        role: "Founder & CEO",
        bio: "Ravindra brings decades of experience in AI and IoT, driving the vision of smart, sustainable agriculture through technology.",
    },
    TeamMember {
        name: "Team Member 2",
        role: "Agricultural Scientist",
        bio: "Expert in crop health and diagnostics, helping train AI models with agricultural precision.",
    },
];

#[component]
pub fn HomePage() -> impl IntoView {
    let (show_video, set_show_video) = signal(false);

    view! {
        <section class="hero min-h-[60vh] bg-success/20 rounded-box">
            <div class="hero-content text-center">
                <div class="max-w-3xl space-y-6">
                    <h1 class="text-4xl font-bold">"Farmvizion"</h1>
                    <p class="text-lg">
                        "Farmvizion leverages AI and IoT to transform farms into intelligent ecosystems. Monitor, diagnose, and act in real time."
                    </p>
                    <Show
                        when=move || show_video.get()
                        fallback=move || view! {
                            <button class="btn btn-success rounded-full" on:click=move |_| set_show_video.set(true)>
                                "Watch Video"
                            </button>
                        }
                    >
                        <div class="relative aspect-video w-full max-w-xl mx-auto rounded-lg overflow-hidden shadow-lg">
                            <iframe
                                src=OVERVIEW_VIDEO
                                title="Farmvizion Overview"
                                allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                allowfullscreen=true
                                class="w-full h-full"
                            ></iframe>
                            <button
                                class="btn btn-circle btn-sm absolute top-2 right-2"
                                aria-label="Close video"
                                on:click=move |_| set_show_video.set(false)
                            >
                                "✕"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </section>

        <section class="py-16">
            <h2 class="text-3xl font-bold text-center mb-8">"Why Farmvizion?"</h2>
            <div class="grid gap-8 md:grid-cols-3">
                {FEATURES
                    .iter()
                    .map(|(title, desc)| view! {
                        <div class="card bg-base-100 shadow hover:shadow-lg transition">
                            <div class="card-body">
                                <h3 class="card-title">{*title}</h3>
                                <p class="text-base-content/70">{*desc}</p>
                            </div>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>

        <section class="bg-success text-success-content rounded-box py-16 px-4 text-center">
            <h2 class="text-3xl font-bold mb-4">"Ready to revolutionize your farm?"</h2>
            <p class="mb-6">"Connect with us and bring intelligence to your fields."</p>
            <Link to="/contact" class="btn rounded-full">"Contact Us"</Link>
        </section>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="max-w-5xl mx-auto text-center space-y-12">
            <h1 class="text-4xl font-bold">"About Us"</h1>
            <p class="text-lg max-w-3xl mx-auto">
                <span class="font-semibold text-success">
                    "At Farmvizion we put field-level intelligence in the hands of every farmer."
                </span>
            </p>
            <div class="grid md:grid-cols-2 gap-10">
                <div class="card bg-success/10 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-2xl">"Our Mission"</h3>
                        <p>"We aim to make precision agriculture affordable with connected sensors and practical AI."</p>
                    </div>
                </div>
                <div class="card bg-success/10 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-2xl">"Our Vision"</h3>
                        <p>"To enable sustainable, data-driven farming in every region we serve."</p>
                    </div>
                </div>
            </div>
            <div>
                <h2 class="text-2xl font-bold mb-4">"What Sets Us Apart"</h2>
                <ul class="space-y-3 max-w-2xl mx-auto list-disc list-inside text-left">
                    <li>"Real-time monitoring of soil, climate and crop health"</li>
                    <li>"Edge computing on the device, even with patchy connectivity"</li>
                    <li>"Custom AI models trained on regional crops"</li>
                    <li>"Multi-sensor fusion for reliable readings"</li>
                </ul>
            </div>
        </div>
    }
}

#[component]
pub fn TeamPage() -> impl IntoView {
    view! {
        <div class="max-w-6xl mx-auto">
            <h1 class="text-4xl font-bold text-center mb-12">"Meet the Team"</h1>
            <div class="grid gap-10 md:grid-cols-2 lg:grid-cols-3">
                {TEAM
                    .iter()
                    .map(|member| {
                        let initial = member.name.chars().next().unwrap_or('?').to_string();
                        view! {
                            <div class="card bg-base-100 shadow hover:shadow-lg transition text-center">
                                <div class="card-body items-center">
                                    <div class="avatar placeholder">
                                        <div class="w-24 rounded-full bg-success/30 text-success-content text-xl font-bold">
                                            <span>{initial}</span>
                                        </div>
                                    </div>
                                    <h2 class="card-title">{member.name}</h2>
                                    <p class="text-success font-medium">{member.role}</p>
                                    <p class="text-sm text-base-content/70">{member.bio}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto text-center space-y-6">
            <h1 class="text-4xl font-bold">"Contact Us"</h1>
            <p class="text-lg text-base-content/70">
                "Got questions or want to collaborate? Reach out to us at "
                <a href=format!("mailto:{CONTACT_EMAIL}") class="link link-success">
                    {CONTACT_EMAIL}
                </a>
            </p>
            <p>
                <a
                    href=LINKEDIN_URL
                    target="_blank"
                    rel="noopener noreferrer"
                    class="link link-info text-2xl"
                    aria-label="Farmvizion LinkedIn"
                >
                    "LinkedIn"
                </a>
            </p>
            <p class="text-base-content/70">
                "Interested in a farm plan? "
                <Link to="/farmplan" class="link link-success">"Send us an enquiry"</Link>
                " once you are signed in."
            </p>
        </div>
    }
}

#[component]
pub fn TermsPage() -> impl IntoView {
    view! {
        <article class="prose max-w-4xl mx-auto bg-base-100 rounded-box p-8">
            <h1 class="text-success">"Terms and Conditions"</h1>
            <p>
                "Welcome to Farmvizion. By accessing or using our platform, you agree to comply with and be bound by these terms. Please read them carefully."
            </p>
            <h2>"1. Use of Platform"</h2>
            <p>
                "You must use the platform in accordance with all applicable laws and for agricultural purposes only. Misuse will result in account suspension."
            </p>
            <h2>"2. Account Responsibilities"</h2>
            <p>
                "You are responsible for maintaining the confidentiality of your login credentials and for all activities under your account."
            </p>
            <h2>"3. Data Accuracy"</h2>
            <p>
                "The agricultural data provided is based on best-effort forecasts and analysis. It should not be the sole basis for critical farming decisions."
            </p>
            <h2>"4. Modifications"</h2>
            <p>
                "Farmvizion reserves the right to update or modify these terms at any time. We will notify users of changes via email or the platform."
            </p>
            <p class="italic">"Last updated: May 31, 2025"</p>
        </article>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! {
        <article class="prose max-w-4xl mx-auto bg-base-100 rounded-box p-8">
            <h1 class="text-success">"Privacy Policy"</h1>
            <p>"This policy explains what Farmvizion collects when you use the platform and how it is used."</p>
            <h2>"Information We Collect"</h2>
            <p>"Account details you provide (name, email, phone) and readings from the devices you link to your farm."</p>
            <h2>"Use of Information"</h2>
            <p>"We use this information to run your dashboards, produce crop recommendations and answer your enquiries."</p>
            <h2>"Data Sharing"</h2>
            <p>"We do not sell your data. It is shared only with service providers needed to operate the platform."</p>
            <h2>"Your Rights"</h2>
            <p>"You can ask us to correct or delete your account data at any time by contacting us."</p>
            <p class="italic">"Last updated: May 31, 2025"</p>
        </article>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[50vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to="/" class="btn btn-link mt-4">"Back to home"</Link>
            </div>
        </div>
    }
}
