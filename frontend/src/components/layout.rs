use crate::auth::use_auth;
use crate::components::icons::{Leaf, LogOut};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

const PUBLIC_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/team", "Team"),
    ("/contact", "Contact"),
];

/// Page chrome: navigation bar, content area and footer.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <NavBar />
            <main class="flex-grow container mx-auto px-4 py-8">{children()}</main>
            <Footer />
        </div>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (menu_open, set_menu_open) = signal(false);

    let is_authenticated = auth.is_authenticated();
    let is_admin = auth.is_admin();
    let greeting = move || {
        auth.session()
            .with(|s| s.display_name().map(|name| format!("Hi, {name}")))
    };

    let on_logout = move |_| {
        auth.logout();
        set_menu_open.set(false);
        router.navigate_to(AppRoute::Home);
    };

    // Public links plus whatever the session unlocks.
    let links = move || {
        let mut links: Vec<(&'static str, &'static str)> = PUBLIC_LINKS.to_vec();
        if is_authenticated.get() {
            links.push(("/myfarm", "My Farm"));
            links.push(("/farmplan", "Farm Plan"));
        }
        if is_admin.get() {
            links.push(("/admin", "Admin"));
        }
        links
    };

    view! {
        <nav class="navbar bg-success text-success-content shadow">
            <div class="flex-1 gap-2">
                <Leaf attr:class="h-6 w-6" />
                <Link to="/" class="text-xl font-bold">
                    "Farmvizion"
                </Link>
            </div>
            <ul class="hidden md:flex menu menu-horizontal gap-1">
                {move || {
                    links()
                        .into_iter()
                        .map(|(to, label)| view! {
                            <li><Link to=to>{label}</Link></li>
                        })
                        .collect_view()
                }}
            </ul>
            <div class="flex-none gap-2 ml-2">
                <span class="hidden lg:inline text-sm">{greeting}</span>
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <Link to="/signin" class="btn btn-sm btn-outline">
                            "Sign In"
                        </Link>
                    }
                >
                    <button class="btn btn-sm btn-outline gap-2" on:click=on_logout>
                        <LogOut attr:class="h-4 w-4" />
                        "Sign Out"
                    </button>
                </Show>
                <button
                    class="md:hidden btn btn-ghost btn-sm"
                    aria-label="Toggle menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>
        </nav>
        <Show when=move || menu_open.get()>
            <ul
                class="menu bg-success text-success-content md:hidden"
                on:click=move |_| set_menu_open.set(false)
            >
                {move || {
                    links()
                        .into_iter()
                        .map(|(to, label)| view! {
                            <li><Link to=to>{label}</Link></li>
                        })
                        .collect_view()
                }}
            </ul>
        </Show>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-4 bg-success text-success-content">
            <div class="flex flex-wrap gap-4 justify-center">
                <span>"© 2025 Farmvizion. All rights reserved."</span>
                <Link to="/terms" class="link link-hover">"Terms"</Link>
                <Link to="/privacy" class="link link-hover">"Privacy"</Link>
            </div>
        </footer>
    }
}
