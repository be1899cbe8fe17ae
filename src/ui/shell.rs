use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME, APP_TAGLINE};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let version = version_label();

    rsx! {
        div { class: "tf-app",
            header { class: "tf-header",
                div { class: "tf-header-inner",
                    div { class: "tf-brand",
                        span { style: "font-size: 24px", "🚢" }
                        div {
                            h1 { class: theme::H1, style: "margin: 0", "{APP_NAME}" }
                            p { class: "tf-tagline", "{APP_TAGLINE}" }
                        }
                    }
                    nav { class: "tf-nav",
                        NavButton {
                            active: matches!(current_route, Route::Dashboard {}),
                            onclick: move |_| { nav.push(Route::Dashboard {}); },
                            label: "📊 Dashboard",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Calculator {}),
                            onclick: move |_| { nav.push(Route::Calculator {}); },
                            label: "🧮 Calculator",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Rules {}),
                            onclick: move |_| { nav.push(Route::Rules {}); },
                            label: "📚 Rules",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                        }
                    }
                }
            }
            main { class: "tf-main",
                {children}
            }
            footer { class: "tf-footer", "{version}" }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
