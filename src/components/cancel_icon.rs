use dioxus::prelude::*;

#[component]
pub fn CancelIcon() -> Element {
    rsx! {
        svg {
            fill: "none",
            height: "16",
            stroke: "currentColor",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            stroke_width: "2",
            view_box: "0 0 24 24",
            width: "16",
            xmlns: "http://www.w3.org/2000/svg",
            circle { cx: "12", cy: "12", r: "10" }
            path { d: "m15 9-6 6" }
            path { d: "m9 9 6 6" }
        }
    }
}
