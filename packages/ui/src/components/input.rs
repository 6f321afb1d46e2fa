use dioxus::prelude::*;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "form-label", r#for: html_for, {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] min: String,
    #[props(default)] max: String,
    #[props(default)] step: String,
    #[props(default)] disabled: bool,
    #[props(default)] invalid: bool,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id: id,
            class: if invalid { "form-input invalid {class}" } else { "form-input {class}" },
            r#type: r#type,
            placeholder: placeholder,
            value: value,
            min: min,
            max: max,
            step: step,
            disabled: disabled,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            id: id,
            class: "form-input {class}",
            placeholder: placeholder,
            rows: "{rows}",
            value: value,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// `<select>` wrapper. Options are passed as children.
#[component]
pub fn Select(
    #[props(default)] id: String,
    #[props(default)] class: String,
    value: String,
    onchange: EventHandler<FormEvent>,
    children: Element,
) -> Element {
    rsx! {
        select {
            id: id,
            class: "form-input {class}",
            value: value,
            onchange: move |evt| onchange.call(evt),
            {children}
        }
    }
}

/// Inline validation message under a field. Renders nothing without a message.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            p { class: "field-error", "{message}" }
        },
        None => rsx! {},
    }
}

/// Label, control and validation message stacked in a form grid cell.
#[component]
pub fn FormField(
    label: String,
    #[props(default)] html_for: String,
    #[props(default)] error: Option<String>,
    #[props(default)] wide: bool,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: if wide { "form-field wide" } else { "form-field" },
            Label { html_for: html_for, "{label}" }
            {children}
            FieldError { message: error }
        }
    }
}
