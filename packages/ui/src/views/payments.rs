use api::models::{format_soles, Payment, PaymentMethod, PaymentStatus, PaymentSummary, Stand};
use api::{PageRequest, PageResponse, PaymentQuery};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, EmptyState, FormField, Input, ModalOverlay, Pager,
    Select, Textarea,
};
use crate::filters::{filter_payments, replace_item, sort_stands, StandSort};
use crate::forms::{FormErrors, PaymentForm};
use crate::icons::FaPlus;
use crate::{use_api, use_error_reporter, use_toast, Icon};

use super::{parse_filter, today, VIEWS_CSS};

fn current_period() -> String {
    today().format("%Y-%m").to_string()
}

#[component]
pub fn PaymentsView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let toasts = use_toast();

    let mut page = use_signal(PageResponse::<Payment>::default);
    let mut summary = use_signal(PaymentSummary::default);
    let mut request = use_signal(|| api.peek().first_page());
    let mut status_filter = use_signal(String::new);
    let mut period_filter = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut loading = use_signal(|| true);

    let mut stands = use_signal(Vec::<Stand>::new);
    let mut registering = use_signal(|| false);
    let mut form = use_signal(|| PaymentForm::new(current_period()));
    let mut errors = use_signal(FormErrors::new);
    let mut saving = use_signal(|| false);

    let mut loader = use_resource(move || async move {
        let client = api();
        let query = PaymentQuery {
            status: parse_filter(&status_filter(), PaymentStatus::parse),
            stand_id: None,
            period: period_filter().trim().to_string(),
        };
        let req = request();
        loading.set(true);
        match client.list_payments(&query, req).await {
            Ok(result) => page.set(result),
            Err(e) => reporter.report("Failed to load payments", &e),
        }
        match client.payment_summary().await {
            Ok(result) => summary.set(result),
            Err(e) => reporter.report("Failed to load payment summary", &e),
        }
        loading.set(false);
    });

    let visible = use_memo(move || filter_payments(&page.read().content, &search(), None));

    let open_register = move |_| {
        form.set(PaymentForm::new(current_period()));
        errors.set(FormErrors::new());
        registering.set(true);
        if stands.read().is_empty() {
            spawn(async move {
                match api().all_stands().await {
                    Ok(mut list) => {
                        sort_stands(&mut list, StandSort::Code);
                        stands.set(list);
                    }
                    Err(e) => reporter.report("Failed to load stands", &e),
                }
            });
        }
    };

    let handle_register = move |_| {
        let body = match form.read().validate() {
            Ok(body) => body,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            let result = api().register_payment(&body).await;
            saving.set(false);
            match result {
                Ok(payment) => {
                    toasts.success(format!("Pago de {} registrado", payment.amount_label()));
                    registering.set(false);
                    loader.restart();
                }
                Err(e) => reporter.report("Failed to register payment", &e),
            }
        });
    };

    let change_status = move |payment: Payment, status: PaymentStatus| {
        spawn(async move {
            match api().change_payment_status(payment.id, status).await {
                Ok(updated) => {
                    toasts.info(format!("Pago marcado como {}", status.label()));
                    replace_item(&mut page.write().content, updated);
                }
                Err(e) => reporter.report("Failed to change payment status", &e),
            }
        });
    };

    let s = summary();
    let current = page.read().clone();
    let today = today();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Pagos" }
                Button {
                    onclick: open_register,
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Registrar pago"
                }
            }

            div {
                class: "stat-grid",
                div {
                    class: "card stat-card",
                    div { class: "stat-value", {format_soles(s.total_recaudado)} }
                    div { class: "stat-label", "Recaudado" }
                }
                div {
                    class: "card stat-card",
                    div { class: "stat-value", {format_soles(s.total_pendiente)} }
                    div { class: "stat-label", "Por cobrar" }
                }
                div {
                    class: "card stat-card",
                    div { class: "stat-value", "{s.pagos_pendientes}" }
                    div { class: "stat-label", "Pendientes" }
                }
                div {
                    class: "card stat-card",
                    div { class: "stat-value", "{s.pagos_vencidos}" }
                    div { class: "stat-label", "Vencidos" }
                }
            }

            div {
                class: "view-toolbar",
                Input {
                    placeholder: "Stand, periodo u observación",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                Select {
                    value: status_filter(),
                    onchange: move |evt: FormEvent| {
                        status_filter.set(evt.value());
                        request.set(PageRequest::first(request().size));
                    },
                    option { value: "", "Todos los estados" }
                    for status in PaymentStatus::ALL.iter() {
                        option { value: status.as_str(), "{status.label()}" }
                    }
                }
                Input {
                    r#type: "month",
                    value: period_filter(),
                    oninput: move |evt: FormEvent| {
                        period_filter.set(evt.value());
                        request.set(PageRequest::first(request().size));
                    },
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| loader.restart(),
                    "Recargar"
                }
            }

            if loading() {
                EmptyState { message: "Cargando pagos..." }
            } else if visible.read().is_empty() {
                EmptyState { message: "No hay pagos para los filtros elegidos" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Stand" }
                            th { "Periodo" }
                            th { "Monto" }
                            th { "Método" }
                            th { "Vence" }
                            th { "Estado" }
                            th { "" }
                        }
                    }
                    tbody {
                        for payment in visible() {
                            tr {
                                key: "{payment.id}",
                                td { {payment.stand_code.clone().unwrap_or_else(|| format!("#{}", payment.stand_id))} }
                                td { "{payment.period}" }
                                td { "{payment.amount_label()}" }
                                td { {payment.method.map(|m| m.label()).unwrap_or("-")} }
                                td { {payment.due_on.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()} }
                                td {
                                    Badge { tone: BadgeTone::from(payment.status), "{payment.status.label()}" }
                                    if payment.is_overdue(today) && payment.status == PaymentStatus::Pendiente {
                                        " "
                                        Badge { tone: BadgeTone::Danger, "Atrasado" }
                                    }
                                }
                                td {
                                    div {
                                        class: "row-actions",
                                        if matches!(payment.status, PaymentStatus::Pendiente | PaymentStatus::Vencido) {
                                            Button {
                                                variant: ButtonVariant::Outline,
                                                onclick: {
                                                    let payment = payment.clone();
                                                    move |_| change_status(payment.clone(), PaymentStatus::Pagado)
                                                },
                                                "Marcar pagado"
                                            }
                                        }
                                        if payment.status != PaymentStatus::Anulado {
                                            Button {
                                                variant: ButtonVariant::Ghost,
                                                onclick: {
                                                    let payment = payment.clone();
                                                    move |_| change_status(payment.clone(), PaymentStatus::Anulado)
                                                },
                                                "Anular"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Pager {
                label: current.label(),
                total: current.total_elements,
                has_previous: current.has_previous(),
                has_next: current.has_next(),
                on_previous: move |_| request.set(request().previous()),
                on_next: move |_| request.set(request().next()),
            }
        }

        if registering() {
            ModalOverlay {
                title: "Registrar pago",
                on_close: move |_| registering.set(false),
                div {
                    class: "form-grid",
                    FormField {
                        label: "Stand",
                        error: errors.read().get("stand_id"),
                        Select {
                            value: form.read().stand_id.clone(),
                            onchange: move |evt: FormEvent| form.write().stand_id = evt.value(),
                            option { value: "", "Selecciona..." }
                            for stand in stands() {
                                option { key: "{stand.id}", value: "{stand.id}", "{stand.code()} · {stand.title()}" }
                            }
                        }
                    }
                    FormField {
                        label: "Monto (S/)",
                        error: errors.read().get("amount"),
                        Input {
                            value: form.read().amount.clone(),
                            placeholder: "0.00",
                            invalid: errors.read().has("amount"),
                            oninput: move |evt: FormEvent| form.write().amount = evt.value(),
                        }
                    }
                    FormField {
                        label: "Periodo",
                        error: errors.read().get("period"),
                        Input {
                            r#type: "month",
                            value: form.read().period.clone(),
                            invalid: errors.read().has("period"),
                            oninput: move |evt: FormEvent| form.write().period = evt.value(),
                        }
                    }
                    FormField {
                        label: "Método",
                        Select {
                            value: form.read().method.as_str(),
                            onchange: move |evt: FormEvent| {
                                if let Some(method) = PaymentMethod::parse(&evt.value()) {
                                    form.write().method = method;
                                }
                            },
                            for method in PaymentMethod::ALL.iter() {
                                option { value: method.as_str(), "{method.label()}" }
                            }
                        }
                    }
                    FormField {
                        label: "Fecha de pago",
                        error: errors.read().get("paid_on"),
                        Input {
                            r#type: "date",
                            value: form.read().paid_on.clone(),
                            invalid: errors.read().has("paid_on"),
                            oninput: move |evt: FormEvent| form.write().paid_on = evt.value(),
                        }
                    }
                    FormField {
                        label: "Observación",
                        wide: true,
                        Textarea {
                            value: form.read().notes.clone(),
                            oninput: move |evt: FormEvent| form.write().notes = evt.value(),
                        }
                    }
                }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| registering.set(false),
                        "Cancelar"
                    }
                    Button {
                        disabled: saving(),
                        onclick: handle_register,
                        if saving() { "Guardando..." } else { "Registrar" }
                    }
                }
            }
        }
    }
}
