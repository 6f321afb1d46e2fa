use dioxus::prelude::*;

use api::models::{IncidentPriority, IncidentStatus, PaymentStatus, StandStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeTone {
    fn class(&self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge-neutral",
            BadgeTone::Success => "badge-success",
            BadgeTone::Warning => "badge-warning",
            BadgeTone::Danger => "badge-danger",
            BadgeTone::Info => "badge-info",
        }
    }
}

impl From<StandStatus> for BadgeTone {
    fn from(status: StandStatus) -> Self {
        match status {
            StandStatus::Activo => BadgeTone::Success,
            StandStatus::Inactivo => BadgeTone::Neutral,
            StandStatus::Mantenimiento => BadgeTone::Warning,
            StandStatus::Clausurado => BadgeTone::Danger,
        }
    }
}

impl From<IncidentStatus> for BadgeTone {
    fn from(status: IncidentStatus) -> Self {
        match status {
            IncidentStatus::Abierta => BadgeTone::Danger,
            IncidentStatus::EnProceso => BadgeTone::Warning,
            IncidentStatus::Resuelta => BadgeTone::Success,
            IncidentStatus::Cerrada => BadgeTone::Neutral,
        }
    }
}

impl From<IncidentPriority> for BadgeTone {
    fn from(priority: IncidentPriority) -> Self {
        match priority {
            IncidentPriority::Baja => BadgeTone::Neutral,
            IncidentPriority::Media => BadgeTone::Info,
            IncidentPriority::Alta => BadgeTone::Warning,
            IncidentPriority::Critica => BadgeTone::Danger,
        }
    }
}

impl From<PaymentStatus> for BadgeTone {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pagado => BadgeTone::Success,
            PaymentStatus::Pendiente => BadgeTone::Warning,
            PaymentStatus::Vencido => BadgeTone::Danger,
            PaymentStatus::Anulado => BadgeTone::Neutral,
        }
    }
}

#[component]
pub fn Badge(#[props(default)] tone: BadgeTone, children: Element) -> Element {
    rsx! {
        span { class: "badge {tone.class()}", {children} }
    }
}
