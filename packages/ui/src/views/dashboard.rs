use api::models::{format_soles, IncidentStatus, PaymentSummary, Stand, StandStatus};
use dioxus::prelude::*;

use crate::components::{Badge, BadgeTone};
use crate::{use_api, use_error_reporter};

use super::VIEWS_CSS;

/// Counters shown on the admin landing page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub stands_total: usize,
    /// Per status, in `StandStatus::ALL` order.
    pub stands_by_status: Vec<(StandStatus, usize)>,
    pub open_incidents: u64,
    pub incidents_in_progress: u64,
    pub payments: PaymentSummary,
}

impl DashboardStats {
    pub fn from_stands(stands: &[Stand]) -> Self {
        let stands_by_status = StandStatus::ALL
            .iter()
            .map(|status| (*status, stands.iter().filter(|s| s.status == *status).count()))
            .collect();
        Self {
            stands_total: stands.len(),
            stands_by_status,
            ..Self::default()
        }
    }

    /// Share of active stands, 0 to 100.
    pub fn occupancy_percent(&self) -> u32 {
        if self.stands_total == 0 {
            return 0;
        }
        let active = self
            .stands_by_status
            .iter()
            .find(|(status, _)| *status == StandStatus::Activo)
            .map_or(0, |(_, n)| *n);
        ((active * 100) as f64 / self.stands_total as f64).round() as u32
    }
}

#[component]
pub fn DashboardView() -> Element {
    let api = use_api();
    let reporter = use_error_reporter();
    let mut stats = use_signal(DashboardStats::default);
    let mut loading = use_signal(|| true);

    let _loader = use_resource(move || async move {
        let client = api();
        loading.set(true);
        let mut next = match client.all_stands().await {
            Ok(stands) => DashboardStats::from_stands(&stands),
            Err(e) => {
                reporter.report("Failed to load stands", &e);
                DashboardStats::default()
            }
        };
        match client.count_incidents(IncidentStatus::Abierta).await {
            Ok(n) => next.open_incidents = n,
            Err(e) => reporter.report("Failed to count incidents", &e),
        }
        match client.count_incidents(IncidentStatus::EnProceso).await {
            Ok(n) => next.incidents_in_progress = n,
            Err(e) => reporter.report("Failed to count incidents", &e),
        }
        match client.payment_summary().await {
            Ok(summary) => next.payments = summary,
            Err(e) => reporter.report("Failed to load payment summary", &e),
        }
        stats.set(next);
        loading.set(false);
    });

    let s = stats();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            h1 { class: "view-title", "Resumen del mercado" }
            if loading() {
                p { class: "product-meta", "Cargando..." }
            }
            div {
                class: "stat-grid",
                StatCard { label: "Stands registrados", value: "{s.stands_total}" }
                StatCard { label: "Ocupación", value: "{s.occupancy_percent()} %" }
                StatCard { label: "Incidencias abiertas", value: "{s.open_incidents}" }
                StatCard { label: "Incidencias en proceso", value: "{s.incidents_in_progress}" }
                StatCard { label: "Recaudado", value: format_soles(s.payments.total_recaudado) }
                StatCard { label: "Por cobrar", value: format_soles(s.payments.total_pendiente) }
                StatCard { label: "Pagos pendientes", value: "{s.payments.pagos_pendientes}" }
                StatCard { label: "Pagos vencidos", value: "{s.payments.pagos_vencidos}" }
            }
            div {
                class: "card",
                h2 { class: "view-section-title", "Stands por estado" }
                div {
                    class: "view-toolbar",
                    for (status, count) in s.stands_by_status.iter().copied() {
                        Badge { key: "{status.as_str()}", tone: BadgeTone::from(status), "{status.label()}: {count}" }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "card stat-card",
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stand(id: i64, status: StandStatus) -> Stand {
        Stand {
            id,
            block: "A".into(),
            number: id.to_string(),
            business_name: None,
            category: None,
            status,
            owner_id: None,
            owner_name: None,
            description: None,
            phone: None,
        }
    }

    #[test]
    fn test_stats_from_stands() {
        let stands = vec![
            stand(1, StandStatus::Activo),
            stand(2, StandStatus::Activo),
            stand(3, StandStatus::Clausurado),
        ];
        let stats = DashboardStats::from_stands(&stands);
        assert_eq!(stats.stands_total, 3);
        assert_eq!(stats.stands_by_status[0], (StandStatus::Activo, 2));
        assert_eq!(stats.stands_by_status[3], (StandStatus::Clausurado, 1));
        assert_eq!(stats.occupancy_percent(), 67);
    }

    #[test]
    fn test_occupancy_of_empty_market() {
        assert_eq!(DashboardStats::from_stands(&[]).occupancy_percent(), 0);
    }
}
