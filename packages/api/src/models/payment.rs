use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::format_soles;

wire_enum! {
    PaymentStatus {
        Pendiente => "PENDIENTE", "Pendiente";
        Pagado => "PAGADO", "Pagado";
        Vencido => "VENCIDO", "Vencido";
        Anulado => "ANULADO", "Anulado";
    }
}

wire_enum! {
    PaymentMethod {
        Efectivo => "EFECTIVO", "Efectivo";
        Transferencia => "TRANSFERENCIA", "Transferencia";
        Tarjeta => "TARJETA", "Tarjeta";
        Yape => "YAPE", "Yape";
    }
}

/// A stand rent payment for one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(rename = "standId")]
    pub stand_id: i64,
    #[serde(rename = "standCodigo", default)]
    pub stand_code: Option<String>,
    #[serde(rename = "monto")]
    pub amount: f64,
    /// Billing period, `YYYY-MM`.
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "metodo", default)]
    pub method: Option<PaymentMethod>,
    #[serde(rename = "estado")]
    pub status: PaymentStatus,
    #[serde(rename = "fechaPago", default)]
    pub paid_on: Option<NaiveDate>,
    #[serde(rename = "fechaVencimiento", default)]
    pub due_on: Option<NaiveDate>,
    #[serde(rename = "observacion", default)]
    pub notes: Option<String>,
}

impl Payment {
    pub fn amount_label(&self) -> String {
        format_soles(self.amount)
    }

    /// Pending and past its due date, even if the backend has not flagged it
    /// as `VENCIDO` yet.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.status {
            PaymentStatus::Vencido => true,
            PaymentStatus::Pendiente => self.due_on.is_some_and(|due| due < today),
            _ => false,
        }
    }
}

/// Body of the register call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentRequest {
    #[serde(rename = "standId")]
    pub stand_id: i64,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "metodo")]
    pub method: PaymentMethod,
    #[serde(rename = "fechaPago", skip_serializing_if = "Option::is_none")]
    pub paid_on: Option<NaiveDate>,
    #[serde(rename = "observacion", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentStatusRequest {
    #[serde(rename = "estado")]
    pub status: PaymentStatus,
}

/// Collection totals for the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(default)]
    pub total_recaudado: f64,
    #[serde(default)]
    pub total_pendiente: f64,
    #[serde(default)]
    pub pagos_pendientes: u64,
    #[serde(default)]
    pub pagos_vencidos: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(status: &str, due: &str) -> Payment {
        serde_json::from_str(&format!(
            r#"{{"id":1,"standId":2,"monto":350,"periodo":"2024-05","estado":"{status}","fechaVencimiento":"{due}"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_overdue_detection() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(payment("PENDIENTE", "2024-05-31").is_overdue(today));
        assert!(!payment("PENDIENTE", "2024-06-01").is_overdue(today));
        assert!(!payment("PAGADO", "2024-05-01").is_overdue(today));
        assert!(payment("VENCIDO", "2024-07-01").is_overdue(today));
    }

    #[test]
    fn test_amount_label_and_method() {
        let p = payment("PAGADO", "2024-05-31");
        assert_eq!(p.amount_label(), "S/ 350.00");
        assert!(p.method.is_none());
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: PaymentSummary =
            serde_json::from_str(r#"{"totalRecaudado": 1200.5}"#).unwrap();
        assert_eq!(summary.total_recaudado, 1200.5);
        assert_eq!(summary.pagos_vencidos, 0);
    }
}
