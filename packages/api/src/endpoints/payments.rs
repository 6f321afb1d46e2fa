use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Payment, PaymentRequest, PaymentStatus, PaymentStatusRequest, PaymentSummary};
use crate::page::{PageRequest, PageResponse};

const PAYMENTS: &str = "/api/v1/admin/pagos";

/// Server-side filters for the payment list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaymentQuery {
    pub status: Option<PaymentStatus>,
    pub stand_id: Option<i64>,
    /// `YYYY-MM`
    pub period: String,
}

impl PaymentQuery {
    pub(crate) fn to_query(&self, page: PageRequest) -> Vec<(&'static str, String)> {
        let mut query = page.query();
        if let Some(status) = self.status {
            query.push(("estado", status.as_str().to_string()));
        }
        if let Some(stand_id) = self.stand_id {
            query.push(("standId", stand_id.to_string()));
        }
        query.push(("periodo", self.period.clone()));
        query
    }
}

impl ApiClient {
    pub async fn list_payments(
        &self,
        query: &PaymentQuery,
        page: PageRequest,
    ) -> Result<PageResponse<Payment>, ApiError> {
        self.get_query(PAYMENTS, &query.to_query(page)).await
    }

    pub async fn register_payment(&self, request: &PaymentRequest) -> Result<Payment, ApiError> {
        self.post(PAYMENTS, request).await
    }

    pub async fn change_payment_status(
        &self,
        id: i64,
        status: PaymentStatus,
    ) -> Result<Payment, ApiError> {
        let body = PaymentStatusRequest { status };
        self.patch(&format!("{PAYMENTS}/{id}/estado"), Some(&body))
            .await
    }

    pub async fn payment_summary(&self) -> Result<PaymentSummary, ApiError> {
        self.get(&format!("{PAYMENTS}/resumen")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let query = PaymentQuery {
            status: Some(PaymentStatus::Vencido),
            stand_id: Some(8),
            period: "2024-05".into(),
        };
        let pairs = query.to_query(PageRequest::first(20));
        assert!(pairs.contains(&("estado", "VENCIDO".to_string())));
        assert!(pairs.contains(&("standId", "8".to_string())));
        assert!(pairs.contains(&("periodo", "2024-05".to_string())));
    }

    #[test]
    fn test_default_query_has_only_paging() {
        let pairs = PaymentQuery::default().to_query(PageRequest::first(20));
        let non_blank: Vec<_> = pairs.iter().filter(|(_, v)| !v.is_empty()).collect();
        assert_eq!(non_blank.len(), 2);
    }
}
