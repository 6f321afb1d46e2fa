use serde::{Deserialize, Serialize};

wire_enum! {
    IncidentStatus {
        Abierta => "ABIERTA", "Abierta";
        EnProceso => "EN_PROCESO", "En proceso";
        Resuelta => "RESUELTA", "Resuelta";
        Cerrada => "CERRADA", "Cerrada";
    }
}

impl IncidentStatus {
    /// Still needs someone's attention.
    pub fn is_open(&self) -> bool {
        matches!(self, IncidentStatus::Abierta | IncidentStatus::EnProceso)
    }
}

wire_enum! {
    IncidentPriority {
        Baja => "BAJA", "Baja";
        Media => "MEDIA", "Media";
        Alta => "ALTA", "Alta";
        Critica => "CRITICA", "Crítica";
    }
}

/// An incident reported on the market floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "estado")]
    pub status: IncidentStatus,
    #[serde(rename = "prioridad")]
    pub priority: IncidentPriority,
    #[serde(rename = "standId", default)]
    pub stand_id: Option<i64>,
    #[serde(rename = "standCodigo", default)]
    pub stand_code: Option<String>,
    #[serde(rename = "responsableId", default)]
    pub assignee_id: Option<i64>,
    #[serde(rename = "responsableNombre", default)]
    pub assignee_name: Option<String>,
    #[serde(rename = "reportadoPor", default)]
    pub reported_by: Option<String>,
    /// ISO timestamp as sent by the backend.
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

impl Incident {
    /// `2024-05-03 14:20` out of `2024-05-03T14:20:11.123`.
    pub fn created_label(&self) -> String {
        self.created_at
            .as_deref()
            .map(|raw| raw.replace('T', " ").chars().take(16).collect())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "prioridad")]
    pub priority: IncidentPriority,
    #[serde(rename = "standId", skip_serializing_if = "Option::is_none")]
    pub stand_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentStatusRequest {
    #[serde(rename = "estado")]
    pub status: IncidentStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssignResponsibleRequest {
    #[serde(rename = "responsableId")]
    pub assignee_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_incident() {
        let json = r#"{
            "id": 31,
            "titulo": "Fuga de agua",
            "estado": "EN_PROCESO",
            "prioridad": "ALTA",
            "standCodigo": "B-4",
            "fechaCreacion": "2024-05-03T14:20:11.123"
        }"#;
        let incident: Incident = serde_json::from_str(json).unwrap();
        assert!(incident.status.is_open());
        assert_eq!(incident.priority, IncidentPriority::Alta);
        assert_eq!(incident.created_label(), "2024-05-03 14:20");
        assert!(incident.assignee_id.is_none());
    }

    #[test]
    fn test_closed_states_are_not_open() {
        assert!(!IncidentStatus::Resuelta.is_open());
        assert!(!IncidentStatus::Cerrada.is_open());
    }
}
