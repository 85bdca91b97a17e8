use axum::{response::Json, routing::get, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inspection Engine API",
        version = "0.1.0",
        description = r#"
# Inspection Call Lifecycle Engine

Raises raw material, process and final inspection calls against purchase orders.

- Call numbers are `PREFIX-YYYY-NNNN` (`RM-IC`, `PROC-IC`, `FINAL-IC`), gapless per type and year.
- A process call may only draw on an approved raw material call, and the offered
  quantities on one heat never add up to more than the heat's accepted quantity.

## Error Handling

Every failure returns the same body:

```json
{
  "error": "Bad Request",
  "kind": "quantity_exceeded",
  "message": "Offered quantity 41 exceeds remaining accepted quantity 40",
  "context": { "offered": "41", "available": "40" },
  "timestamp": "2025-01-01T00:00:00Z"
}
```

A `503` with kind `transient_store_error` means the whole request may be retried.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "inspection-calls", description = "Inspection call creation and queries"),
        (name = "sequence-counters", description = "Call number counters")
    ),
    paths(
        crate::handlers::inspection_calls::create_inspection_call,
        crate::handlers::inspection_calls::create_raw_material_call,
        crate::handlers::inspection_calls::create_process_call,
        crate::handlers::inspection_calls::create_final_call,
        crate::handlers::inspection_calls::list_calls,
        crate::handlers::inspection_calls::list_approved_calls,
        crate::handlers::inspection_calls::get_call,
        crate::handlers::inspection_calls::get_heat_availability,
        crate::handlers::inspection_calls::get_sequence_counter,
    ),
    components(
        schemas(
            crate::dto::CallHeader,
            crate::dto::HeatEntry,
            crate::dto::LotEntry,
            crate::dto::RawMaterialCallRequest,
            crate::dto::ProcessCallRequest,
            crate::dto::FinalCallRequest,
            crate::dto::StagePayload,
            crate::dto::CreatedCall,
            crate::dto::InspectionCallSummary,
            crate::dto::InspectionCallView,
            crate::dto::StageDetailView,
            crate::dto::HeatAvailability,
            crate::dto::HeatAvailabilityItem,
            crate::entities::inspection::CallStage,
            crate::entities::inspection::CallStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDocV1::openapi())
}

/// Serves the generated document at `/api-docs/openapi.json`.
pub fn openapi_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_inspection_call_paths() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Inspection Engine API"));
        assert!(json.contains("/api/v1/inspection-calls/process"));
        assert!(json.contains("/api/v1/sequence-counters/:call_type"));
    }
}
