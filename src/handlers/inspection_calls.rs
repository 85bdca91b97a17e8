use crate::{
    dto::{
        ApprovedCallsQuery, CallFilters, CreatedCall, FinalCallRequest, HeatAvailability,
        InspectionCallSummary, InspectionCallView, ListCallsQuery, ProcessCallRequest,
        RawMaterialCallRequest, StagePayload,
    },
    entities::inspection::{sequence_counter, CallStage, CallStatus},
    errors::ServiceError,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

type Created = Result<(StatusCode, Json<ApiResponse<CreatedCall>>), ServiceError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ServiceError::ValidationError(rejection.body_text()))
}

fn created(call: CreatedCall) -> (StatusCode, Json<ApiResponse<CreatedCall>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(call)))
}

fn optional_stage(raw: Option<&str>) -> Result<Option<CallStage>, ServiceError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
}

fn call_filters(query: &ListCallsQuery) -> Result<CallFilters, ServiceError> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<CallStatus>)
        .transpose()?;

    Ok(CallFilters {
        stage: optional_stage(query.stage.as_deref())?,
        status,
        po_no: query
            .po_no
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/inspection-calls",
    request_body = StagePayload,
    responses(
        (status = 201, description = "Inspection call created", body = ApiResponse<CreatedCall>),
        (status = 400, description = "Invalid request or business rule rejection", body = crate::errors::ErrorResponse),
        (status = 503, description = "Store busy, retry the request", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn create_inspection_call(
    State(state): State<AppState>,
    payload: Result<Json<StagePayload>, JsonRejection>,
) -> Created {
    let payload = body(payload)?;
    let call = state.inspection_calls.create_call(payload).await?;
    Ok(created(call))
}

#[utoipa::path(
    post,
    path = "/api/v1/inspection-calls/raw-material",
    request_body = RawMaterialCallRequest,
    responses(
        (status = 201, description = "Raw material inspection call created", body = ApiResponse<CreatedCall>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn create_raw_material_call(
    State(state): State<AppState>,
    payload: Result<Json<RawMaterialCallRequest>, JsonRejection>,
) -> Created {
    let request = body(payload)?;
    let call = state
        .inspection_calls
        .create_raw_material_call(request)
        .await?;
    Ok(created(call))
}

#[utoipa::path(
    post,
    path = "/api/v1/inspection-calls/process",
    request_body = ProcessCallRequest,
    responses(
        (status = 201, description = "Process inspection call created", body = ApiResponse<CreatedCall>),
        (status = 400, description = "Upstream not approved, heat not found or quantity exceeded", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn create_process_call(
    State(state): State<AppState>,
    payload: Result<Json<ProcessCallRequest>, JsonRejection>,
) -> Created {
    let request = body(payload)?;
    let call = state.inspection_calls.create_process_call(request).await?;
    Ok(created(call))
}

#[utoipa::path(
    post,
    path = "/api/v1/inspection-calls/final",
    request_body = FinalCallRequest,
    responses(
        (status = 201, description = "Final inspection call created", body = ApiResponse<CreatedCall>),
        (status = 400, description = "Invalid request or unknown process call", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn create_final_call(
    State(state): State<AppState>,
    payload: Result<Json<FinalCallRequest>, JsonRejection>,
) -> Created {
    let request = body(payload)?;
    let call = state.inspection_calls.create_final_call(request).await?;
    Ok(created(call))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-calls",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Inspection calls listed, newest first", body = ApiResponse<PaginatedResponse<InspectionCallSummary>>),
        (status = 400, description = "Unknown stage or status filter", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn list_calls(
    State(state): State<AppState>,
    Query(query): Query<ListCallsQuery>,
) -> ApiResult<PaginatedResponse<InspectionCallSummary>> {
    let filters = call_filters(&query)?;
    let page = query.page.unwrap_or(1).max(1);
    let limit = u64::from(state.config.page_size(query.limit));

    let (items, total) = state
        .inspection_calls
        .get_all_calls(filters, page, limit)
        .await?;
    let total_pages = (total + limit - 1) / limit;

    Ok(Json(ApiResponse::success(PaginatedResponse {
        items,
        total,
        page,
        limit,
        total_pages,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-calls/approved",
    params(ApprovedCallsQuery),
    responses(
        (status = 200, description = "Approved calls for the purchase order", body = ApiResponse<Vec<InspectionCallSummary>>),
        (status = 400, description = "po_no missing", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn list_approved_calls(
    State(state): State<AppState>,
    Query(query): Query<ApprovedCallsQuery>,
) -> ApiResult<Vec<InspectionCallSummary>> {
    let stage = optional_stage(query.stage.as_deref())?;
    let calls = state
        .inspection_calls
        .get_approved_for_po(query.po_no.as_deref().unwrap_or_default(), stage)
        .await?;
    Ok(Json(ApiResponse::success(calls)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-calls/:ic_number",
    params(
        ("ic_number" = String, Path, description = "Inspection call number, e.g. RM-IC-2025-0001")
    ),
    responses(
        (status = 200, description = "Inspection call with stage detail", body = ApiResponse<InspectionCallView>),
        (status = 404, description = "Inspection call not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn get_call(
    State(state): State<AppState>,
    Path(ic_number): Path<String>,
) -> ApiResult<InspectionCallView> {
    let call = state.inspection_calls.get_by_ic_number(&ic_number).await?;
    Ok(Json(ApiResponse::success(call)))
}

#[utoipa::path(
    get,
    path = "/api/v1/inspection-calls/:ic_number/heat-availability",
    params(
        ("ic_number" = String, Path, description = "Raw material inspection call number")
    ),
    responses(
        (status = 200, description = "Remaining acceptable quantity per heat", body = ApiResponse<HeatAvailability>),
        (status = 400, description = "Not a raw material call", body = crate::errors::ErrorResponse),
        (status = 404, description = "Inspection call not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection-calls"
)]
pub async fn get_heat_availability(
    State(state): State<AppState>,
    Path(ic_number): Path<String>,
) -> ApiResult<HeatAvailability> {
    let availability = state
        .inspection_calls
        .get_heat_availability(&ic_number)
        .await?;
    Ok(Json(ApiResponse::success(availability)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sequence-counters/:call_type",
    params(
        ("call_type" = String, Path, description = "RAW_MATERIAL, PROCESS or FINAL")
    ),
    responses(
        (status = 200, description = "Stored counter state", body = ApiResponse<sequence_counter::Model>),
        (status = 400, description = "Unknown call type", body = crate::errors::ErrorResponse),
        (status = 500, description = "Counter row missing", body = crate::errors::ErrorResponse)
    ),
    tag = "sequence-counters"
)]
pub async fn get_sequence_counter(
    State(state): State<AppState>,
    Path(call_type): Path<String>,
) -> ApiResult<sequence_counter::Model> {
    let stage: CallStage = call_type.parse()?;
    let counter = state.inspection_calls.sequence_counter(stage).await?;
    Ok(Json(ApiResponse::success(counter)))
}

pub fn inspection_call_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/inspection-calls",
            get(list_calls).post(create_inspection_call),
        )
        .route(
            "/inspection-calls/raw-material",
            post(create_raw_material_call),
        )
        .route("/inspection-calls/process", post(create_process_call))
        .route("/inspection-calls/final", post(create_final_call))
        .route("/inspection-calls/approved", get(list_approved_calls))
        .route("/inspection-calls/:ic_number", get(get_call))
        .route(
            "/inspection-calls/:ic_number/heat-availability",
            get(get_heat_availability),
        )
        .route("/sequence-counters/:call_type", get(get_sequence_counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn filters_parse_stage_and_status() {
        let query = ListCallsQuery {
            stage: Some("process".into()),
            status: Some("APPROVED".into()),
            po_no: Some("  ".into()),
            ..Default::default()
        };
        let filters = call_filters(&query).unwrap();
        assert_eq!(filters.stage, Some(CallStage::Process));
        assert_eq!(filters.status, Some(CallStatus::Approved));
        assert_eq!(filters.po_no, None);
    }

    #[test]
    fn unknown_stage_filter_is_rejected() {
        let query = ListCallsQuery {
            stage: Some("DISPATCH".into()),
            ..Default::default()
        };
        assert_matches!(
            call_filters(&query),
            Err(ServiceError::UnknownSequenceType(_))
        );
    }

    #[test]
    fn blank_stage_means_no_filter() {
        assert_eq!(optional_stage(Some("")).unwrap(), None);
        assert_eq!(optional_stage(None).unwrap(), None);
    }
}
