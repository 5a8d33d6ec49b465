//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Handlers are stateless: the schedule
//! arrives in the request and the derived schedule goes back in the response.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::debug;

use super::dto::{
    HealthResponse, OrderLinesRequest, OrderLinesResponse, QuoteRequest, ScheduleNumberRequest,
    ScheduleNumberResponse, SchedulePreviewRequest, SchedulePreviewResponse, SheetQuery,
    SheetResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{parse_delivery_date, Clock, DeliveryStop, Schedule};
use crate::services::{format_order_lines, order_total, parse_order_lines, DispatchSheet, PriceQuote};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DEFAULT_ROWS_PER_PAGE: usize = 25;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Also reports the numbering and pricing configuration the server runs with.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        driver_prefix: state.config.driver_prefix.clone(),
        custom_pricing: state.config.pricing_table_path.is_some(),
    }))
}

// =============================================================================
// Pricing & Numbering
// =============================================================================

/// POST /v1/pricing/quote
///
/// Itemized price for a stop's free-text items.
pub async fn quote_items(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> HandlerResult<PriceQuote> {
    let Json(request) = payload?;
    Ok(Json(state.engine.pricing().quote(request.items.as_deref())))
}

/// POST /v1/schedule-number
///
/// Schedule number for a delivery date and driver set. An unparseable date
/// yields the `XXX` weekday placeholder rather than an error.
pub async fn schedule_number(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleNumberRequest>, JsonRejection>,
) -> HandlerResult<ScheduleNumberResponse> {
    let Json(request) = payload?;
    let schedule_number = state.engine.numberer().generate(
        state.engine.clock().now(),
        &request.delivery_date,
        &request.driver_ids,
    );
    Ok(Json(ScheduleNumberResponse { schedule_number }))
}

// =============================================================================
// Schedules
// =============================================================================

/// POST /v1/schedules/preview
///
/// Load the submitted stops, apply edits in order, and return the schedule
/// with sequence numbers, prices and schedule number refreshed.
pub async fn preview_schedule(
    State(state): State<AppState>,
    payload: Result<Json<SchedulePreviewRequest>, JsonRejection>,
) -> HandlerResult<SchedulePreviewResponse> {
    let Json(request) = payload?;
    let previous = request.schedule_number.clone().unwrap_or_default();
    let schedule = build_schedule(&state, request)?;

    let total = schedule.total();
    let number_changed = schedule.schedule_number != previous;
    Ok(Json(SchedulePreviewResponse {
        schedule,
        total,
        number_changed,
    }))
}

/// POST /v1/schedules/sheet
///
/// Dispatch sheet layout for the submitted schedule, split into pages.
pub async fn schedule_sheet(
    State(state): State<AppState>,
    query: Result<Query<SheetQuery>, QueryRejection>,
    payload: Result<Json<SchedulePreviewRequest>, JsonRejection>,
) -> HandlerResult<SheetResponse> {
    let Query(query) = query?;
    let Json(request) = payload?;
    let rows_per_page = query.rows_per_page.unwrap_or(DEFAULT_ROWS_PER_PAGE);
    if rows_per_page == 0 {
        return Err(AppError::BadRequest(
            "rows_per_page must be at least 1".to_string(),
        ));
    }

    let schedule = build_schedule(&state, request)?;
    let sheet = DispatchSheet::from_schedule(&schedule);
    let pages = sheet
        .pages(rows_per_page)
        .into_iter()
        .map(<[_]>::to_vec)
        .collect();
    Ok(Json(SheetResponse { sheet, pages }))
}

fn build_schedule(state: &AppState, request: SchedulePreviewRequest) -> Result<Schedule, AppError> {
    let engine = &state.engine;
    let schedule_date = match request.schedule_date.as_deref() {
        Some(date) => parse_delivery_date(date)?,
        None => engine.clock().today(),
    };

    let mut schedule = Schedule::new(schedule_date);
    for input in request.stops {
        schedule.insert_stop(DeliveryStop::from(input), None)?;
    }
    engine.refresh(&mut schedule);
    engine.apply_all(&mut schedule, request.edits)?;

    debug!(
        schedule = %schedule.schedule_number,
        stops = schedule.len(),
        "built schedule preview"
    );
    Ok(schedule)
}

// =============================================================================
// Order Lines
// =============================================================================

/// POST /v1/order-lines/parse
///
/// Parse `<qty>x <name> @$<price>` lines from the wholesale item picker.
pub async fn parse_order(
    payload: Result<Json<OrderLinesRequest>, JsonRejection>,
) -> HandlerResult<OrderLinesResponse> {
    let Json(request) = payload?;
    let lines = parse_order_lines(&request.text)?;
    let total = order_total(&lines)?;
    Ok(Json(OrderLinesResponse {
        normalized: format_order_lines(&lines),
        total,
        lines,
    }))
}
