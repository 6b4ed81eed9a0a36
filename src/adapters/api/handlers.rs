//! Request handlers for the bet API.
//!
//! Each handler is a thin shell over `BetTracker` / `ResultSync`; ledger
//! rejections surface as `ApiError` and map to HTTP statuses there.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::domain::bet::{BetId, BetInputs, BetRecord};
use crate::domain::error::LedgerError;
use crate::domain::ledger::LedgerSummary;
use crate::domain::reminder::ReminderRecord;
use crate::domain::staking::{self, StakingInput, StakingResult};
use crate::ports::repository::LedgerEvent;

#[derive(Serialize)]
pub struct CalculationResponse {
    #[serde(flatten)]
    pub result: StakingResult,
    pub label: &'static str,
    pub verdict: &'static str,
}

#[derive(Serialize)]
pub struct OpenBetResponse {
    pub bet: BetRecord,
    pub reminder: Option<ReminderRecord>,
    pub balance: Decimal,
}

#[derive(Deserialize)]
pub struct SettleRequest {
    pub back_won: bool,
}

#[derive(Serialize)]
pub struct DeleteBetResponse {
    pub bet_id: BetId,
    pub refund: Decimal,
    pub reminders_removed: usize,
    pub balance: Decimal,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: LedgerSummary,
    pub currency: String,
}

#[derive(Serialize)]
pub struct FetchResultResponse {
    pub settled: bool,
    pub bet: BetRecord,
}

/// Runs the staking calculator without touching the ledger.
///
/// # Errors
/// Returns `400` when the inputs are outside the accepted ranges.
pub async fn calculate(Json(input): Json<StakingInput>) -> Result<Json<CalculationResponse>, ApiError> {
    let result = staking::compute(&input)?;
    Ok(Json(CalculationResponse {
        result,
        label: input.bet_type.label(),
        verdict: result.verdict(input.bet_type),
    }))
}

/// Opens a bet.
///
/// # Errors
/// Returns `400` for invalid inputs or a blank event name, `409` when a
/// qualifying stake exceeds the balance.
pub async fn open_bet(
    State(state): State<AppState>,
    Json(inputs): Json<BetInputs>,
) -> Result<(StatusCode, Json<OpenBetResponse>), ApiError> {
    let opened = state.tracker.open(inputs).await?;
    Ok((
        StatusCode::CREATED,
        Json(OpenBetResponse {
            bet: opened.bet,
            reminder: opened.reminder,
            balance: opened.balance_after,
        }),
    ))
}

pub async fn list_bets(State(state): State<AppState>) -> Json<Vec<BetRecord>> {
    Json(state.tracker.bets().await)
}

/// Gets one bet.
///
/// # Errors
/// Returns `404` if no bet has this id.
pub async fn get_bet(
    State(state): State<AppState>,
    Path(id): Path<BetId>,
) -> Result<Json<BetRecord>, ApiError> {
    state
        .tracker
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| LedgerError::NotFound(id).into())
}

/// Settles a pending bet.
///
/// # Errors
/// Returns `404` for an unknown bet and `409` if it is already settled.
pub async fn settle_bet(
    State(state): State<AppState>,
    Path(id): Path<BetId>,
    Json(req): Json<SettleRequest>,
) -> Result<Json<BetRecord>, ApiError> {
    Ok(Json(state.tracker.settle(id, req.back_won).await?))
}

/// Deletes a bet.
///
/// # Errors
/// Returns `404` for an unknown bet.
pub async fn delete_bet(
    State(state): State<AppState>,
    Path(id): Path<BetId>,
) -> Result<Json<DeleteBetResponse>, ApiError> {
    let deleted = state.tracker.delete(id).await?;
    Ok(Json(DeleteBetResponse {
        bet_id: deleted.bet.id,
        refund: deleted.refund,
        reminders_removed: deleted.reminders_removed,
        balance: deleted.balance_after,
    }))
}

/// Looks up the event result and settles the bet with it.
///
/// A missing or unavailable result leaves the bet pending (`settled: false`).
///
/// # Errors
/// Returns `503` when no result feed is configured, `404`/`409` for
/// unknown or already settled bets.
pub async fn fetch_result(
    State(state): State<AppState>,
    Path(id): Path<BetId>,
) -> Result<Json<FetchResultResponse>, ApiError> {
    let results = state
        .results
        .as_ref()
        .ok_or(ApiError::Unavailable("result feed is disabled"))?;

    if let Some(bet) = results.fetch_and_settle(id).await? {
        return Ok(Json(FetchResultResponse { settled: true, bet }));
    }

    let bet = state
        .tracker
        .get(id)
        .await
        .ok_or(LedgerError::NotFound(id))?;
    Ok(Json(FetchResultResponse {
        settled: false,
        bet,
    }))
}

/// Tries to settle every pending bet from the result feed.
///
/// # Errors
/// Returns `503` when no result feed is configured.
pub async fn sync_results(State(state): State<AppState>) -> Result<Json<Vec<BetRecord>>, ApiError> {
    let results = state
        .results
        .as_ref()
        .ok_or(ApiError::Unavailable("result feed is disabled"))?;
    Ok(Json(results.sync_pending().await))
}

pub async fn summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: state.tracker.summary().await,
        currency: state.currency.to_string(),
    })
}

/// Returns the audit log, oldest first.
///
/// # Errors
/// Returns `500` when the log cannot be read.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<LedgerEvent>>, ApiError> {
    state
        .tracker
        .events()
        .await
        .map(Json)
        .map_err(|e| ApiError::Storage(format!("{e:#}")))
}

pub async fn list_reminders(State(state): State<AppState>) -> Json<Vec<ReminderRecord>> {
    Json(state.tracker.reminders().await)
}

/// Liveness probe: always returns 200 if the process is running.
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Readiness probe: 200 only if the data directory is writable.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.tracker.is_healthy().await {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
