//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.
//! Read endpoints recompute the reports from the session; mutating
//! endpoints apply one session operation and persist the result, so the
//! next read always reflects the change.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::session::Session;
use crate::storage;
use crate::types::{Chance, ParoliError, Spin};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub session: RwLock<Session>,
    /// Where mutations are persisted; None disables persistence (tests).
    pub state_file: Option<String>,
}

impl DashboardState {
    pub fn new(session: Session, state_file: Option<String>) -> Self {
        Self {
            session: RwLock::new(session),
            state_file,
        }
    }

    /// Persist after a mutation. Failure is logged, not returned — the
    /// in-memory session is already updated and stays authoritative.
    fn persist(&self, session: &Session) {
        if let Some(path) = &self.state_file {
            if let Err(e) = storage::save_session(session, Some(path)) {
                warn!(error = %e, path, "Failed to persist session");
            }
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// API error: a status code plus a plain-text message.
#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

impl From<ParoliError> for ApiError {
    fn from(e: ParoliError) -> Self {
        ApiError(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub base_stake: Decimal,
    pub starting_capital: Decimal,
    pub total_profit: Decimal,
    pub balance: Decimal,
    pub spin_count: usize,
    pub active_chances: Vec<&'static str>,
    pub uptime_secs: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChanceRow {
    pub chance: &'static str,
    pub label: &'static str,
    pub status: String,
    pub next_stake: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpinEntry {
    pub outcome: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub chance: &'static str,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SpinRequest {
    pub outcome: u8,
}

#[derive(Debug, Deserialize)]
pub struct StakeRequest {
    pub base_stake: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CapitalRequest {
    pub starting_capital: Decimal,
}

fn status_of(session: &Session) -> StatusResponse {
    StatusResponse {
        base_stake: session.base_stake(),
        starting_capital: session.starting_capital(),
        total_profit: session.total_profit(),
        balance: session.balance(),
        spin_count: session.spin_count(),
        active_chances: session
            .active_chances()
            .into_iter()
            .map(|c| c.tag())
            .collect(),
        uptime_secs: (chrono::Utc::now() - session.started_at()).num_seconds(),
    }
}

// ---------------------------------------------------------------------------
// Read handlers
// ---------------------------------------------------------------------------

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(status_of(&session))
}

/// GET /api/chances
pub async fn get_chances(State(state): State<AppState>) -> Json<Vec<ChanceRow>> {
    let session = state.session.read().await;
    let rows = session
        .reports()
        .into_iter()
        .map(|r| ChanceRow {
            chance: r.chance.tag(),
            label: r.label(),
            status: r.state.phase().to_string(),
            next_stake: r.state.next_stake,
            profit: r.profit,
        })
        .collect();
    Json(rows)
}

/// GET /api/spins
pub async fn get_spins(State(state): State<AppState>) -> Json<Vec<SpinEntry>> {
    let session = state.session.read().await;
    let entries = session
        .spins()
        .iter()
        .map(|s| SpinEntry {
            outcome: s.value(),
            color: s.color().to_string(),
        })
        .collect();
    Json(entries)
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Mutating handlers
// ---------------------------------------------------------------------------

/// POST /api/spins — append one outcome to the history.
pub async fn post_spin(
    State(state): State<AppState>,
    Json(req): Json<SpinRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let spin = Spin::new(req.outcome)?;
    let mut session = state.session.write().await;
    session.record(spin);
    state.persist(&session);
    Ok(Json(status_of(&session)))
}

/// POST /api/undo — remove the most recent spin.
pub async fn post_undo(State(state): State<AppState>) -> Json<StatusResponse> {
    let mut session = state.session.write().await;
    session.undo();
    state.persist(&session);
    Json(status_of(&session))
}

/// POST /api/clear — wipe the history entirely.
pub async fn post_clear(State(state): State<AppState>) -> Json<StatusResponse> {
    let mut session = state.session.write().await;
    session.clear();
    state.persist(&session);
    Json(status_of(&session))
}

/// POST /api/chances/:chance/toggle — flip a chance's active flag.
pub async fn post_toggle(
    State(state): State<AppState>,
    Path(chance): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let chance = Chance::from_str(&chance)
        .map_err(|e| ApiError(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let mut session = state.session.write().await;
    let active = session.toggle(chance);
    state.persist(&session);
    Ok(Json(ToggleResponse {
        chance: chance.tag(),
        active,
    }))
}

/// PUT /api/stake — set the base stake.
pub async fn put_stake(
    State(state): State<AppState>,
    Json(req): Json<StakeRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut session = state.session.write().await;
    session.set_base_stake(req.base_stake)?;
    state.persist(&session);
    Ok(Json(status_of(&session)))
}

/// PUT /api/capital — set the starting capital.
pub async fn put_capital(
    State(state): State<AppState>,
    Json(req): Json<CapitalRequest>,
) -> Json<StatusResponse> {
    let mut session = state.session.write().await;
    session.set_starting_capital(req.starting_capital);
    state.persist(&session);
    Json(status_of(&session))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_state() -> AppState {
        let session = Session::new(
            dec!(10),
            dec!(1000),
            [Chance::Black, Chance::Even, Chance::High],
        )
        .unwrap();
        Arc::new(DashboardState::new(session, None))
    }

    #[test]
    fn test_status_response_serializes() {
        let session = Session::new(dec!(10), dec!(1000), [Chance::Red]).unwrap();
        let json = serde_json::to_string(&status_of(&session)).unwrap();
        assert!(json.contains("\"balance\":1000"));
        assert!(json.contains("\"red\""));
    }

    #[test]
    fn test_chance_row_serializes() {
        let row = ChanceRow {
            chance: "red",
            label: "Red",
            status: "Paroli 1/3".into(),
            next_stake: dec!(20),
            profit: dec!(10),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("Paroli 1/3"));
        assert!(json.contains("20"));
    }

    #[tokio::test]
    async fn test_get_status_handler() {
        let Json(resp) = get_status(State(test_state())).await;
        assert_eq!(resp.balance, dec!(1000));
        assert_eq!(resp.spin_count, 0);
        assert_eq!(resp.active_chances, vec!["high", "even", "black"]);
    }

    #[tokio::test]
    async fn test_post_spin_updates_status() {
        let state = test_state();
        let result = post_spin(State(state.clone()), Json(SpinRequest { outcome: 2 })).await;
        let Json(resp) = result.unwrap();
        assert_eq!(resp.spin_count, 1);
        // Black and Even win, High loses: +10 +10 -10.
        assert_eq!(resp.total_profit, dec!(10));
        assert_eq!(resp.balance, dec!(1010));
    }

    #[tokio::test]
    async fn test_post_spin_rejects_out_of_range() {
        let result = post_spin(State(test_state()), Json(SpinRequest { outcome: 99 })).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_undo_and_clear_handlers() {
        let state = test_state();
        post_spin(State(state.clone()), Json(SpinRequest { outcome: 2 }))
            .await
            .unwrap();
        post_spin(State(state.clone()), Json(SpinRequest { outcome: 0 }))
            .await
            .unwrap();

        let Json(resp) = post_undo(State(state.clone())).await;
        assert_eq!(resp.spin_count, 1);

        let Json(resp) = post_clear(State(state)).await;
        assert_eq!(resp.spin_count, 0);
        assert_eq!(resp.balance, dec!(1000));
    }

    #[tokio::test]
    async fn test_toggle_handler() {
        let state = test_state();
        let Json(resp) = post_toggle(State(state.clone()), Path("red".into()))
            .await
            .unwrap();
        assert!(resp.active);
        let Json(resp) = post_toggle(State(state), Path("red".into()))
            .await
            .unwrap();
        assert!(!resp.active);
    }

    #[tokio::test]
    async fn test_toggle_unknown_chance_rejected() {
        let result = post_toggle(State(test_state()), Path("dozen".into())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_put_stake_handler() {
        let state = test_state();
        let Json(resp) = put_stake(
            State(state.clone()),
            Json(StakeRequest {
                base_stake: dec!(25),
            }),
        )
        .await
        .unwrap();
        assert_eq!(resp.base_stake, dec!(25));

        let result = put_stake(
            State(state),
            Json(StakeRequest {
                base_stake: dec!(0),
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_put_capital_handler() {
        let Json(resp) = put_capital(
            State(test_state()),
            Json(CapitalRequest {
                starting_capital: dec!(250),
            }),
        )
        .await;
        assert_eq!(resp.starting_capital, dec!(250));
        assert_eq!(resp.balance, dec!(250));
    }

    #[tokio::test]
    async fn test_get_chances_rows() {
        let state = test_state();
        post_spin(State(state.clone()), Json(SpinRequest { outcome: 2 }))
            .await
            .unwrap();
        let Json(rows) = get_chances(State(state)).await;
        assert_eq!(rows.len(), 3);
        let black = rows.iter().find(|r| r.chance == "black").unwrap();
        assert_eq!(black.status, "Paroli 1/3");
        assert_eq!(black.next_stake, dec!(20));
    }

    #[tokio::test]
    async fn test_get_spins_colors() {
        let state = test_state();
        post_spin(State(state.clone()), Json(SpinRequest { outcome: 0 }))
            .await
            .unwrap();
        post_spin(State(state.clone()), Json(SpinRequest { outcome: 1 }))
            .await
            .unwrap();
        let Json(entries) = get_spins(State(state)).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].color, "green");
        assert_eq!(entries[1].color, "red");
    }
}
