//! Reservation endpoints
//!
//! Booking goes through `Store::book`, which checks the table exists before
//! running the overlap check and inserting.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use tablebook_core::{parse_reservation_time, NewReservation, Reservation};

use super::common::{non_empty, Deleted};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;

/// Create reservation request
///
/// `reservation_time` stays a string here so a bad value is reported as a
/// validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_name: String,
    pub table_id: i32,
    pub reservation_time: String,
    pub duration_minutes: i32,
}

impl CreateReservationRequest {
    fn validate(self) -> Result<NewReservation, ApiError> {
        let start = parse_reservation_time(&self.reservation_time)?;
        Ok(NewReservation::new(
            self.customer_name,
            self.table_id,
            start,
            self.duration_minutes,
        )?)
    }
}

/// GET /reservations - list all reservations
async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = state.store.list_reservations().await?;
    Ok(Json(non_empty(
        reservations,
        "reservations",
        state.empty_list_not_found,
    )?))
}

/// POST /reservations - book a table
async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let new = req.validate()?;
    let reservation = state.store.book(new).await?;
    tracing::info!(
        reservation_id = reservation.id,
        table_id = reservation.table_id,
        start = %reservation.reservation_time,
        minutes = reservation.duration_minutes,
        "reservation created"
    );

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// DELETE /reservations/{id} - cancel a reservation
async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Deleted>, ApiError> {
    state.store.delete_reservation(id).await?;
    tracing::info!(reservation_id = id, "reservation deleted");
    Ok(Json(Deleted::ok()))
}

/// Reservation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/{id}", delete(delete_reservation))
}
