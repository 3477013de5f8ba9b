//! PostgreSQL implementation of BookingRepository.
//!
//! Lines and result attachments are JSONB columns so that a status change,
//! its provider change and any new attachments land in one conditional
//! `UPDATE ... WHERE id = $1 AND status = $2`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, db_error, is_unique_violation};
use crate::domain::booking::{
    Booking, BookingLine, BookingRecord, BookingStatus, DeliveryMethod, PatientDetails,
    ProviderChange, ResultAttachment, StatusUpdate,
};
use crate::domain::foundation::{
    BookingId, Currency, DomainError, ErrorCode, Money, ProviderId, ReferenceNumber, Timestamp,
};
use crate::ports::{booking_not_found, conflict_error, BookingFilter, BookingRepository, BookingScope};

const BOOKING_COLUMNS: &str = r#"
    id, booking_number, patient_name, patient_phone, patient_location, patient_email,
    lines, requested_provider_id, provider_id, status, preferred_currency,
    delivery_method, delivery_charge, total_amount, notes, result_attachments,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create_all(&self, bookings: &[Booking]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        for booking in bookings {
            let patient = booking.patient();
            sqlx::query(&format!(
                r#"
                INSERT INTO bookings ({})
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
                "#,
                BOOKING_COLUMNS
            ))
            .bind(booking.id().as_uuid())
            .bind(booking.booking_number().as_str())
            .bind(patient.name())
            .bind(patient.phone())
            .bind(patient.location())
            .bind(patient.email())
            .bind(Json(booking.lines()))
            .bind(booking.requested_provider_id().as_uuid())
            .bind(booking.provider_id().map(|id| *id.as_uuid()))
            .bind(booking.status().as_str())
            .bind(booking.preferred_currency().code())
            .bind(booking.delivery_method().as_str())
            .bind(booking.delivery_charge().cents())
            .bind(booking.total_amount().cents())
            .bind(booking.notes())
            .bind(Json(booking.result_attachments()))
            .bind(booking.created_at().as_datetime())
            .bind(booking.updated_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::new(
                        ErrorCode::AlreadyExists,
                        format!("Booking {} already exists", booking.booking_number()),
                    )
                    .with_detail("id", booking.id().to_string())
                } else {
                    db_error("insert booking", e)
                }
            })?;
        }

        // Dropping `tx` on an early return rolls the whole batch back.
        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch booking", e))?;
        row.as_ref().map(row_to_booking).transpose()
    }

    async fn update_status(&self, update: &StatusUpdate) -> Result<Booking, DomainError> {
        let (provider_action, provider_id) = match update.provider {
            ProviderChange::Keep => ("keep", None),
            ProviderChange::Set(id) => ("set", Some(*id.as_uuid())),
            ProviderChange::Clear => ("clear", None),
        };
        let now = Timestamp::now();

        let row = sqlx::query(&format!(
            r#"
            UPDATE bookings SET
                status = $3,
                provider_id = CASE $4::text
                    WHEN 'set' THEN $5::uuid
                    WHEN 'clear' THEN NULL
                    ELSE provider_id
                END,
                result_attachments = result_attachments || $6::jsonb,
                updated_at = $7
            WHERE id = $1 AND status = $2 AND provider_id IS NOT DISTINCT FROM $8
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(update.booking_id.as_uuid())
        .bind(update.expected_status.as_str())
        .bind(update.new_status.as_str())
        .bind(provider_action)
        .bind(provider_id)
        .bind(Json(&update.attachments))
        .bind(now.as_datetime())
        .bind(update.expected_provider.map(|id| *id.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update booking status", e))?;

        match row {
            Some(row) => row_to_booking(&row),
            // Nothing matched: either the booking is gone or someone else
            // moved it first.
            None => {
                let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM bookings WHERE id = $1)")
                    .bind(update.booking_id.as_uuid())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| db_error("check booking existence", e))?;
                if exists.0 {
                    Err(conflict_error(update))
                } else {
                    Err(booking_not_found(&update.booking_id))
                }
            }
        }
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, DomainError> {
        let provider_id = match filter.scope {
            BookingScope::All => None,
            BookingScope::AssignedTo(id) => Some(*id.as_uuid()),
        };

        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM bookings
            WHERE ($1::uuid IS NULL OR provider_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
            BOOKING_COLUMNS
        ))
        .bind(provider_id)
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list bookings", e))?;

        rows.iter().map(row_to_booking).collect()
    }

    async fn delete(&self, id: &BookingId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete booking", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn corrupt(message: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Corrupt booking row: {}", message))
}

fn row_to_booking(row: &PgRow) -> Result<Booking, DomainError> {
    let booking_number: String = column(row, "booking_number")?;
    let status: String = column(row, "status")?;
    let currency: String = column(row, "preferred_currency")?;
    let delivery_method: String = column(row, "delivery_method")?;
    let delivery_charge: i64 = column(row, "delivery_charge")?;
    let total_amount: i64 = column(row, "total_amount")?;
    let lines: Json<Vec<BookingLine>> = column(row, "lines")?;
    let attachments: Json<Vec<ResultAttachment>> = column(row, "result_attachments")?;
    let provider_id: Option<uuid::Uuid> = column(row, "provider_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    let patient = PatientDetails::new(
        column::<String>(row, "patient_name")?,
        column::<String>(row, "patient_phone")?,
        column::<String>(row, "patient_location")?,
        column::<Option<String>>(row, "patient_email")?,
    )
    .map_err(corrupt)?;

    Ok(Booking::restore(BookingRecord {
        id: BookingId::from_uuid(column(row, "id")?),
        booking_number: ReferenceNumber::parse(booking_number).map_err(corrupt)?,
        patient,
        lines: lines.0,
        requested_provider_id: ProviderId::from_uuid(column(row, "requested_provider_id")?),
        provider_id: provider_id.map(ProviderId::from_uuid),
        status: status.parse::<BookingStatus>().map_err(corrupt)?,
        preferred_currency: currency.parse::<Currency>().map_err(corrupt)?,
        delivery_method: delivery_method.parse::<DeliveryMethod>().map_err(corrupt)?,
        delivery_charge: Money::from_cents("delivery_charge", delivery_charge).map_err(corrupt)?,
        total_amount: Money::from_cents("total_amount", total_amount).map_err(corrupt)?,
        notes: column(row, "notes")?,
        result_attachments: attachments.0,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    }))
}
