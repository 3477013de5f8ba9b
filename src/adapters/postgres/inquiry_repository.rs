//! PostgreSQL implementation of InquiryRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, InquiryId, ReferenceNumber, Timestamp};
use crate::domain::inquiry::{InquiryStatus, SurgeryInquiry};
use crate::ports::InquiryRepository;

const INQUIRY_COLUMNS: &str = r#"
    id, inquiry_number, patient_name, patient_phone, patient_email, surgery_type,
    medical_condition, preferred_hospital_location, budget_range, notes,
    medical_report, hospital_details, accommodation_details, estimated_cost,
    status, created_at, updated_at
"#;

#[derive(Clone)]
pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn save(&self, inquiry: &SurgeryInquiry) -> Result<(), DomainError> {
        sqlx::query(&format!(
            r#"
            INSERT INTO surgery_inquiries ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
            INQUIRY_COLUMNS
        ))
        .bind(inquiry.id.as_uuid())
        .bind(inquiry.inquiry_number.as_str())
        .bind(&inquiry.patient_name)
        .bind(&inquiry.patient_phone)
        .bind(&inquiry.patient_email)
        .bind(&inquiry.surgery_type)
        .bind(&inquiry.medical_condition)
        .bind(&inquiry.preferred_hospital_location)
        .bind(&inquiry.budget_range)
        .bind(&inquiry.notes)
        .bind(&inquiry.medical_report)
        .bind(&inquiry.hospital_details)
        .bind(&inquiry.accommodation_details)
        .bind(&inquiry.estimated_cost)
        .bind(inquiry.status.as_str())
        .bind(inquiry.created_at.as_datetime())
        .bind(inquiry.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::AlreadyExists,
                    format!("Surgery inquiry {} already exists", inquiry.inquiry_number),
                )
            } else {
                db_error("insert surgery inquiry", e)
            }
        })?;
        Ok(())
    }

    async fn update(&self, inquiry: &SurgeryInquiry) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE surgery_inquiries SET
                notes = $2,
                hospital_details = $3,
                accommodation_details = $4,
                estimated_cost = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(inquiry.id.as_uuid())
        .bind(&inquiry.notes)
        .bind(&inquiry.hospital_details)
        .bind(&inquiry.accommodation_details)
        .bind(&inquiry.estimated_cost)
        .bind(inquiry.status.as_str())
        .bind(inquiry.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update surgery inquiry", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InquiryNotFound,
                format!("Surgery inquiry not found: {}", inquiry.id),
            )
            .with_detail("id", inquiry.id.to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &InquiryId) -> Result<Option<SurgeryInquiry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM surgery_inquiries WHERE id = $1",
            INQUIRY_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch surgery inquiry", e))?;
        row.as_ref().map(row_to_inquiry).transpose()
    }

    async fn list(&self) -> Result<Vec<SurgeryInquiry>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM surgery_inquiries ORDER BY created_at DESC",
            INQUIRY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list surgery inquiries", e))?;
        rows.iter().map(row_to_inquiry).collect()
    }

    async fn delete(&self, id: &InquiryId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM surgery_inquiries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete surgery inquiry", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_inquiry(row: &PgRow) -> Result<SurgeryInquiry, DomainError> {
    let corrupt = |e: crate::domain::foundation::ValidationError| {
        DomainError::new(ErrorCode::DatabaseError, format!("Corrupt inquiry row: {}", e))
    };
    let number: String = column(row, "inquiry_number")?;
    let status: String = column(row, "status")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(SurgeryInquiry {
        id: InquiryId::from_uuid(column(row, "id")?),
        inquiry_number: ReferenceNumber::parse(number).map_err(corrupt)?,
        patient_name: column(row, "patient_name")?,
        patient_phone: column(row, "patient_phone")?,
        patient_email: column(row, "patient_email")?,
        surgery_type: column(row, "surgery_type")?,
        medical_condition: column(row, "medical_condition")?,
        preferred_hospital_location: column(row, "preferred_hospital_location")?,
        budget_range: column(row, "budget_range")?,
        notes: column(row, "notes")?,
        medical_report: column(row, "medical_report")?,
        hospital_details: column(row, "hospital_details")?,
        accommodation_details: column(row, "accommodation_details")?,
        estimated_cost: column(row, "estimated_cost")?,
        status: status.parse::<InquiryStatus>().map_err(corrupt)?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
