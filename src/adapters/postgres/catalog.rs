//! PostgreSQL implementation of PricingCatalog.
//!
//! Reads `lab_tests`, `providers` and `test_pricing`. Prices are stored as
//! minor units.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::catalog::{LabTest, PriceEntry, Provider, ProviderKind, ProviderOffer, TestOffer};
use crate::domain::foundation::{DomainError, ErrorCode, Money, ProviderId, TestId};
use crate::ports::PricingCatalog;

const TEST_COLUMNS: &str = "t.id, t.name, t.description, t.category, t.preparation_instructions";
const PROVIDER_COLUMNS: &str =
    "p.id, p.name, p.kind, p.location, p.phone, p.email, p.is_active, p.rating";
const PRICE_COLUMNS: &str = "tp.test_id, tp.provider_id, tp.price_usd, tp.price_lrd, tp.is_available";

#[derive(Clone)]
pub struct PostgresPricingCatalog {
    pool: PgPool,
}

impl PostgresPricingCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingCatalog for PostgresPricingCatalog {
    async fn list_tests(&self) -> Result<Vec<LabTest>, DomainError> {
        let rows = sqlx::query(&format!("SELECT {} FROM lab_tests t ORDER BY t.name", TEST_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list tests", e))?;
        rows.iter().map(row_to_test).collect()
    }

    async fn list_providers(&self) -> Result<Vec<Provider>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM providers p ORDER BY p.name",
            PROVIDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list providers", e))?;
        rows.iter().map(row_to_provider).collect()
    }

    async fn get_test(&self, test_id: &TestId) -> Result<Option<LabTest>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM lab_tests t WHERE t.id = $1", TEST_COLUMNS))
            .bind(test_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch test", e))?;
        row.as_ref().map(row_to_test).transpose()
    }

    async fn get_provider(&self, provider_id: &ProviderId) -> Result<Option<Provider>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM providers p WHERE p.id = $1",
            PROVIDER_COLUMNS
        ))
        .bind(provider_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch provider", e))?;
        row.as_ref().map(row_to_provider).transpose()
    }

    async fn get_pricing(
        &self,
        test_id: &TestId,
        provider_id: &ProviderId,
    ) -> Result<Option<PriceEntry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM test_pricing tp WHERE tp.test_id = $1 AND tp.provider_id = $2",
            PRICE_COLUMNS
        ))
        .bind(test_id.as_uuid())
        .bind(provider_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch pricing", e))?;
        row.as_ref().map(row_to_price).transpose()
    }

    async fn list_providers_for_test(&self, test_id: &TestId) -> Result<Vec<ProviderOffer>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}, {}
            FROM test_pricing tp
            JOIN providers p ON p.id = tp.provider_id
            WHERE tp.test_id = $1 AND tp.is_available AND p.is_active
            ORDER BY p.name
            "#,
            PROVIDER_COLUMNS, PRICE_COLUMNS
        ))
        .bind(test_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list providers for test", e))?;

        rows.iter()
            .map(|row| {
                Ok(ProviderOffer {
                    provider: row_to_provider(row)?,
                    price: row_to_price(row)?,
                })
            })
            .collect()
    }

    async fn list_tests_for_provider(&self, provider_id: &ProviderId) -> Result<Vec<TestOffer>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}, {}
            FROM test_pricing tp
            JOIN lab_tests t ON t.id = tp.test_id
            WHERE tp.provider_id = $1 AND tp.is_available
            ORDER BY t.name
            "#,
            TEST_COLUMNS, PRICE_COLUMNS
        ))
        .bind(provider_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list tests for provider", e))?;

        rows.iter()
            .map(|row| {
                Ok(TestOffer {
                    test: row_to_test(row)?,
                    price: row_to_price(row)?,
                })
            })
            .collect()
    }

    async fn search_tests(&self, query: &str) -> Result<Vec<LabTest>, DomainError> {
        let pattern = format!("%{}%", escape_like(query.trim()));
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM lab_tests t
            WHERE t.name ILIKE $1 OR t.description ILIKE $1 OR t.category ILIKE $1
            ORDER BY t.name
            "#,
            TEST_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("search tests", e))?;
        rows.iter().map(row_to_test).collect()
    }
}

fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_test(row: &PgRow) -> Result<LabTest, DomainError> {
    Ok(LabTest {
        id: TestId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        description: column(row, "description")?,
        category: column(row, "category")?,
        preparation_instructions: column(row, "preparation_instructions")?,
    })
}

fn row_to_provider(row: &PgRow) -> Result<Provider, DomainError> {
    let kind: String = column(row, "kind")?;
    Ok(Provider {
        id: ProviderId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        kind: ProviderKind::parse(&kind).ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, format!("Unknown provider kind: {}", kind))
        })?,
        location: column(row, "location")?,
        phone: column(row, "phone")?,
        email: column(row, "email")?,
        is_active: column(row, "is_active")?,
        rating: column(row, "rating")?,
    })
}

fn row_to_price(row: &PgRow) -> Result<PriceEntry, DomainError> {
    let money = |name: &str| -> Result<Money, DomainError> {
        let cents: i64 = column(row, name)?;
        Money::from_cents(name, cents)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))
    };
    Ok(PriceEntry {
        test_id: TestId::from_uuid(column(row, "test_id")?),
        provider_id: ProviderId::from_uuid(column(row, "provider_id")?),
        price_usd: money("price_usd")?,
        price_lrd: money("price_lrd")?,
        is_available: column(row, "is_available")?,
    })
}
