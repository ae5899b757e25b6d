//! Address repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::{Address, NewAddress};
use crate::repositories::AddressStore;

const ADDRESS_COLUMNS: &str =
    "id, contact_id, street, city, province, country, postal_code, created_at, updated_at";

/// Address repository
#[derive(Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Create a new address repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressStore for AddressRepository {
    async fn create(&self, contact_id: i64, new_address: &NewAddress) -> Result<Address> {
        info!("Creating address for contact: {}", contact_id);

        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(contact_id)
        .bind(&new_address.street)
        .bind(&new_address.city)
        .bind(&new_address.province)
        .bind(&new_address.country)
        .bind(&new_address.postal_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(address)
    }

    async fn find_for_contact(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1 AND contact_id = $2"
        ))
        .bind(address_id)
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn list_for_contact(&self, contact_id: i64) -> Result<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE contact_id = $1 ORDER BY id"
        ))
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    async fn update(&self, address: &Address) -> Result<Option<Address>> {
        info!("Updating address: {}", address.id);

        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            UPDATE addresses
            SET street = $3, city = $4, province = $5, country = $6, postal_code = $7,
                updated_at = NOW()
            WHERE id = $1 AND contact_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(address.id)
        .bind(address.contact_id)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.province)
        .bind(&address.country)
        .bind(&address.postal_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn delete(&self, address: &Address) -> Result<bool> {
        info!("Deleting address: {}", address.id);

        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND contact_id = $2")
            .bind(address.id)
            .bind(address.contact_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
