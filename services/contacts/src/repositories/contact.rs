//! Contact repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use crate::models::{Contact, ContactFilter, NewContact, Pagination};
use crate::repositories::ContactStore;

const CONTACT_COLUMNS: &str =
    "id, user_id, first_name, last_name, email, phone, created_at, updated_at";

/// Contact repository
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn create(&self, user_id: i64, new_contact: &NewContact) -> Result<Contact> {
        info!("Creating contact for user: {}", user_id);

        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new_contact.first_name)
        .bind(&new_contact.last_name)
        .bind(&new_contact.email)
        .bind(&new_contact.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn find_for_user(&self, user_id: i64, contact_id: i64) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND user_id = $2"
        ))
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn update(&self, contact: &Contact) -> Result<Option<Contact>> {
        info!("Updating contact: {}", contact.id);

        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            UPDATE contacts
            SET first_name = $3, last_name = $4, email = $5, phone = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(contact.id)
        .bind(contact.user_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn delete(&self, contact: &Contact) -> Result<bool> {
        info!("Deleting contact: {}", contact.id);

        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(contact.id)
            .bind(contact.user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        user_id: i64,
        filter: &ContactFilter,
        page: Pagination,
    ) -> Result<(Vec<Contact>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts");
        push_filters(&mut count, user_id, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {CONTACT_COLUMNS} FROM contacts"));
        push_filters(&mut select, user_id, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.size)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let contacts = select
            .build_query_as::<Contact>()
            .fetch_all(&self.pool)
            .await?;

        Ok((contacts, total))
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, user_id: i64, filter: &ContactFilter) {
    builder.push(" WHERE user_id = ").push_bind(user_id);

    if let Some(name) = &filter.name {
        let pattern = like_pattern(name);
        builder
            .push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(email) = &filter.email {
        builder.push(" AND email ILIKE ").push_bind(like_pattern(email));
    }

    if let Some(phone) = &filter.phone {
        builder.push(" AND phone ILIKE ").push_bind(like_pattern(phone));
    }
}

/// Wrap `needle` for a substring match, escaping LIKE wildcards
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
