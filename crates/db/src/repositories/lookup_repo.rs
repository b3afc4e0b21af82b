//! Find-or-create repositories for the category and counselor lookups.
//!
//! Both use `INSERT ... ON CONFLICT DO NOTHING` followed by a re-select
//! so concurrent sync runs converge on one row per name.

use sqlx::PgPool;

use crate::models::lookup::{Category, Counselor};

pub struct CategoryRepo;

impl CategoryRepo {
    /// Look up a category by name, creating it when absent.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;

        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }
}

pub struct CounselorRepo;

impl CounselorRepo {
    /// Look up a counselor by name, creating it when absent.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Counselor, sqlx::Error> {
        sqlx::query("INSERT INTO counselors (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;

        sqlx::query_as::<_, Counselor>(
            "SELECT id, name, created_at FROM counselors WHERE name = $1",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
