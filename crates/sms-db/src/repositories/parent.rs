use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{CountBucket, NewParent, Parent, ParentQueryFilter};

pub async fn list<'e, E>(
    executor: E,
    filter: &ParentQueryFilter,
) -> Result<Vec<Parent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, first_name, last_name, email, phone, occupation, address,
                   city, state, parent_type, created_at, updated_at
            FROM parents
            WHERE ($1::text IS NULL OR parent_type = $1)
              AND ($2::text IS NULL OR city = $2)
              AND ($3::text IS NULL OR state = $3)
            ORDER BY last_name, first_name
            LIMIT COALESCE($4, 50) OFFSET COALESCE($5, 0)
        "#,
    )
    .bind(filter.parent_type.as_deref())
    .bind(filter.city.as_deref())
    .bind(filter.state.as_deref())
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, parent_id: Uuid) -> Result<Option<Parent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, first_name, last_name, email, phone, occupation, address,
                   city, state, parent_type, created_at, updated_at
            FROM parents
            WHERE id = $1
        "#,
    )
    .bind(parent_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, parent_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let id: Option<Uuid> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM parents WHERE id = $1
        "#,
    )
    .bind(parent_id)
    .fetch_optional(executor)
    .await?;
    Ok(id.is_some())
}

pub async fn create<'e, E>(executor: E, new: &NewParent) -> Result<Parent, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO parents
                (first_name, last_name, email, phone, occupation, address, city, state, parent_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, first_name, last_name, email, phone, occupation, address,
                      city, state, parent_type, created_at, updated_at
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.phone.as_deref())
    .bind(new.occupation.as_deref())
    .bind(new.address.as_deref())
    .bind(new.city.as_deref())
    .bind(new.state.as_deref())
    .bind(&new.parent_type)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    parent_id: Uuid,
    new: &NewParent,
) -> Result<Option<Parent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE parents
            SET first_name = $2, last_name = $3, email = $4, phone = $5, occupation = $6,
                address = $7, city = $8, state = $9, parent_type = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, occupation, address,
                      city, state, parent_type, created_at, updated_at
        "#,
    )
    .bind(parent_id)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.phone.as_deref())
    .bind(new.occupation.as_deref())
    .bind(new.address.as_deref())
    .bind(new.city.as_deref())
    .bind(new.state.as_deref())
    .bind(&new.parent_type)
    .fetch_optional(executor)
    .await
}

/// Hard delete. Assignment links cascade; the legacy pointer on students is
/// nulled by the foreign key.
pub async fn delete<'e, E>(executor: E, parent_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM parents WHERE id = $1
        "#,
    )
    .bind(parent_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn counts_by_parent_type<'e, E>(executor: E) -> Result<Vec<CountBucket>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT parent_type AS label, COUNT(*) AS count
            FROM parents
            GROUP BY parent_type
            ORDER BY count DESC
        "#,
    )
    .fetch_all(executor)
    .await
}
