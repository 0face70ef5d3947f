use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::filter::{FieldDef, FieldKind, ResourceSchema};

pub static CATEGORIES: ResourceSchema = ResourceSchema {
    table: "categories",
    fields: &[
        FieldDef::new("id", "id", FieldKind::Integer).filterable(),
        FieldDef::new("name", "name", FieldKind::Text).searchable(),
        FieldDef::new("description", "description", FieldKind::Text).searchable(),
        FieldDef::new("thumbnailImage", "thumbnail_image", FieldKind::Text),
        FieldDef::new("createdAt", "created_at", FieldKind::Timestamp),
        FieldDef::new("updatedAt", "updated_at", FieldKind::Timestamp),
    ],
    relations: &[],
};

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
}

/// Only the `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
}

pub async fn insert(pool: &PgPool, category: &NewCategory) -> Result<i32, DatabaseError> {
    let id = sqlx::query_scalar(
        r#"
        INSERT INTO categories (id, name, description, thumbnail_image)
        VALUES (COALESCE($1, nextval(pg_get_serial_sequence('categories', 'id'))::int), $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.description)
    .bind(&category.thumbnail_image)
    .fetch_one(pool)
    .await?;

    if category.id.is_some() {
        super::sync_identity(pool, "categories").await?;
    }
    Ok(id)
}

/// Returns false when no row has `id`.
pub async fn update(pool: &PgPool, id: i32, changes: &CategoryChanges) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        r#"
        UPDATE categories SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            thumbnail_image = COALESCE($4, thumbnail_image),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(&changes.thumbnail_image)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
