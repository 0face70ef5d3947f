use rust_decimal::Decimal;
use sqlx::PgPool;

use super::category::CATEGORIES;
use crate::database::manager::DatabaseError;
use crate::filter::{FieldDef, FieldKind, RelationDef, ResourceSchema};

pub static PRODUCTS: ResourceSchema = ResourceSchema {
    table: "products",
    fields: &[
        FieldDef::new("id", "id", FieldKind::Integer).filterable(),
        FieldDef::new("name", "name", FieldKind::Text).searchable(),
        FieldDef::new("price", "price", FieldKind::Decimal).filterable(),
        FieldDef::new("discountPercent", "discount_percent", FieldKind::Integer).filterable(),
        FieldDef::new("description", "description", FieldKind::Text).searchable(),
        FieldDef::new("detail", "detail", FieldKind::Text).searchable(),
        FieldDef::new("categoryId", "category_id", FieldKind::Integer).filterable(),
        FieldDef::new("image1", "image1", FieldKind::Text),
        FieldDef::new("image2", "image2", FieldKind::Text),
        FieldDef::new("stock", "stock", FieldKind::Integer).filterable(),
        FieldDef::new("createdAt", "created_at", FieldKind::Timestamp),
        FieldDef::new("updatedAt", "updated_at", FieldKind::Timestamp),
    ],
    relations: &[RelationDef { name: "category", schema: &CATEGORIES, local_column: "category_id" }],
};

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Option<i32>,
    pub name: String,
    pub price: Decimal,
    pub discount_percent: Option<i32>,
    pub description: String,
    pub detail: Option<String>,
    pub category_id: i32,
    pub image1: String,
    pub image2: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub discount_percent: Option<i32>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub category_id: Option<i32>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    pub stock: Option<i32>,
}

pub async fn insert(pool: &PgPool, product: &NewProduct) -> Result<i32, DatabaseError> {
    let id = sqlx::query_scalar(
        r#"
        INSERT INTO products
            (id, name, price, discount_percent, description, detail, category_id, image1, image2, stock)
        VALUES (COALESCE($1, nextval(pg_get_serial_sequence('products', 'id'))::int), $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(product.discount_percent)
    .bind(&product.description)
    .bind(&product.detail)
    .bind(product.category_id)
    .bind(&product.image1)
    .bind(&product.image2)
    .bind(product.stock)
    .fetch_one(pool)
    .await?;

    if product.id.is_some() {
        super::sync_identity(pool, "products").await?;
    }
    Ok(id)
}

pub async fn update(pool: &PgPool, id: i32, changes: &ProductChanges) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        r#"
        UPDATE products SET
            name = COALESCE($2, name),
            price = COALESCE($3, price),
            discount_percent = COALESCE($4, discount_percent),
            description = COALESCE($5, description),
            detail = COALESCE($6, detail),
            category_id = COALESCE($7, category_id),
            image1 = COALESCE($8, image1),
            image2 = COALESCE($9, image2),
            stock = COALESCE($10, stock),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&changes.name)
    .bind(changes.price)
    .bind(changes.discount_percent)
    .bind(&changes.description)
    .bind(&changes.detail)
    .bind(changes.category_id)
    .bind(&changes.image1)
    .bind(&changes.image2)
    .bind(changes.stock)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
