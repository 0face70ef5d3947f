// handlers/products - /api/v1/products
//
// Reads (including search) are public; writes require an admin token.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::body::lenient_i32;

pub mod create; // POST   /api/v1/products
pub mod delete; // DELETE /api/v1/products/:id
pub mod list; //   GET    /api/v1/products
pub mod search; // GET    /api/v1/products/search
pub mod show; //   GET    /api/v1/products/:id
pub mod update; // PUT    /api/v1/products/:id

pub use create::product_create;
pub use delete::product_delete;
pub use list::product_list;
pub use search::product_search;
pub use show::product_show;
pub use update::product_update;

pub(crate) const UNKNOWN_CATEGORY: &str = "categoryId does not exist";

// products.price is NUMERIC(10, 2)
const PRICE_LIMIT: i64 = 100_000_000;
const PRICE_SCALE: u32 = 2;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "lenient_i32")]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub discount_percent: Option<i32>,
    pub description: Option<String>,
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub category_id: Option<i32>,
    pub image1: Option<String>,
    pub image2: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub stock: Option<i32>,
}

impl ProductPayload {
    /// Range checks shared by create and update; absent fields pass.
    pub fn check_ranges(&self) -> Result<(), ApiError> {
        if matches!(self.id, Some(id) if id <= 0) {
            return Err(ApiError::invalid_argument("id must be a positive integer"));
        }
        if matches!(self.price, Some(price) if price.is_sign_negative()) {
            return Err(ApiError::invalid_argument("price must not be negative"));
        }
        if let Some(price) = self.price {
            if price >= Decimal::from(PRICE_LIMIT) || price.normalize().scale() > PRICE_SCALE {
                return Err(ApiError::invalid_argument(
                    "price must be below 100000000 with at most 2 decimal places",
                ));
            }
        }
        if matches!(self.discount_percent, Some(d) if !(0..=100).contains(&d)) {
            return Err(ApiError::invalid_argument("discountPercent must be between 0 and 100"));
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Err(ApiError::invalid_argument("stock must not be negative"));
        }
        if matches!(self.category_id, Some(id) if id <= 0) {
            return Err(ApiError::invalid_argument("categoryId must be a positive integer"));
        }
        Ok(())
    }
}
