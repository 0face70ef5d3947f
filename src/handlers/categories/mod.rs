// handlers/categories - /api/v1/categories
//
// Reads are public; writes require an admin token.

use serde::Deserialize;

use crate::middleware::body::lenient_i32;

pub mod create; // POST   /api/v1/categories
pub mod delete; // DELETE /api/v1/categories/:id
pub mod list; //   GET    /api/v1/categories
pub mod show; //   GET    /api/v1/categories/:id
pub mod update; // PUT    /api/v1/categories/:id

pub use create::category_create;
pub use delete::category_delete;
pub use list::category_list;
pub use show::category_show;
pub use update::category_update;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[serde(default, deserialize_with = "lenient_i32")]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
}
