// handlers/customers - /api/v1/customers (admin only)

pub mod delete; // DELETE /api/v1/customers/:id
pub mod list; //   GET    /api/v1/customers
pub mod show; //   GET    /api/v1/customers/:id

pub use delete::customer_delete;
pub use list::customer_list;
pub use show::customer_show;
