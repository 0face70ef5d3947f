// handlers/mod.rs - one module per resource, one file per operation
//
// Access tiers are applied in routes.rs:
// public → customer token → admin token → SUPERADMIN

pub mod admins;
pub mod auth;
pub mod categories;
pub mod customers;
pub mod products;
pub mod system;
pub mod utils;
