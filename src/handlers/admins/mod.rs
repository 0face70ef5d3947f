// handlers/admins - /api/v1/admins
//
// login is public; /me, PUT / and change-password need any admin token;
// everything else needs a SUPERADMIN.

use serde::Deserialize;

pub mod change_password; // POST   /api/v1/admins/change-password
pub mod create; //          POST   /api/v1/admins
pub mod delete; //          DELETE /api/v1/admins/:id
pub mod list; //            GET    /api/v1/admins
pub mod login; //           POST   /api/v1/admins/login
pub mod me; //              GET    /api/v1/admins/me
pub mod show; //            GET    /api/v1/admins/:id
pub mod update; //          PUT    /api/v1/admins/:id
pub mod update_self; //     PUT    /api/v1/admins

pub use change_password::admin_change_password;
pub use create::admin_create;
pub use delete::admin_delete;
pub use list::admin_list;
pub use login::admin_login;
pub use me::admin_me;
pub use show::admin_show;
pub use update::admin_update;
pub use update_self::admin_update_self;

#[derive(Debug, Default, Deserialize)]
pub struct AdminPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}
