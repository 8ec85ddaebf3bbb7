//! Application membership role names.
//!
//! These must match the `ck_app_members_role` check constraint in
//! `20260301000001_create_organizations_and_apps.sql`.

pub const APP_ROLE_OWNER: &str = "OWNER";
pub const APP_ROLE_ADMIN: &str = "ADMIN";
pub const APP_ROLE_USER: &str = "USER";

/// Roles allowed to create, modify, and delete models of an application.
pub const MODEL_WRITE_ROLES: &[&str] = &[APP_ROLE_OWNER, APP_ROLE_ADMIN];

/// Whether `role` may mutate the models of an application.
pub fn can_write_models(role: &str) -> bool {
    MODEL_WRITE_ROLES.contains(&role)
}
