//! Role name constants matching the `roles` seed data.

/// Full access: user management, all entity CRUD, file storage admin.
pub const ROLE_ADMIN: &str = "admin";

/// Team leadership: all entity CRUD, no user management.
pub const ROLE_MANAGER: &str = "manager";

/// Regular team member: entity CRUD on the boards they work in.
pub const ROLE_MEMBER: &str = "member";
