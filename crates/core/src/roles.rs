//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_users_and_roles.sql`.

pub const ROLE_SUPERADMIN: &str = "superadmin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_NURSE: &str = "nurse";

/// All roles, most privileged first.
pub const ALL_ROLES: &[&str] = &[ROLE_SUPERADMIN, ROLE_ADMIN, ROLE_EDITOR, ROLE_NURSE];

/// `superadmin` or `admin`.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_SUPERADMIN || role == ROLE_ADMIN
}

/// Whether `actor` may give another user the `target` role.
///
/// Only superadmins can create or promote superadmins; admins may hand out
/// every other role.
pub fn can_assign_role(actor: &str, target: &str) -> bool {
    match actor {
        ROLE_SUPERADMIN => ALL_ROLES.contains(&target),
        ROLE_ADMIN => target != ROLE_SUPERADMIN && ALL_ROLES.contains(&target),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_roles() {
        assert!(is_admin(ROLE_SUPERADMIN));
        assert!(is_admin(ROLE_ADMIN));
        assert!(!is_admin(ROLE_EDITOR));
        assert!(!is_admin(ROLE_NURSE));
    }

    #[test]
    fn superadmin_assigns_anything() {
        for role in ALL_ROLES {
            assert!(can_assign_role(ROLE_SUPERADMIN, role));
        }
    }

    #[test]
    fn admin_cannot_create_superadmin() {
        assert!(!can_assign_role(ROLE_ADMIN, ROLE_SUPERADMIN));
        assert!(can_assign_role(ROLE_ADMIN, ROLE_NURSE));
    }

    #[test]
    fn unknown_target_rejected() {
        assert!(!can_assign_role(ROLE_SUPERADMIN, "root"));
    }

    #[test]
    fn non_admins_assign_nothing() {
        assert!(!can_assign_role(ROLE_EDITOR, ROLE_NURSE));
        assert!(!can_assign_role(ROLE_NURSE, ROLE_NURSE));
    }
}
