//! Authenticated caller context resolved per request.

use serde::{Deserialize, Serialize};

use super::UserId;
use super::course::{Author, CourseId};

/// Platform role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Parse the role column stored alongside users. Unknown values fall back
    /// to [`Role::User`].
    pub fn from_stored(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

/// Caller identity with the set of courses the caller may open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub entitlements: Vec<CourseId>,
}

impl CallerIdentity {
    /// Whether the caller purchased or was granted `course_id`.
    pub fn is_entitled_to(&self, course_id: &CourseId) -> bool {
        self.entitlements.contains(course_id)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Snapshot embedded into nested entities written by this caller.
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn caller(role: Role, entitlements: Vec<CourseId>) -> CallerIdentity {
        CallerIdentity {
            id: UserId::random(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role,
            entitlements,
        }
    }

    #[rstest]
    fn entitlement_requires_membership() {
        let owned = CourseId::random();
        let identity = caller(Role::User, vec![owned]);
        assert!(identity.is_entitled_to(&owned));
        assert!(!identity.is_entitled_to(&CourseId::random()));
    }

    #[rstest]
    fn admins_are_not_implicitly_entitled() {
        let identity = caller(Role::Admin, Vec::new());
        assert!(identity.is_admin());
        assert!(!identity.is_entitled_to(&CourseId::random()));
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("user", Role::User)]
    #[case("instructor", Role::User)]
    fn parses_stored_roles(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(Role::from_stored(raw), expected);
    }

    #[rstest]
    fn author_snapshot_copies_contact_details() {
        let identity = caller(Role::User, Vec::new());
        let author = identity.as_author();
        assert_eq!(author.id, identity.id);
        assert_eq!(author.email, "ada@example.com");
    }
}
