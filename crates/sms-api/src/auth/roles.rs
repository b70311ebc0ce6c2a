use serde::{Deserialize, Serialize};

/// Role claim carried in the JWT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Faculty,
    Student,
    Parent,
    /// Development/automation credential with admin-level access
    DevAuth,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Faculty => "Faculty",
            Self::Student => "Student",
            Self::Parent => "Parent",
            Self::DevAuth => "DevAuth",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Self::Admin),
            "Faculty" => Some(Self::Faculty),
            "Student" => Some(Self::Student),
            "Parent" => Some(Self::Parent),
            "DevAuth" => Some(Self::DevAuth),
            _ => None,
        }
    }
}

// Per-operation allow-lists, checked against the authenticated role claim.

/// User account management
pub const USER_ADMIN: &[Role] = &[Role::Admin, Role::DevAuth];

/// Creating/updating/removing students, faculty and parents
pub const DIRECTORY_WRITE: &[Role] = &[Role::Admin, Role::DevAuth];

/// Parent-student and faculty-student assignment management
pub const ASSIGNMENT_WRITE: &[Role] = &[Role::Admin, Role::DevAuth];

/// Recording exam performance
pub const ACADEMIC_WRITE: &[Role] = &[Role::Admin, Role::Faculty, Role::DevAuth];

/// Fee creation, payments and late fees
pub const FEE_WRITE: &[Role] = &[Role::Admin, Role::DevAuth];

/// Listings, statistics and relationship reports
pub const STAFF_READ: &[Role] = &[Role::Admin, Role::Faculty, Role::DevAuth];

/// Per-student reads available to every authenticated role
pub const ANY_ROLE: &[Role] = &[
    Role::Admin,
    Role::Faculty,
    Role::Student,
    Role::Parent,
    Role::DevAuth,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            Role::Admin,
            Role::Faculty,
            Role::Student,
            Role::Parent,
            Role::DevAuth,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("SuperUser"), None);
    }

    #[test]
    fn test_assignment_writes_are_restricted() {
        assert!(ASSIGNMENT_WRITE.contains(&Role::Admin));
        assert!(ASSIGNMENT_WRITE.contains(&Role::DevAuth));
        assert!(!ASSIGNMENT_WRITE.contains(&Role::Faculty));
        assert!(!ASSIGNMENT_WRITE.contains(&Role::Parent));
        assert!(!ASSIGNMENT_WRITE.contains(&Role::Student));
    }
}
