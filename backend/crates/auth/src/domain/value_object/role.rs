use serde::{Deserialize, Serialize};
use std::fmt;

/// Role derived from an institutional identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Faculty,
    Student,
    // Identifier matched neither shape; never allowed to sign in.
    #[default]
    Unknown,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Faculty => "faculty",
            Student => "student",
            Unknown => "unknown",
        }
    }

    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown)
    }

    #[inline]
    pub const fn is_faculty(&self) -> bool {
        matches!(self, Role::Faculty)
    }

    #[inline]
    pub const fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "faculty" => Some(Faculty),
            "student" => Some(Student),
            "unknown" => Some(Unknown),
            _ => None,
        }
    }

    /// Hint naming the two identifier shapes that sign in successfully
    #[inline]
    pub const fn accepted_identifier_shapes() -> &'static str {
        "Use faculty@iiitp.ac.in or 123456789@cse.iiitp.ac.in"
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("faculty"), Some(Role::Faculty));
        assert_eq!(Role::from_code("student"), Some(Role::Student));
        assert_eq!(Role::from_code("unknown"), Some(Role::Unknown));
        assert_eq!(Role::from_code("admin"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Faculty.to_string(), "faculty");
        assert_eq!(Role::Student.to_string(), "student");
        assert_eq!(Role::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_role_serde_codes() {
        assert_eq!(serde_json::to_string(&Role::Faculty).unwrap(), "\"faculty\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_role_checks() {
        assert!(Role::Faculty.is_known());
        assert!(Role::Student.is_known());
        assert!(!Role::Unknown.is_known());
        assert!(Role::Faculty.is_faculty());
        assert!(!Role::Student.is_faculty());
        assert!(Role::Student.is_student());
    }
}
