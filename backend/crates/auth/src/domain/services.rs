//! Domain Services
//!
//! Role classification from the shape of an institutional identifier.
//! Pure and deterministic; input is trimmed and lower-cased first.

use crate::domain::value_object::role::Role;

/// Any address on the institute's root domain belongs to faculty.
pub const FACULTY_SUFFIX: &str = "@iiitp.ac.in";

/// Roll numbers are exactly this many ASCII digits.
pub const STUDENT_ROLL_DIGITS: usize = 9;

/// Department sub-domains that issue student addresses.
pub const STUDENT_DEPARTMENTS: [&str; 2] = ["cse", "ece"];

/// Domain following the department tag in a student address.
pub const STUDENT_DOMAIN_SUFFIX: &str = ".iiitp.ac.in";

/// Classify an identifier into a role.
///
/// Rules, in order:
/// 1. empty or blank → `Unknown`
/// 2. ends with [`FACULTY_SUFFIX`] → `Faculty`
/// 3. `<9 digits>@<cse|ece>.iiitp.ac.in`, full match → `Student`
/// 4. anything else → `Unknown`
pub fn classify(identifier: &str) -> Role {
    let normalized = identifier.trim().to_lowercase();
    classify_normalized(&normalized)
}

/// Classify an identifier that is already trimmed and lower-cased.
pub(crate) fn classify_normalized(normalized: &str) -> Role {
    if normalized.is_empty() {
        return Role::Unknown;
    }

    if normalized.ends_with(FACULTY_SUFFIX) {
        return Role::Faculty;
    }

    if is_student_address(normalized) {
        return Role::Student;
    }

    Role::Unknown
}

fn is_student_address(normalized: &str) -> bool {
    let Some((roll, domain)) = normalized.split_once('@') else {
        return false;
    };

    if roll.len() != STUDENT_ROLL_DIGITS || !roll.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let Some(department) = domain.strip_suffix(STUDENT_DOMAIN_SUFFIX) else {
        return false;
    };

    STUDENT_DEPARTMENTS.contains(&department)
}
