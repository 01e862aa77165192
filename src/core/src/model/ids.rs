//! Strongly-typed identifiers for idea box records.
//!
//! The API uses integer primary keys everywhere; wrapping them keeps a role id
//! from being passed where a permission id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Role identifier.
    RoleId
);
define_id!(
    /// Permission identifier.
    PermissionId
);
define_id!(
    /// Department identifier.
    DepartmentId
);
define_id!(
    /// Idea category identifier.
    CategoryId
);
define_id!(
    /// Idea identifier.
    IdeaId
);
define_id!(
    /// Comment identifier.
    CommentId
);
define_id!(
    /// User identifier.
    UserId
);

/// Join ids into the comma-separated form the API expects in multipart bodies.
///
/// `[1, 2, 3]` becomes `"1,2,3"`; an empty slice becomes `""`.
pub fn join_ids<T: fmt::Display>(ids: &[T]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[RoleId(1), RoleId(2), RoleId(10)]), "1,2,10");
        assert_eq!(join_ids::<RoleId>(&[]), "");
        assert_eq!(join_ids(&[PermissionId(7)]), "7");
    }

    #[test]
    fn test_parse_and_display() {
        let id: DepartmentId = " 12 ".parse().unwrap();
        assert_eq!(id, DepartmentId(12));
        assert_eq!(id.to_string(), "12");
        assert!("abc".parse::<DepartmentId>().is_err());
    }

    #[test]
    fn test_transparent_serde() {
        let json = serde_json::to_string(&IdeaId(5)).unwrap();
        assert_eq!(json, "5");
        let id: IdeaId = serde_json::from_str("9").unwrap();
        assert_eq!(id, IdeaId(9));
    }
}
