//! Subject value object: the routing label

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The subject a question is routed to.
///
/// Produced only by the intent router. Adding a subject means adding a
/// variant here, a handler, and one arm in the dispatch match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Math,
    Physics,
}

impl Subject {
    /// All subjects, in the order they are offered to the router.
    pub const ALL: [Subject; 2] = [Subject::Math, Subject::Physics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Physics => "Physics",
        }
    }

    /// Enum values for the router's structured output schema.
    pub fn schema_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Subject {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "math" => Ok(Subject::Math),
            "physics" => Ok(Subject::Physics),
            other => Err(DomainError::UnknownSubject(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subject() {
        assert_eq!("Math".parse::<Subject>().unwrap(), Subject::Math);
        assert_eq!("physics".parse::<Subject>().unwrap(), Subject::Physics);
        assert_eq!(" PHYSICS \n".parse::<Subject>().unwrap(), Subject::Physics);
    }

    #[test]
    fn test_parse_out_of_band_value() {
        let err = "Chemistry".parse::<Subject>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownSubject(_)));
        assert!("".parse::<Subject>().is_err());
    }

    #[test]
    fn test_schema_values() {
        assert_eq!(Subject::schema_values(), vec!["Math", "Physics"]);
    }
}
