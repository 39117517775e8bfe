//! Normalization of shell JSON output.
//!
//! The directory shell's JSON serializer emits a bare object for a single
//! record, an array for several, and nothing at all for an empty result.
//! That shape is modeled explicitly here and normalized exactly once, at
//! the subprocess boundary.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The three shapes a shell JSON payload can take.
#[derive(Debug)]
pub enum PsOutput<T> {
    /// Empty stdout (or the shell's textual "no users found" notice).
    Empty,
    /// A single bare object.
    Single(T),
    /// An array of objects.
    Many(Vec<T>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T: DeserializeOwned> PsOutput<T> {
    /// Decode raw stdout into a normalized payload.
    pub fn parse(stdout: &str) -> Result<Self, serde_json::Error> {
        let trimmed = stdout.trim();
        if trimmed.is_empty() || trimmed.to_lowercase().starts_with("no users found") {
            return Ok(PsOutput::Empty);
        }
        Ok(match serde_json::from_str::<OneOrMany<T>>(trimmed)? {
            OneOrMany::Many(items) => PsOutput::Many(items),
            OneOrMany::One(item) => PsOutput::Single(item),
        })
    }

    /// Flatten to a list; `Empty` becomes an empty vec.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            PsOutput::Empty => Vec::new(),
            PsOutput::Single(item) => vec![item],
            PsOutput::Many(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn empty_stdout_is_empty() {
        let out: PsOutput<Value> = PsOutput::parse("   \n").unwrap();
        assert!(matches!(out, PsOutput::Empty));
        let out: PsOutput<Value> = PsOutput::parse("").unwrap();
        assert!(out.into_vec().is_empty());
    }

    #[test]
    fn textual_no_users_notice_is_empty() {
        let out: PsOutput<Value> = PsOutput::parse("No users found matching filter").unwrap();
        assert!(matches!(out, PsOutput::Empty));
    }

    #[test]
    fn bare_object_is_single() {
        let out: PsOutput<Value> = PsOutput::parse(r#"{"Name":"A"}"#).unwrap();
        assert!(matches!(out, PsOutput::Single(_)));
        assert_eq!(out.into_vec().len(), 1);
    }

    #[test]
    fn array_is_many() {
        let out: PsOutput<Value> = PsOutput::parse(r#"[{"Name":"A"},{"Name":"B"}]"#).unwrap();
        assert_eq!(out.into_vec().len(), 2);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let out: Result<PsOutput<Value>, _> = PsOutput::parse("WARNING: something");
        assert!(out.is_err());
    }
}
