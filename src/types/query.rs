//! Query input and result types.

use serde::{Deserialize, Serialize};

/// Names to send in one query.
///
/// A single name is sent as a one-element list; both forms produce the same
/// `name[]` parameters on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names(Vec<String>);

impl Names {
    /// Returns the names in query order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the names in query order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names(vec![name.to_string()])
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names(vec![name])
    }
}

impl From<&String> for Names {
    fn from(name: &String) -> Self {
        Names(vec![name.clone()])
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names(names)
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[String]> for Names {
    fn from(names: &[String]) -> Self {
        Names(names.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Names(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Inferred gender of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

/// Gender inference result for one name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderRecord {
    /// The queried name, as echoed by the API.
    pub name: String,

    /// Inferred gender; `None` when the API could not decide.
    #[serde(default)]
    pub gender: Option<Gender>,

    /// Confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,

    /// Number of samples backing the inference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl GenderRecord {
    /// Returns true if the API assigned a gender.
    pub fn is_determined(&self) -> bool {
        self.gender.is_some()
    }

    /// Probability as a whole percentage, truncated toward zero.
    pub fn probability_percent(&self) -> Option<u8> {
        self.probability
            .map(|p| (p.clamp(0.0, 1.0) * 100.0) as u8)
    }
}

/// Decoded response body.
///
/// The API answers a single-name query with one object and a multi-name
/// query with an array; the shape is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// One record (single-name query).
    Single(GenderRecord),
    /// Records in query order (multi-name query).
    Many(Vec<GenderRecord>),
}

impl QueryResult {
    /// Returns the records as a slice, whatever the response shape.
    pub fn records(&self) -> &[GenderRecord] {
        match self {
            QueryResult::Single(record) => std::slice::from_ref(record),
            QueryResult::Many(records) => records,
        }
    }

    /// Consumes the result and returns the records.
    pub fn into_records(self) -> Vec<GenderRecord> {
        match self {
            QueryResult::Single(record) => vec![record],
            QueryResult::Many(records) => records,
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Returns the single record, if the response was a single object.
    pub fn as_single(&self) -> Option<&GenderRecord> {
        match self {
            QueryResult::Single(record) => Some(record),
            QueryResult::Many(_) => None,
        }
    }

    /// Iterates over the records.
    pub fn iter(&self) -> impl Iterator<Item = &GenderRecord> {
        self.records().iter()
    }
}

impl IntoIterator for QueryResult {
    type Item = GenderRecord;
    type IntoIter = std::vec::IntoIter<GenderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_records().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_from_single() {
        let names = Names::from("Emily");
        assert_eq!(names.as_slice(), ["Emily".to_string()]);
    }

    #[test]
    fn test_names_from_sequences_keep_order() {
        let names = Names::from(["Emily", "Jack", "Zoë"]);
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["Emily", "Jack", "Zoë"]);

        let names = Names::from(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_record_parsing() {
        let json = r#"{"name":"Emily","gender":"female","probability":0.97,"count":1234}"#;

        let record: GenderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Emily");
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.probability, Some(0.97));
        assert_eq!(record.count, Some(1234));
        assert_eq!(record.probability_percent(), Some(97));
    }

    #[test]
    fn test_undetermined_record_parsing() {
        let json = r#"{"name":"Xqzt","gender":null}"#;

        let record: GenderRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_determined());
        assert_eq!(record.probability, None);
        assert_eq!(record.count, None);
    }

    #[test]
    fn test_record_ignores_extra_fields() {
        let json = r#"{"name":"Jack","gender":"male","probability":0.99,"count":567,"country_id":"US"}"#;

        let record: GenderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.gender, Some(Gender::Male));
    }

    #[test]
    fn test_query_result_single_object() {
        let json = r#"{"name":"Emily","gender":"female","probability":0.97,"count":1234}"#;

        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert!(matches!(result, QueryResult::Single(_)));
        assert_eq!(result.len(), 1);
        assert_eq!(result.as_single().map(|r| r.name.as_str()), Some("Emily"));
    }

    #[test]
    fn test_query_result_array_keeps_order() {
        let json = r#"[
            {"name":"Emily","gender":"female","probability":0.97,"count":1234},
            {"name":"Jack","gender":"male","probability":0.99,"count":567}
        ]"#;

        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert!(result.as_single().is_none());
        let names: Vec<_> = result.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Emily", "Jack"]);
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Male.to_string(), "male");
        assert_eq!(Gender::Female.to_string(), "female");
    }
}
