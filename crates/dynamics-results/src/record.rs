//! Backend result records and their transformation into answer sets.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::answers::{AnswerEntry, AnswerSet, FIELD_TABLE};
use crate::error::ResultsResult;

/// A stored result as the backend returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d1: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d2: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d3: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d4: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d5: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d6: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d7: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d8: Option<i64>,

    /// Whether this is a baseline (starting point) quiz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_start: Option<bool>,

    /// Stored as a string or a number by the backend; numbers are kept as
    /// their decimal text.
    #[serde(
        default,
        deserialize_with = "code_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub result_code: Option<String>,
}

fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(code)) => Ok(Some(code)),
        Some(Value::Number(code)) => Ok(Some(code.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number result code, got {}",
            other
        ))),
    }
}

impl ResultRecord {
    /// Value of a backend field by name; `None` for absent or unknown fields.
    pub fn field(&self, name: &str) -> Option<i64> {
        match name {
            "d1" => self.d1,
            "d2" => self.d2,
            "d3" => self.d3,
            "d4" => self.d4,
            "d5" => self.d5,
            "d6" => self.d6,
            "d7" => self.d7,
            "d8" => self.d8,
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Option<i64>> {
        match name {
            "d1" => Some(&mut self.d1),
            "d2" => Some(&mut self.d2),
            "d3" => Some(&mut self.d3),
            "d4" => Some(&mut self.d4),
            "d5" => Some(&mut self.d5),
            "d6" => Some(&mut self.d6),
            "d7" => Some(&mut self.d7),
            "d8" => Some(&mut self.d8),
            _ => None,
        }
    }

    /// Record fields for an answer set; the lookup view decides each value.
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let mut record = Self::default();
        for (name, key) in FIELD_TABLE {
            if let Some(slot) = record.field_mut(name) {
                *slot = answers.get(key).map(i64::from);
            }
        }
        record
    }

    /// Backend fields with no value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        FIELD_TABLE
            .iter()
            .filter(|(name, _)| self.field(name).is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// A record mapped onto display keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedResult {
    #[serde(flatten)]
    pub answers: AnswerSet,
    pub is_start: Option<bool>,
}

/// Map a backend record onto display keys.
///
/// `None` in, `None` out. Present fields become entries in table order;
/// absent fields are left out of the entry list and show up as `None` in
/// the lookup. A present value outside `1..=5` is a validation error.
pub fn transform_record(record: Option<&ResultRecord>) -> ResultsResult<Option<TransformedResult>> {
    let Some(record) = record else {
        return Ok(None);
    };

    let missing = record.missing_fields();
    if !missing.is_empty() {
        warn!(
            result_code = ?record.result_code,
            missing = ?missing,
            "result record lacks answer fields"
        );
    }

    let entries = FIELD_TABLE
        .iter()
        .filter_map(|(name, key)| record.field(name).map(|value| AnswerEntry::new(*key, value)))
        .collect::<ResultsResult<Vec<_>>>()?;

    Ok(Some(TransformedResult {
        answers: AnswerSet::from_entries(entries).with_absent_keys(),
        is_start: record.is_start,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{parse_answer_string, AnswerKey};
    use crate::error::ResultsError;

    #[test]
    fn test_transform_partial_record() {
        let record: ResultRecord =
            serde_json::from_str(r#"{"d1": 1, "d3": 2, "isStart": true}"#).unwrap();
        let result = transform_record(Some(&record)).unwrap().unwrap();

        assert_eq!(
            result.answers.entries(),
            &[
                AnswerEntry {
                    key: AnswerKey::A,
                    value: 1
                },
                AnswerEntry {
                    key: AnswerKey::C,
                    value: 2
                },
            ]
        );
        assert_eq!(result.is_start, Some(true));
        assert_eq!(result.answers.object().len(), 8);
        assert_eq!(result.answers.get(AnswerKey::B), None);
    }

    #[test]
    fn test_transform_absent_record() {
        assert_eq!(transform_record(None).unwrap(), None);
    }

    #[test]
    fn test_transform_full_record() {
        let record: ResultRecord = serde_json::from_str(
            r#"{"d1":1,"d2":2,"d3":3,"d4":4,"d5":5,"d6":1,"d7":2,"d8":3,"isStart":false,"resultCode":"123456","id":7}"#,
        )
        .unwrap();
        let result = transform_record(Some(&record)).unwrap().unwrap();

        assert_eq!(result.answers.len(), 8);
        assert!(result.answers.is_complete());
        assert_eq!(result.is_start, Some(false));
        assert_eq!(record.result_code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_numeric_result_code() {
        let record: ResultRecord =
            serde_json::from_str(r#"{"d1": 1, "resultCode": 123456}"#).unwrap();
        assert_eq!(record.result_code.as_deref(), Some("123456"));

        let record: ResultRecord = serde_json::from_str(r#"{"resultCode": null}"#).unwrap();
        assert_eq!(record.result_code, None);
    }

    #[test]
    fn test_result_code_rejects_other_types() {
        let err = serde_json::from_str::<ResultRecord>(r#"{"resultCode": [1]}"#).unwrap_err();
        assert!(err.to_string().contains("string or number result code"));
    }

    #[test]
    fn test_transform_without_is_start() {
        let record = ResultRecord {
            d2: Some(5),
            ..Default::default()
        };
        let result = transform_record(Some(&record)).unwrap().unwrap();
        assert_eq!(result.is_start, None);
    }

    #[test]
    fn test_transform_rejects_out_of_range() {
        let record = ResultRecord {
            d1: Some(1),
            d4: Some(9),
            ..Default::default()
        };
        let err = transform_record(Some(&record)).unwrap_err();
        assert!(matches!(err, ResultsError::Validation { .. }));
        assert!(err.to_string().contains("answer D"));
    }

    #[test]
    fn test_from_answers_round_trip() {
        let answers = parse_answer_string("h3g2f1e5d4c3b2a1").unwrap();
        let record = ResultRecord::from_answers(&answers);

        assert_eq!(record.d1, Some(1));
        assert_eq!(record.d8, Some(3));
        assert!(record.missing_fields().is_empty());

        let back = transform_record(Some(&record)).unwrap().unwrap();
        assert_eq!(back.answers.object(), answers.object());
    }

    #[test]
    fn test_serialized_shape() {
        let record = ResultRecord {
            d1: Some(1),
            is_start: Some(true),
            ..Default::default()
        };
        let result = transform_record(Some(&record)).unwrap().unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["answers"][0]["key"], "A");
        assert_eq!(json["object"]["A"], 1);
        assert!(json["object"]["B"].is_null());
        assert_eq!(json["isStart"], true);
    }
}
