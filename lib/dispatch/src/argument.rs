//! Argument conventions.
//!
//! Each capability declares at registration how its raw argument text is
//! decoded. The loop looks the convention up by action name and never
//! special-cases a capability.

use crate::error::CapabilityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How one comma-separated field is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Trimmed and parsed as a floating-point number.
    Number,
    /// A `label value` fragment; only the last whitespace-delimited token is
    /// kept.
    LabeledValue,
}

/// What to do with fields beyond the declared ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraFields {
    /// The field count must match exactly.
    Reject,
    /// Surplus fields are dropped.
    Ignore,
}

/// How a capability's raw argument text becomes [`Arguments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentConvention {
    /// The raw text, unmodified, as a single text argument.
    SingleText,
    /// Split on `,` and decode positionally.
    ///
    /// Fields cannot contain commas themselves; a date or identifier with an
    /// embedded comma will be split.
    CommaPositional {
        fields: Vec<FieldKind>,
        extra: ExtraFields,
    },
}

impl ArgumentConvention {
    /// Two numbers, e.g. `60000, 15000`.
    #[must_use]
    pub fn numeric_pair() -> Self {
        Self::CommaPositional {
            fields: vec![FieldKind::Number, FieldKind::Number],
            extra: ExtraFields::Reject,
        }
    }

    /// Three `label value` fragments, e.g.
    /// `Aadhaar 123456789012, PAN ABCDE1234F, DOB 1990-05-15`.
    #[must_use]
    pub fn labeled_triple() -> Self {
        Self::CommaPositional {
            fields: vec![FieldKind::LabeledValue; 3],
            extra: ExtraFields::Ignore,
        }
    }

    /// Decodes raw argument text.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::InvalidArgument`] if the field count does not
    /// fit, a number does not parse, or a labeled fragment is empty.
    pub fn decode(&self, raw: &str) -> Result<Arguments, CapabilityError> {
        match self {
            Self::SingleText => Ok(Arguments::new(raw, vec![ArgumentValue::Text(raw.to_string())])),
            Self::CommaPositional { fields, extra } => {
                let parts: Vec<&str> = raw.split(',').collect();
                let count_ok = match extra {
                    ExtraFields::Reject => parts.len() == fields.len(),
                    ExtraFields::Ignore => parts.len() >= fields.len(),
                };
                if !count_ok {
                    return Err(CapabilityError::invalid_argument(format!(
                        "expected {} comma-separated fields, got {}",
                        fields.len(),
                        parts.len()
                    )));
                }

                let values = fields
                    .iter()
                    .zip(&parts)
                    .enumerate()
                    .map(|(index, (kind, part))| decode_field(*kind, index, part))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Arguments::new(raw, values))
            }
        }
    }
}

fn decode_field(kind: FieldKind, index: usize, field: &str) -> Result<ArgumentValue, CapabilityError> {
    match kind {
        FieldKind::Number => field
            .trim()
            .parse::<f64>()
            .map(ArgumentValue::Number)
            .map_err(|e| {
                CapabilityError::invalid_argument(format!(
                    "field {index} '{}' is not a number: {e}",
                    field.trim()
                ))
            }),
        FieldKind::LabeledValue => field
            .split_whitespace()
            .last()
            .map(|value| ArgumentValue::Text(value.to_string()))
            .ok_or_else(|| CapabilityError::invalid_argument(format!("field {index} is empty"))),
    }
}

/// One decoded argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Positional arguments handed to a capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    raw: String,
    values: Vec<ArgumentValue>,
}

impl Arguments {
    /// Creates arguments from already decoded values.
    #[must_use]
    pub fn new(raw: impl Into<String>, values: Vec<ArgumentValue>) -> Self {
        Self {
            raw: raw.into(),
            values,
        }
    }

    /// The text the values were decoded from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All values in order.
    #[must_use]
    pub fn values(&self) -> &[ArgumentValue] {
        &self.values
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The text value at `index`.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or the value is a number.
    pub fn text(&self, index: usize) -> Result<&str, CapabilityError> {
        match self.values.get(index) {
            Some(ArgumentValue::Text(text)) => Ok(text),
            Some(ArgumentValue::Number(_)) => Err(CapabilityError::invalid_argument(format!(
                "argument {index} is a number, expected text"
            ))),
            None => Err(missing(index, self.values.len())),
        }
    }

    /// The numeric value at `index`.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or the value is text.
    pub fn number(&self, index: usize) -> Result<f64, CapabilityError> {
        match self.values.get(index) {
            Some(ArgumentValue::Number(n)) => Ok(*n),
            Some(ArgumentValue::Text(_)) => Err(CapabilityError::invalid_argument(format!(
                "argument {index} is text, expected a number"
            ))),
            None => Err(missing(index, self.values.len())),
        }
    }
}

fn missing(index: usize, len: usize) -> CapabilityError {
    CapabilityError::invalid_argument(format!("argument {index} missing, only {len} given"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_text_passes_raw_through() {
        let args = ArgumentConvention::SingleText
            .decode(" ABCDE1234F, with comma ")
            .expect("decode");
        assert_eq!(args.len(), 1);
        assert_eq!(args.text(0).expect("text"), " ABCDE1234F, with comma ");
    }

    #[test]
    fn numeric_pair_parses_both_fields() {
        let args = ArgumentConvention::numeric_pair()
            .decode("60000, 15000.5")
            .expect("decode");
        assert_eq!(args.number(0).expect("n"), 60000.0);
        assert_eq!(args.number(1).expect("n"), 15000.5);
        assert_eq!(args.raw(), "60000, 15000.5");
    }

    #[test]
    fn numeric_pair_rejects_wrong_count() {
        let err = ArgumentConvention::numeric_pair().decode("60000").unwrap_err();
        assert!(err.to_string().contains("expected 2"));

        let err = ArgumentConvention::numeric_pair()
            .decode("1, 2, 3")
            .unwrap_err();
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn numeric_pair_rejects_currency_text() {
        let err = ArgumentConvention::numeric_pair()
            .decode("₹60000, 15000")
            .unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidArgument { .. }));
    }

    #[test]
    fn labeled_triple_keeps_last_token() {
        let args = ArgumentConvention::labeled_triple()
            .decode("Aadhaar 123456789012, PAN ABCDE1234F, DOB 1990-05-15")
            .expect("decode");
        assert_eq!(args.text(0).expect("t"), "123456789012");
        assert_eq!(args.text(1).expect("t"), "ABCDE1234F");
        assert_eq!(args.text(2).expect("t"), "1990-05-15");
    }

    #[test]
    fn labeled_triple_accepts_bare_values_and_multiword_labels() {
        let args = ArgumentConvention::labeled_triple()
            .decode("123456789012,PAN number ABCDE1234F,  date of birth 1990-05-15")
            .expect("decode");
        assert_eq!(args.text(0).expect("t"), "123456789012");
        assert_eq!(args.text(1).expect("t"), "ABCDE1234F");
        assert_eq!(args.text(2).expect("t"), "1990-05-15");
    }

    #[test]
    fn labeled_triple_ignores_extra_fields() {
        let args = ArgumentConvention::labeled_triple()
            .decode("A 1, B 2, C 3, D 4")
            .expect("decode");
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn labeled_triple_rejects_missing_and_empty_fields() {
        assert!(ArgumentConvention::labeled_triple().decode("A 1, B 2").is_err());
        let err = ArgumentConvention::labeled_triple()
            .decode("A 1, , C 3")
            .unwrap_err();
        assert!(err.to_string().contains("field 1 is empty"));
    }

    #[test]
    fn embedded_comma_splits_the_field() {
        // Known limitation of the comma convention.
        let args = ArgumentConvention::labeled_triple()
            .decode("Aadhaar 123456789012, PAN ABCDE1234F, DOB May 15, 1990")
            .expect("decode");
        assert_eq!(args.text(2).expect("t"), "15");
    }

    #[test]
    fn accessors_check_kind_and_range() {
        let args = Arguments::new(
            "x, 1",
            vec![
                ArgumentValue::Text("x".to_string()),
                ArgumentValue::Number(1.0),
            ],
        );
        assert!(args.number(0).is_err());
        assert!(args.text(1).is_err());
        assert!(args.text(2).unwrap_err().to_string().contains("missing"));
    }

    #[test]
    fn convention_serde_is_readable() {
        let json = serde_json::to_value(ArgumentConvention::numeric_pair()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "comma_positional": { "fields": ["number", "number"], "extra": "reject" }
            })
        );
    }

    #[test]
    fn field_kinds_are_number_and_labeled_value_only() {
        let kinds: Vec<FieldKind> =
            serde_json::from_str(r#"["number", "labeled_value"]"#).expect("deserialize");
        assert_eq!(kinds, vec![FieldKind::Number, FieldKind::LabeledValue]);
        assert!(serde_json::from_str::<FieldKind>(r#""text""#).is_err());
    }
}
