//! Shared helpers for reading the dynamic response values the transport
//! produces (xmltodict-style `serde_json::Value` trees with prefixed keys
//! such as `a:Barkod`).

use crate::error::PttError;
use serde_json::Value;

/// Failure policy for scalar coercion.
///
/// `Lenient` substitutes a documented default (0, 0.0, false, "") for any
/// missing or uncoercible field so a single malformed field cannot discard a
/// record. `Strict` still defaults missing fields but turns an uncoercible
/// value into a `PttError::Parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Lenient,
    Strict,
}

/// Normalize the absent/single-object/sequence shapes the upstream service
/// produces for every repeated element.
pub fn normalize_to_sequence(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Field reader over one decoded record.
pub struct FieldMap<'a> {
    record: &'a Value,
    mode: ParseMode,
}

impl<'a> FieldMap<'a> {
    pub fn new(record: &'a Value, mode: ParseMode) -> Self {
        FieldMap { record, mode }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.record.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// String field; missing or non-textual values become `""`.
    pub fn string(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// String field that distinguishes "absent" from "empty".
    pub fn opt_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn f64(&self, key: &str) -> Result<f64, PttError> {
        match self.get(key) {
            None => Ok(0.0),
            Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(parsed) => Ok(parsed),
                Err(_) => self.coercion_failure(key, s, 0.0),
            },
            Some(other) => self.coercion_failure(key, other, 0.0),
        }
    }

    pub fn i64(&self, key: &str) -> Result<i64, PttError> {
        match self.get(key) {
            None => Ok(0),
            Some(Value::Number(n)) => Ok(n.as_i64().unwrap_or(0)),
            Some(Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(parsed) => Ok(parsed),
                Err(_) => self.coercion_failure(key, s, 0),
            },
            Some(other) => self.coercion_failure(key, other, 0),
        }
    }

    /// Boolean field; upstream encodes booleans as the literals
    /// `"true"`/`"false"`. Anything else is `false`, in both modes.
    pub fn bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn coercion_failure<T, V: std::fmt::Debug>(
        &self,
        key: &str,
        value: V,
        default: T,
    ) -> Result<T, PttError> {
        match self.mode {
            ParseMode::Lenient => Ok(default),
            ParseMode::Strict => Err(PttError::Parse(format!(
                "field {key} has uncoercible value {value:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_handles_all_shapes() {
        assert!(normalize_to_sequence(None).is_empty());
        assert!(normalize_to_sequence(Some(&Value::Null)).is_empty());

        let single = json!({"a:Barkod": "x"});
        assert_eq!(normalize_to_sequence(Some(&single)).len(), 1);

        let many = json!([{"a:Barkod": "x"}, {"a:Barkod": "y"}]);
        assert_eq!(normalize_to_sequence(Some(&many)).len(), 2);
    }

    #[test]
    fn lenient_mode_defaults_bad_values() {
        let record = json!({"a:Agirlik": "not-a-number", "a:Miktar": {"nested": true}});
        let fields = FieldMap::new(&record, ParseMode::Lenient);
        assert_eq!(fields.f64("a:Agirlik").unwrap(), 0.0);
        assert_eq!(fields.i64("a:Miktar").unwrap(), 0);
    }

    #[test]
    fn strict_mode_rejects_bad_values_but_defaults_missing() {
        let record = json!({"a:Agirlik": "not-a-number"});
        let fields = FieldMap::new(&record, ParseMode::Strict);
        assert!(matches!(fields.f64("a:Agirlik"), Err(PttError::Parse(_))));
        assert_eq!(fields.f64("a:Desi").unwrap(), 0.0);
    }

    #[test]
    fn bool_matches_upstream_literals() {
        let record = json!({"a:Aktif": "true", "a:Mevcut": "False", "a:SingleBox": true});
        let fields = FieldMap::new(&record, ParseMode::Strict);
        assert!(fields.bool("a:Aktif"));
        assert!(!fields.bool("a:Mevcut"));
        assert!(fields.bool("a:SingleBox"));
        assert!(!fields.bool("a:Yok"));
    }

    #[test]
    fn strings_never_fail() {
        let record = json!({"a:UrunAdi": "Kahve", "a:UrunId": 42, "a:Durum": null});
        let fields = FieldMap::new(&record, ParseMode::Strict);
        assert_eq!(fields.string("a:UrunAdi"), "Kahve");
        assert_eq!(fields.string("a:UrunId"), "42");
        assert_eq!(fields.string("a:Durum"), "");
        assert_eq!(fields.opt_string("a:Durum"), None);
    }
}
