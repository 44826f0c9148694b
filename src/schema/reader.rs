use crate::domain::literal::Literal;
use crate::domain::model::Nullable;
use crate::schema::error::ValidationError;
use serde_json::{Map, Value};

pub(crate) type SchemaResult<T> = std::result::Result<T, ValidationError>;

pub(crate) fn field_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

pub(crate) fn expect_array<'a>(value: &'a Value, path: &str) -> SchemaResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::wrong_type(path, "array", value))
}

pub(crate) fn expect_number(value: &Value, path: &str) -> SchemaResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| ValidationError::wrong_type(path, "number", value))
}

/// Parses every element of an array, prefixing failures with the element index.
pub(crate) fn parse_each<T>(
    value: &Value,
    path: &str,
    parse: impl Fn(&Value, &str) -> SchemaResult<T>,
) -> SchemaResult<Vec<T>> {
    expect_array(value, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| parse(item, &index_path(path, i)))
        .collect()
}

/// Typed, path-aware access to the keys of one JSON object.
pub(crate) struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> ObjectReader<'a> {
    pub fn new(value: &'a Value, path: &str) -> SchemaResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                path: path.to_string(),
            }),
            other => Err(ValidationError::wrong_type(path, "object", other)),
        }
    }

    pub fn path_of(&self, key: &str) -> String {
        field_path(&self.path, key)
    }

    pub fn required(&self, key: &str) -> SchemaResult<&'a Value> {
        self.map
            .get(key)
            .ok_or_else(|| ValidationError::missing(self.path_of(key)))
    }

    pub fn string(&self, key: &str) -> SchemaResult<String> {
        let value = self.required(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ValidationError::wrong_type(self.path_of(key), "string", value))
    }

    /// Absent is `None`; a present key must hold a string (`null` included).
    pub fn optional_string(&self, key: &str) -> SchemaResult<Option<String>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ValidationError::wrong_type(self.path_of(key), "string", other)),
        }
    }

    /// The key must be present; its value is a string or `null`.
    pub fn nullable_string(&self, key: &str) -> SchemaResult<Nullable<String>> {
        match self.required(key)? {
            Value::Null => Ok(Nullable::Null),
            Value::String(s) => Ok(Nullable::Value(s.clone())),
            other => Err(ValidationError::wrong_type(
                self.path_of(key),
                "string or null",
                other,
            )),
        }
    }

    /// Counts from the feed are signed: downstream corrections can leave
    /// `jumlah_dirawat` below zero.
    pub fn signed(&self, key: &str) -> SchemaResult<i64> {
        let value = self.required(key)?;
        value
            .as_i64()
            .ok_or_else(|| ValidationError::wrong_type(self.path_of(key), "integer", value))
    }

    pub fn number(&self, key: &str) -> SchemaResult<f64> {
        expect_number(self.required(key)?, &self.path_of(key))
    }

    pub fn object(&self, key: &str) -> SchemaResult<ObjectReader<'a>> {
        ObjectReader::new(self.required(key)?, &self.path_of(key))
    }

    pub fn optional_object(&self, key: &str) -> SchemaResult<Option<ObjectReader<'a>>> {
        self.map
            .get(key)
            .map(|value| ObjectReader::new(value, &self.path_of(key)))
            .transpose()
    }

    pub fn array<T>(
        &self,
        key: &str,
        parse: impl Fn(&Value, &str) -> SchemaResult<T>,
    ) -> SchemaResult<Vec<T>> {
        parse_each(self.required(key)?, &self.path_of(key), parse)
    }

    pub fn literal<E: Literal>(&self, key: &str) -> SchemaResult<E> {
        let raw = self.string(key)?;
        E::from_literal(&raw)
            .ok_or_else(|| ValidationError::not_in_enumeration(self.path_of(key), &raw, &E::literals()))
    }

    pub fn optional_literal<E: Literal>(&self, key: &str) -> SchemaResult<Option<E>> {
        match self.optional_string(key)? {
            None => Ok(None),
            Some(raw) => E::from_literal(&raw).map(Some).ok_or_else(|| {
                ValidationError::not_in_enumeration(self.path_of(key), &raw, &E::literals())
            }),
        }
    }

    /// A discriminator that must equal `expected` exactly.
    pub fn tag(&self, key: &str, expected: &str) -> SchemaResult<()> {
        let raw = self.string(key)?;
        if raw == expected {
            Ok(())
        } else {
            Err(ValidationError::wrong_tag(self.path_of(key), expected, &raw))
        }
    }

    /// Like [`literal`](Self::literal) but reports a mismatch as a wrong tag,
    /// for single-member sets that act as constants.
    pub fn constant<E: Literal>(&self, key: &str) -> SchemaResult<E> {
        let raw = self.string(key)?;
        E::from_literal(&raw).ok_or_else(|| {
            let expected = E::literals().join("|");
            ValidationError::wrong_tag(self.path_of(key), &expected, &raw)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::error::ValidationReason;
    use serde_json::json;

    #[test]
    fn test_optional_vs_nullable() {
        let raw = json!({ "a": null, "b": "x" });
        let reader = ObjectReader::new(&raw, "$").unwrap();

        assert_eq!(reader.optional_string("missing").unwrap(), None);
        assert_eq!(reader.optional_string("b").unwrap(), Some("x".to_string()));
        assert_eq!(
            reader.optional_string("a").unwrap_err().reason,
            ValidationReason::WrongType
        );

        assert!(reader.nullable_string("a").unwrap().is_null());
        assert_eq!(
            reader.nullable_string("missing").unwrap_err().reason,
            ValidationReason::Missing
        );
    }

    #[test]
    fn test_integers_reject_fractions_and_strings() {
        let raw = json!({ "n": 3, "f": 3.5, "s": "3", "neg": -1 });
        let reader = ObjectReader::new(&raw, "$").unwrap();

        assert_eq!(reader.signed("n").unwrap(), 3);
        assert_eq!(reader.signed("neg").unwrap(), -1);
        assert!(reader.signed("s").is_err());
        assert_eq!(reader.number("n").unwrap(), 3.0);

        let err = reader.signed("f").unwrap_err();
        assert_eq!(err.reason, ValidationReason::WrongType);
        assert_eq!(err.detail, "expected integer, found number");
    }

    #[test]
    fn test_array_errors_carry_index() {
        let raw = json!({ "xs": [1, 2, "three"] });
        let reader = ObjectReader::new(&raw, "$").unwrap();

        let err = reader.array("xs", expect_number).unwrap_err();
        assert_eq!(err.path, "$.xs[2]");
        assert_eq!(err.reason, ValidationReason::WrongType);
    }
}
