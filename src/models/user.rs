use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::UserInput;
use crate::repositories::StoreError;

/// Every field of a user document except its identifier.
///
/// Fields the API does not know about are kept in `extra` and written
/// through to the collection unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(flatten)]
    pub extra: Document,
}

/// User document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: UserFields,
}

/// Changes submitted by an update: fields to set and fields to remove.
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub set: UserFields,
    pub unset: Vec<&'static str>,
}

impl UserChanges {
    /// The `$set`/`$unset` update document for these changes.
    pub fn to_update_document(&self) -> Result<Document, StoreError> {
        let mut update = doc! { "$set": bson::to_document(&self.set)? };
        if !self.unset.is_empty() {
            let unset: Document = self
                .unset
                .iter()
                .map(|key| (key.to_string(), Bson::from("")))
                .collect();
            update.insert("$unset", unset);
        }
        Ok(update)
    }
}

impl User {
    /// Apply `$set`/`$unset`-style changes: every submitted field replaces the
    /// stored one, cleared fields are removed, the rest is left alone.
    pub fn apply(&mut self, changes: UserChanges) {
        let set = changes.set;
        self.fields.name = set.name;
        self.fields.email = set.email;
        if set.age.is_some() {
            self.fields.age = set.age;
        }
        for (key, value) in set.extra {
            self.fields.extra.insert(key, value);
        }
        for key in changes.unset {
            match key {
                "age" => self.fields.age = None,
                other => {
                    self.fields.extra.remove(other);
                }
            }
        }
    }
}

impl TryFrom<UserInput> for UserChanges {
    type Error = StoreError;

    fn try_from(input: UserInput) -> Result<Self, Self::Error> {
        let mut unset = Vec::new();
        let age = match input.age {
            Some(value) => {
                let age = cast_number("age", &value)?;
                if age.is_none() {
                    unset.push("age");
                }
                age
            }
            None => None,
        };

        let mut extra: Map<String, Value> = input.extra;
        // The identifier is assigned by the store and never taken from a body.
        extra.remove("_id");
        let extra: Map<String, Value> = extra
            .into_iter()
            .map(|(key, value)| (key, widen_oversized_integers(value)))
            .collect();

        Ok(Self {
            set: UserFields {
                name: input.name,
                email: input.email,
                age,
                extra: bson::to_document(&extra)?,
            },
            unset,
        })
    }
}

impl TryFrom<UserInput> for UserFields {
    type Error = StoreError;

    /// Fields for a new document; a cleared age is simply left out.
    fn try_from(input: UserInput) -> Result<Self, Self::Error> {
        UserChanges::try_from(input).map(|changes| changes.set)
    }
}

/// BSON has no unsigned 64-bit integer; integers above `i64::MAX` are stored
/// as doubles instead of failing to encode.
fn widen_oversized_integers(value: Value) -> Value {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_some() => n
            .as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Number(n), Value::Number),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(widen_oversized_integers).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, widen_oversized_integers(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Cast a JSON value to a number the way the store does for numeric paths:
/// numbers pass through, numeric strings and booleans are converted, empty
/// strings and null clear the field.
fn cast_number(path: &'static str, value: &Value) -> Result<Option<f64>, StoreError> {
    let cast_error = || StoreError::Cast {
        kind: "Number",
        path,
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        value_type: json_type_name(value),
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(cast_error),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(cast_error()),
        },
        Value::Array(_) | Value::Object(_) => Err(cast_error()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Render the extra attributes of a stored user as plain JSON.
pub(crate) fn extra_to_json(extra: Document) -> Map<String, Value> {
    match Bson::Document(extra).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(age: Option<Value>, extra: Value) -> UserInput {
        UserInput {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            age,
            extra: match extra {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    #[test]
    fn numeric_ages_are_kept() {
        let fields = UserFields::try_from(input(Some(json!(30)), json!({}))).unwrap();
        assert_eq!(fields.age, Some(30.0));
    }

    #[test]
    fn numeric_strings_are_cast() {
        let fields = UserFields::try_from(input(Some(json!(" 42 ")), json!({}))).unwrap();
        assert_eq!(fields.age, Some(42.0));
    }

    #[test]
    fn empty_string_clears_age() {
        let fields = UserFields::try_from(input(Some(json!("")), json!({}))).unwrap();
        assert_eq!(fields.age, None);
    }

    #[test]
    fn non_numeric_age_is_a_cast_error() {
        let err = UserFields::try_from(input(Some(json!("thirty")), json!({}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cast to Number failed for value \"thirty\" (type string) at path \"age\""
        );
    }

    #[test]
    fn object_age_is_a_cast_error() {
        let err = UserFields::try_from(input(Some(json!({ "years": 3 })), json!({}))).unwrap_err();
        assert!(matches!(err, StoreError::Cast { value_type: "Object", .. }));
    }

    #[test]
    fn client_supplied_id_is_dropped() {
        let fields = UserFields::try_from(input(
            None,
            json!({ "_id": "507f1f77bcf86cd799439011", "role": "admin" }),
        ))
        .unwrap();
        assert_eq!(fields.extra, doc! { "role": "admin" });
    }

    #[test]
    fn apply_replaces_submitted_fields_only() {
        let mut user = User {
            id: ObjectId::new(),
            fields: UserFields {
                name: "Old".to_string(),
                email: "old@example.com".to_string(),
                age: Some(20.0),
                extra: doc! { "city": "Oslo", "team": "red" },
            },
        };
        let id = user.id;

        user.apply(UserChanges {
            set: UserFields {
                name: "New".to_string(),
                email: "new@example.com".to_string(),
                age: None,
                extra: doc! { "team": "blue" },
            },
            unset: Vec::new(),
        });

        assert_eq!(user.id, id);
        assert_eq!(user.fields.name, "New");
        assert_eq!(user.fields.email, "new@example.com");
        assert_eq!(user.fields.age, Some(20.0));
        assert_eq!(user.fields.extra, doc! { "city": "Oslo", "team": "blue" });
    }

    #[test]
    fn null_or_empty_age_is_unset_on_update() {
        for cleared in [json!(null), json!("")] {
            let changes = UserChanges::try_from(input(Some(cleared), json!({}))).unwrap();
            assert_eq!(changes.set.age, None);
            assert_eq!(changes.unset, vec!["age"]);
        }

        let changes = UserChanges::try_from(input(None, json!({}))).unwrap();
        assert!(changes.unset.is_empty());
    }

    #[test]
    fn apply_removes_unset_age() {
        let mut user = User {
            id: ObjectId::new(),
            fields: UserFields {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                age: Some(30.0),
                extra: Document::new(),
            },
        };
        let changes = UserChanges::try_from(input(Some(json!(null)), json!({}))).unwrap();

        user.apply(changes);

        assert_eq!(user.fields.age, None);
    }

    #[test]
    fn update_document_sets_fields_and_unsets_cleared_ones() {
        let changes = UserChanges::try_from(input(Some(json!("")), json!({ "city": "Rome" }))).unwrap();
        let update = changes.to_update_document().unwrap();

        assert_eq!(
            update,
            doc! {
                "$set": { "name": "John Doe", "email": "john@example.com", "city": "Rome" },
                "$unset": { "age": "" },
            }
        );
    }

    #[test]
    fn integers_beyond_i64_are_stored_as_doubles() {
        let fields = UserFields::try_from(input(
            None,
            json!({ "big": 18446744073709551615u64, "nested": { "big": [18446744073709551615u64] }, "small": 5 }),
        ))
        .unwrap();

        assert_eq!(fields.extra.get_f64("big").unwrap(), 18446744073709551615u64 as f64);
        assert_eq!(fields.extra.get_i64("small").unwrap(), 5);
        let nested = fields.extra.get_document("nested").unwrap();
        assert_eq!(
            nested.get_array("big").unwrap()[0],
            Bson::Double(18446744073709551615u64 as f64)
        );
    }

    #[test]
    fn stored_documents_round_trip_through_bson() {
        let user = User {
            id: ObjectId::new(),
            fields: UserFields {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                age: None,
                extra: doc! { "tags": ["a", "b"] },
            },
        };
        let document = bson::to_document(&user).unwrap();
        assert_eq!(document.get_object_id("_id").unwrap(), user.id);
        assert!(!document.contains_key("age"));

        let decoded: User = bson::from_document(document).unwrap();
        assert_eq!(decoded, user);
    }
}
