use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use super::{Item, StoreError};

pub fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(item_to_attributes(map)),
    }
}

pub fn item_to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter().map(|(k, v)| (k, to_attribute(v))).collect()
}

pub fn from_attribute(attribute: AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => Value::Number(parse_number(&n)?),
        AttributeValue::L(values) => Value::Array(
            values
                .into_iter()
                .map(from_attribute)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(attributes_to_item(map)?),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        other => {
            return Err(StoreError::Malformed(format!(
                "unsupported attribute type: {other:?}"
            )))
        }
    };
    Ok(value)
}

pub fn attributes_to_item(attributes: HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    let mut item = Map::with_capacity(attributes.len());
    for (name, attribute) in attributes {
        item.insert(name, from_attribute(attribute)?);
    }
    Ok(item)
}

fn parse_number(raw: &str) -> Result<Number, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::Malformed(format!("invalid number attribute: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_document_survives_conversion() {
        let item = json!({
            "productId": "1700000000000",
            "price": 19.99,
            "stock": 3,
            "tags": ["milk", "fresh"],
            "meta": { "featured": true, "note": null }
        });
        let Value::Object(item) = item else { unreachable!() };

        let back = attributes_to_item(item_to_attributes(item.clone())).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn numbers_are_sent_as_decimal_strings() {
        assert_eq!(to_attribute(json!(42)), AttributeValue::N("42".to_string()));
        assert_eq!(to_attribute(json!(2.5)), AttributeValue::N("2.5".to_string()));
    }

    #[test]
    fn string_sets_become_arrays() {
        let value = from_attribute(AttributeValue::Ss(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(value, json!(["a", "b"]));
    }

    #[test]
    fn garbage_number_is_malformed() {
        let err = from_attribute(AttributeValue::N("12abc".to_string())).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
