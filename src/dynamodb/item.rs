use aws_sdk_dynamodb::types::AttributeValue;
use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Store-native representation of an item, as the SDK sends and receives it.
pub type Attributes = HashMap<String, AttributeValue>;

/// 2^63 and 2^64, the exclusive upper bounds of `i64` and `u64` as floats.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A dynamically typed attribute value.
///
/// Values are inferred structurally: whatever JSON shape arrives in a request
/// body maps onto one of these variants, and each variant maps onto exactly one
/// DynamoDB attribute type when the item is written:
///
/// | Variant  | DynamoDB |
/// |----------|----------|
/// | `Null`   | `NULL`   |
/// | `Bool`   | `BOOL`   |
/// | `Number` | `N`      |
/// | `String` | `S`      |
/// | `List`   | `L`      |
/// | `Map`    | `M`      |
///
/// Reading an item back also accepts string and number sets, which come out as
/// lists. Binary attributes have no JSON counterpart and are rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Converts the value into a single store attribute.
    pub fn to_attribute_value(&self) -> Result<AttributeValue, serde_dynamo::Error> {
        serde_dynamo::to_attribute_value(self)
    }

    /// Whether the value can be used as a primary key (string or number).
    pub fn is_key_scalar(&self) -> bool {
        matches!(self, Value::String(_) | Value::Number(_))
    }

    /// Integral floats that fit a 64-bit integer become that integer, since
    /// the store writes them back as plain digits.
    fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() && value.fract() == 0.0 {
            if (-I64_LIMIT..I64_LIMIT).contains(&value) {
                return Some(Value::Number((value as i64).into()));
            }
            if (0.0..U64_LIMIT).contains(&value) {
                return Some(Value::Number((value as u64).into()));
            }
        }
        serde_json::Number::from_f64(value).map(Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(list) => serializer.collect_seq(list),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean, null, list or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Value::from_f64(v).ok_or_else(|| E::custom(format!("number {v} is not finite")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            list.push(value);
        }
        Ok(Value::List(list))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

/// A schema-free DynamoDB item.
///
/// In DynamoDB, an item is a collection of attributes, each with a name and a value.
/// Apart from the table's primary key, items in the same table may carry
/// completely different attributes, so `Item` imposes no schema of its own:
/// any JSON object decodes into one, and any item read from the store (save
/// binary attributes) converts back.
///
/// # Example
///
/// ```ignore
/// let item = Item::new()
///     .set_string("passport_id", "X123")
///     .set_string("name", "Ana")
///     .set_number("age", 30);
/// let attributes = item.to_attributes()?;
/// ```
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    attributes: BTreeMap<String, Value>,
}

impl Item {
    /// Creates a new empty `Item`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON object into an item.
    ///
    /// Fails when the bytes are not JSON or the JSON is not an object.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Converts the item into the attribute map the SDK expects.
    pub fn to_attributes(&self) -> Result<Attributes, serde_dynamo::Error> {
        serde_dynamo::to_item(self)
    }

    /// Converts an attribute map read from the store back into an item.
    pub fn from_attributes(attributes: Attributes) -> Result<Self, serde_dynamo::Error> {
        serde_dynamo::from_item(attributes)
    }

    /// Sets an attribute of any type.
    #[cfg(test)]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets a string attribute.
    #[cfg(test)]
    pub fn set_string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, Value::String(value.into()))
    }

    /// Sets a number attribute.
    #[cfg(test)]
    pub fn set_number(self, key: impl Into<String>, value: i64) -> Self {
        self.set(key, value)
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Gets the value of an attribute as a string.
    ///
    /// Returns `None` if the attribute doesn't exist or is not a string.
    #[cfg(test)]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
