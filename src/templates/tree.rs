use minijinja::value::{Enumerator, Object, ObjectExt, ObjectRepr, Value};
use serde_json::{Number, Value as Json};
use std::sync::Arc;

/// A JSON array or object exposed to templates without converting its numbers.
///
/// Values read through attribute or index access become template values, but
/// `tojson` serializes the wrapped document itself so every number keeps the
/// exact digits it was parsed with.
#[derive(Debug)]
pub struct JsonTree(Json);

impl JsonTree {
    pub fn json(&self) -> &Json {
        &self.0
    }
}

/// Convert a parsed document into a template value.
pub fn to_template_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::from(()),
        Json::Bool(b) => Value::from(*b),
        Json::Number(n) => number_value(n),
        Json::String(s) => Value::from(s.as_str()),
        Json::Array(_) | Json::Object(_) => Value::from_object(JsonTree(json.clone())),
    }
}

fn number_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::from(i);
    }
    if let Some(u) = n.as_u64() {
        return Value::from(u);
    }
    let text = n.to_string();
    if let Ok(i) = text.parse::<i128>() {
        return Value::from(i);
    }
    if let Ok(u) = text.parse::<u128>() {
        return Value::from(u);
    }
    Value::from(n.as_f64().unwrap_or(f64::NAN))
}

impl Object for JsonTree {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        match &self.0 {
            Json::Array(_) => ObjectRepr::Seq,
            _ => ObjectRepr::Map,
        }
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match &self.0 {
            Json::Object(map) => map.get(key.as_str()?).map(to_template_value),
            Json::Array(items) => items.get(key.as_usize()?).map(to_template_value),
            _ => None,
        }
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        match &self.0 {
            Json::Array(items) => Enumerator::Seq(items.len()),
            Json::Object(_) => self.mapped_enumerator(|this| match &this.0 {
                Json::Object(map) => Box::new(map.keys().map(|k| Value::from(k.as_str()))),
                _ => Box::new(std::iter::empty()),
            }),
            _ => Enumerator::Empty,
        }
    }
}
