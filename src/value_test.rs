use crate::timestamp::Timestamp;
use crate::value::{Method, Object, Value, ValueKind};
use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn test_falsy_values() {
  assert!(Value::Null.is_falsy());
  assert!(Value::from(false).is_falsy());
  assert!(Value::from(0).is_falsy());
  assert!(Value::from(-0.0).is_falsy());
  assert!(Value::from(f64::NAN).is_falsy());
  assert!(Value::from("").is_falsy());

  assert!(!Value::from(true).is_falsy());
  assert!(!Value::from(1).is_falsy());
  assert!(!Value::from("0").is_falsy());
  assert!(!Value::array(Vec::<Value>::new()).is_falsy());
  assert!(!Value::from(Object::new()).is_falsy());
}

#[test]
fn test_object_insert_keeps_position() {
  let mut object = Object::new().with("a", 1).with("b", 2).with("c", 3);

  let previous = object.insert("b", "two");
  assert_eq!(previous, Some(Value::from(2)));
  assert_eq!(object.len(), 3);
  assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
  assert_eq!(object.get("b"), Some(&Value::from("two")));
}

#[test]
fn test_object_from_iter_deduplicates_keys() {
  let object: Object = vec![("k", 1), ("j", 2), ("k", 3)].into_iter().collect();

  assert_eq!(object.len(), 2);
  assert_eq!(object.get("k"), Some(&Value::from(3)));
  assert_eq!(object.keys().collect::<Vec<_>>(), vec!["k", "j"]);
}

#[test]
fn test_object_lookup() {
  let object = Object::new().with("present", Value::Null);

  assert!(object.contains_key("present"));
  assert!(!object.contains_key("absent"));
  assert_eq!(object.get("present"), Some(&Value::Null));
  assert_eq!(object.get("absent"), None);
  assert!(Object::new().is_empty());
}

#[test]
fn test_value_kind() {
  assert_eq!(Value::Null.kind(), ValueKind::Null);
  assert_eq!(Value::from("s").kind(), ValueKind::String);
  assert_eq!(Value::symbol("s").kind(), ValueKind::Symbol);
  assert_eq!(Value::tuple([1, 2]).kind(), ValueKind::Tuple);
  assert_eq!(Value::array([1, 2]).kind(), ValueKind::Array);
  assert_eq!(Value::from(Utc::now()).kind(), ValueKind::Date);
  assert_eq!(Value::from(Timestamp::now()).kind(), ValueKind::Object);
}

#[test]
fn test_array_and_tuple_are_not_equal() {
  assert_ne!(Value::array([1, 2]), Value::tuple([1, 2]));
  assert_eq!(Value::array([1, 2]), Value::array([1, 2]));
}

#[test]
fn test_string_symbol_distinct() {
  assert_ne!(Value::from("name"), Value::symbol("name"));
  assert_eq!(Value::symbol("name").as_str(), Some("name"));
}

#[test]
fn test_method_equality_is_identity() {
  let method = Method::new(|_| Ok(Utc::now()));
  let other = Method::new(|_| Ok(Utc::now()));

  assert_eq!(Value::from(method.clone()), Value::from(method.clone()));
  assert_ne!(Value::from(method), Value::from(other));
}

#[test]
fn test_ptr_eq() {
  let array = Value::array([1]);

  assert!(array.ptr_eq(&array.clone()));
  assert!(!array.ptr_eq(&Value::array([1])));
  assert!(!Value::from(1).ptr_eq(&Value::from(1)));
}

#[test]
fn test_option_into_value() {
  assert_eq!(Value::from(None::<i32>), Value::Null);
  assert_eq!(Value::from(Some("x")), Value::from("x"));
}

#[test]
fn test_from_json() {
  let value = Value::from(json!({
    "id": "my id",
    "count": 3,
    "tags": ["a", null, true],
  }));

  let object = value.as_object().unwrap();
  assert_eq!(object.get("id"), Some(&Value::from("my id")));
  assert_eq!(object.get("count"), Some(&Value::from(3)));
  assert_eq!(
    object.get("tags"),
    Some(&Value::array([Value::from("a"), Value::Null, Value::from(true)]))
  );
}

#[test]
fn test_to_json_formats_dates_and_skips_methods() {
  let date = Utc.with_ymd_and_hms(2020, 5, 20, 5, 21, 58).unwrap();
  let value = Value::object([
    ("id", Value::from("a")),
    ("at", Value::from(date)),
    ("ratio", Value::from(0.5)),
    ("pair", Value::tuple([1, 2])),
    ("pending", Value::from(Timestamp::new(1, 2).unwrap())),
  ]);

  assert_eq!(
    value.to_json().unwrap(),
    json!({
      "id": "a",
      "at": "2020-05-20T05:21:58Z",
      "ratio": 0.5,
      "pair": [1, 2],
      "pending": { "seconds": 1, "nanoseconds": 2 },
    })
  );
}

#[test]
fn test_from_json_keeps_document_key_order() {
  let value = Value::from(json!({ "zeta": 1, "alpha": 2, "mid": { "z": 3, "a": 4 } }));

  let object = value.as_object().unwrap();
  assert_eq!(object.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
  let nested = object.get("mid").unwrap().as_object().unwrap();
  assert_eq!(nested.keys().collect::<Vec<_>>(), vec!["z", "a"]);
}

#[test]
fn test_from_i64_rounds_beyond_safe_integers() {
  assert_eq!(Value::from(9_007_199_254_740_991i64).as_f64(), Some(9_007_199_254_740_991.0));
  assert_eq!(
    Value::from(9_007_199_254_740_993i64),
    Value::from(9_007_199_254_740_992i64)
  );
}
