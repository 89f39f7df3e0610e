use crate::timestamp::Timestamp;
use crate::typed::{ConvertTimestamps, Stamp};
use crate::value::Value;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

fn ts(seconds: i64) -> Timestamp {
  Timestamp::new(seconds, 0).unwrap()
}

fn date(seconds: i64) -> DateTime<Utc> {
  DateTime::from_timestamp(seconds, 0).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
struct Dates {
  a: Timestamp,
  b: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
struct ConvertedDates {
  a: DateTime<Utc>,
  b: DateTime<Utc>,
}

impl ConvertTimestamps for Dates {
  type Output = ConvertedDates;

  fn convert_timestamps(self) -> ConvertedDates {
    ConvertedDates {
      a: self.a.convert_timestamps(),
      b: self.b.convert_timestamps(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
struct Record {
  id: String,
  dates: Dates,
  history: Vec<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
struct ConvertedRecord {
  id: String,
  dates: ConvertedDates,
  history: Vec<DateTime<Utc>>,
}

impl ConvertTimestamps for Record {
  type Output = ConvertedRecord;

  fn convert_timestamps(self) -> ConvertedRecord {
    ConvertedRecord {
      id: self.id.convert_timestamps(),
      dates: self.dates.convert_timestamps(),
      history: self.history.convert_timestamps(),
    }
  }
}

#[test]
fn test_typed_timestamp_becomes_date() {
  let converted: DateTime<Utc> = ts(100).convert_timestamps();
  assert_eq!(converted, date(100));
}

#[test]
fn test_typed_scalars_unchanged() {
  assert_eq!("id".convert_timestamps(), "id");
  assert_eq!(String::from("id").convert_timestamps(), "id");
  assert_eq!(7u8.convert_timestamps(), 7u8);
  assert!(true.convert_timestamps());
  assert_eq!(date(3).convert_timestamps(), date(3));
}

#[test]
fn test_typed_nested_struct() {
  let record = Record {
    id: "1".to_string(),
    dates: Dates { a: ts(100), b: ts(200) },
    history: vec![ts(1), ts(2)],
  };

  assert_eq!(
    record.convert_timestamps(),
    ConvertedRecord {
      id: "1".to_string(),
      dates: ConvertedDates {
        a: date(100),
        b: date(200),
      },
      history: vec![date(1), date(2)],
    }
  );
}

#[test]
fn test_typed_tuple_positions() {
  let converted: (&str, DateTime<Utc>, u32, Option<DateTime<Utc>>) =
    ("x", ts(5), 9u32, Some(ts(6))).convert_timestamps();

  assert_eq!(converted, ("x", date(5), 9, Some(date(6))));
}

#[test]
fn test_typed_containers() {
  let array: [DateTime<Utc>; 2] = [ts(1), ts(2)].convert_timestamps();
  assert_eq!(array, [date(1), date(2)]);

  let boxed: Box<DateTime<Utc>> = Box::new(ts(3)).convert_timestamps();
  assert_eq!(*boxed, date(3));

  let none: Option<DateTime<Utc>> = None::<Timestamp>.convert_timestamps();
  assert_eq!(none, None);

  let nested: Vec<Vec<DateTime<Utc>>> = vec![vec![ts(1)], vec![], vec![ts(2), ts(3)]].convert_timestamps();
  assert_eq!(nested, vec![vec![date(1)], vec![], vec![date(2), date(3)]]);
}

#[test]
fn test_typed_maps_convert_values_only() {
  let mut hash = HashMap::new();
  hash.insert("a".to_string(), ts(1));
  let hash: HashMap<String, DateTime<Utc>> = hash.convert_timestamps();
  assert_eq!(hash.get("a"), Some(&date(1)));

  let mut tree = BTreeMap::new();
  tree.insert(2i32, vec![ts(2)]);
  let tree: BTreeMap<i32, Vec<DateTime<Utc>>> = tree.convert_timestamps();
  assert_eq!(tree.get(&2), Some(&vec![date(2)]));
}

#[test]
fn test_typed_result_passes_errors_through() {
  let ok: Result<Timestamp, String> = Ok(ts(4));
  let err: Result<Timestamp, String> = Err("upstream failed".to_string());

  assert_eq!(ok.convert_timestamps(), Ok(date(4)));
  assert_eq!(err.convert_timestamps(), Err("upstream failed".to_string()));
}

#[test]
fn test_typed_value_uses_dynamic_walk() {
  let value = Value::object([("t", Value::from(ts(11)))]);

  let converted = value.convert_timestamps();
  assert_eq!(converted, Value::object([("t", Value::from(date(11)))]));
}

#[test]
fn test_typed_conversion_is_idempotent() {
  let once = vec![(ts(1), "a")].convert_timestamps();
  let twice = once.clone().convert_timestamps();

  assert_eq!(once, twice);
}

// Foreign source that refuses pre-epoch instants
#[derive(Debug, Clone, PartialEq)]
struct EpochStamp(i64);

impl crate::timestamp::TimestampLike for EpochStamp {
  fn seconds(&self) -> i64 {
    self.0
  }

  fn nanoseconds(&self) -> i32 {
    0
  }

  fn to_date(&self) -> Result<DateTime<Utc>, crate::error::ConversionError> {
    if self.0 < 0 {
      return Err(crate::error::ConversionError::Source("pre-epoch".to_string()));
    }
    Ok(date(self.0))
  }
}

#[test]
fn test_typed_foreign_source_through_stamp() {
  let converted = vec![Stamp(EpochStamp(7)), Stamp(EpochStamp(-7))].convert_timestamps();

  assert_eq!(converted, vec![Ok(date(7)), Err(EpochStamp(-7))]);
}

#[test]
fn test_typed_stamp_in_struct_position() {
  let converted: (&str, Result<DateTime<Utc>, EpochStamp>) =
    ("id", Stamp(EpochStamp(9))).convert_timestamps();

  assert_eq!(converted, ("id", Ok(date(9))));
  assert_eq!(Stamp(EpochStamp(1)).into_inner(), EpochStamp(1));
}
