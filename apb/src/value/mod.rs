//! terminal datatypes of the ActivityStreams vocabulary and their json codec
//!
//! every function here is pure: values go in, values (or a [TypeMismatch]) come out

mod duration;
pub use duration::Duration;

use std::{cmp::Ordering, collections::BTreeMap};

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::Value;

/// natural language values, keyed by BCP-47 language tag
pub type LangMap = BTreeMap<String, String>;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{value} cannot be interpreted as {datatype}")]
pub struct TypeMismatch {
	pub datatype: Datatype,
	pub value: String,
}

impl TypeMismatch {
	pub fn new(datatype: Datatype, value: &Value) -> Self {
		TypeMismatch { datatype, value: value.to_string() }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Datatype {
	String,
	LangString,
	MimeType,
	Rel,
	DateTime,
	Duration,
	Float,
	Boolean,
	NonNegativeInteger,
}

impl Datatype {
	pub fn as_str(&self) -> &'static str {
		match self {
			Datatype::String => "xsd:string",
			Datatype::LangString => "rdf:langString",
			Datatype::MimeType => "rfc2045 media type",
			Datatype::Rel => "rfc5988 link relation",
			Datatype::DateTime => "xsd:dateTime",
			Datatype::Duration => "xsd:duration",
			Datatype::Float => "xsd:float",
			Datatype::Boolean => "xsd:boolean",
			Datatype::NonNegativeInteger => "xsd:nonNegativeInteger",
		}
	}
}

impl std::fmt::Display for Datatype {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// a terminal value, tagged with the datatype it was read as
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	String(String),
	LangString(LangMap),
	MimeType(String),
	Rel(String),
	DateTime(DateTime<FixedOffset>),
	Duration(Duration),
	Float(f64),
	Boolean(bool),
	NonNegativeInteger(u64),
}

impl Scalar {
	pub fn datatype(&self) -> Datatype {
		match self {
			Scalar::String(_) => Datatype::String,
			Scalar::LangString(_) => Datatype::LangString,
			Scalar::MimeType(_) => Datatype::MimeType,
			Scalar::Rel(_) => Datatype::Rel,
			Scalar::DateTime(_) => Datatype::DateTime,
			Scalar::Duration(_) => Datatype::Duration,
			Scalar::Float(_) => Datatype::Float,
			Scalar::Boolean(_) => Datatype::Boolean,
			Scalar::NonNegativeInteger(_) => Datatype::NonNegativeInteger,
		}
	}

	pub fn deserialize(datatype: Datatype, value: &Value) -> Result<Self, TypeMismatch> {
		match datatype {
			Datatype::String => deserialize_string(value).map(Scalar::String),
			Datatype::LangString => deserialize_lang_string(value).map(Scalar::LangString),
			Datatype::MimeType => deserialize_text(Datatype::MimeType, value).map(Scalar::MimeType),
			Datatype::Rel => deserialize_text(Datatype::Rel, value).map(Scalar::Rel),
			Datatype::DateTime => deserialize_date_time(value).map(Scalar::DateTime),
			Datatype::Duration => Duration::deserialize(value).map(Scalar::Duration),
			Datatype::Float => deserialize_float(value).map(Scalar::Float),
			Datatype::Boolean => value.as_bool()
				.map(Scalar::Boolean)
				.ok_or_else(|| TypeMismatch::new(Datatype::Boolean, value)),
			Datatype::NonNegativeInteger => value.as_u64()
				.map(Scalar::NonNegativeInteger)
				.ok_or_else(|| TypeMismatch::new(Datatype::NonNegativeInteger, value)),
		}
	}

	pub fn serialize(&self) -> Result<Value, TypeMismatch> {
		Ok(match self {
			Scalar::String(x) | Scalar::MimeType(x) | Scalar::Rel(x) => Value::String(x.clone()),
			Scalar::LangString(x) => serialize_lang_string(x),
			Scalar::DateTime(x) => serialize_date_time(x),
			Scalar::Duration(x) => Value::String(x.to_string()),
			Scalar::Float(x) => serialize_float(*x)?,
			Scalar::Boolean(x) => Value::Bool(*x),
			Scalar::NonNegativeInteger(x) => Value::Number((*x).into()),
		})
	}

	/// total order: datatype first, then the datatype's own ordering
	pub fn compare(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Scalar::String(a), Scalar::String(b))
			| (Scalar::MimeType(a), Scalar::MimeType(b))
			| (Scalar::Rel(a), Scalar::Rel(b)) => a.cmp(b),
			(Scalar::LangString(a), Scalar::LangString(b)) => compare_lang_string(a, b),
			(Scalar::DateTime(a), Scalar::DateTime(b)) => compare_date_time(a, b),
			(Scalar::Duration(a), Scalar::Duration(b)) => a.compare(b),
			(Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
			(Scalar::Boolean(a), Scalar::Boolean(b)) => a.cmp(b),
			(Scalar::NonNegativeInteger(a), Scalar::NonNegativeInteger(b)) => a.cmp(b),
			(a, b) => a.datatype().cmp(&b.datatype()),
		}
	}

	pub fn less(&self, other: &Self) -> bool {
		self.compare(other) == Ordering::Less
	}
}

pub fn deserialize_string(value: &Value) -> Result<String, TypeMismatch> {
	deserialize_text(Datatype::String, value)
}

fn deserialize_text(datatype: Datatype, value: &Value) -> Result<String, TypeMismatch> {
	value.as_str()
		.map(|x| x.to_string())
		.ok_or_else(|| TypeMismatch::new(datatype, value))
}

pub fn deserialize_lang_string(value: &Value) -> Result<LangMap, TypeMismatch> {
	let Some(map) = value.as_object() else {
		return Err(TypeMismatch::new(Datatype::LangString, value));
	};
	let mut out = LangMap::new();
	for (lang, text) in map {
		let Some(text) = text.as_str() else {
			return Err(TypeMismatch::new(Datatype::LangString, value));
		};
		out.insert(lang.clone(), text.to_string());
	}
	Ok(out)
}

pub fn serialize_lang_string(map: &LangMap) -> Value {
	Value::Object(
		map.iter()
			.map(|(k, v)| (k.clone(), Value::String(v.clone())))
			.collect()
	)
}

/// sorted keys are compared pairwise (key, then value); a map which is a strict key prefix of the
/// other and agrees on all shared entries sorts first
pub fn compare_lang_string(lhs: &LangMap, rhs: &LangMap) -> Ordering {
	// BTreeMap iterates in key order already
	for ((lk, lv), (rk, rv)) in lhs.iter().zip(rhs.iter()) {
		match lk.cmp(rk).then_with(|| lv.cmp(rv)) {
			Ordering::Equal => continue,
			x => return x,
		}
	}
	lhs.len().cmp(&rhs.len())
}

pub fn less_lang_string(lhs: &LangMap, rhs: &LangMap) -> bool {
	compare_lang_string(lhs, rhs) == Ordering::Less
}

pub fn deserialize_date_time(value: &Value) -> Result<DateTime<FixedOffset>, TypeMismatch> {
	let Some(text) = value.as_str() else {
		return Err(TypeMismatch::new(Datatype::DateTime, value));
	};
	if let Ok(x) = DateTime::parse_from_rfc3339(text) {
		return Ok(x);
	}
	// some software omits seconds entirely, e.g. 2024-06-04T17:09Z
	let normalized = match text.strip_suffix('Z') {
		Some(head) => format!("{head}+00:00"),
		None => text.to_string(),
	};
	DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z")
		.map_err(|_| TypeMismatch::new(Datatype::DateTime, value))
}

pub fn serialize_date_time(value: &DateTime<FixedOffset>) -> Value {
	Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn compare_date_time(lhs: &DateTime<FixedOffset>, rhs: &DateTime<FixedOffset>) -> Ordering {
	lhs.cmp(rhs)
		.then_with(|| lhs.offset().local_minus_utc().cmp(&rhs.offset().local_minus_utc()))
}

pub fn deserialize_float(value: &Value) -> Result<f64, TypeMismatch> {
	value.as_f64().ok_or_else(|| TypeMismatch::new(Datatype::Float, value))
}

// 2^53, past this f64 stops representing every integer
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

pub fn serialize_float(value: f64) -> Result<Value, TypeMismatch> {
	// -0.0 would lose its sign as an integer
	if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT && !(value == 0.0 && value.is_sign_negative()) {
		return Ok(Value::Number((value as i64).into()));
	}
	serde_json::Number::from_f64(value)
		.map(Value::Number)
		.ok_or_else(|| TypeMismatch { datatype: Datatype::Float, value: value.to_string() })
}
