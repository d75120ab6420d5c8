use std::{cmp::Ordering, fmt::Write};

use serde_json::Value;

use super::{Datatype, TypeMismatch};

/// xsd:duration kept as its lexical components, so that `P1M` stays `P1M` and is never
/// flattened into a number of days
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Duration {
	pub negative: bool,
	pub years: u64,
	pub months: u64,
	pub days: u64,
	pub hours: u64,
	pub minutes: u64,
	pub seconds: f64,
}

const MINUTE: f64 = 60.;
const HOUR: f64 = 60. * MINUTE;
const DAY: f64 = 24. * HOUR;
// calendar units have no fixed length, these only serve ordering
const MONTH: f64 = 30. * DAY;
const YEAR: f64 = 365. * DAY;

impl Duration {
	pub fn parse(text: &str) -> Option<Self> {
		let mut out = Duration::default();
		let mut rest = text;
		if let Some(x) = rest.strip_prefix('-') {
			out.negative = true;
			rest = x;
		}
		rest = rest.strip_prefix('P')?;
		if rest.is_empty() {
			return None;
		}

		let (date, time) = match rest.split_once('T') {
			Some((_, "")) => return None,
			Some((d, t)) => (d, Some(t)),
			None => (rest, None),
		};

		let mut any = false;
		let mut buf = date;
		for (unit, slot) in [('Y', &mut out.years), ('M', &mut out.months), ('D', &mut out.days)] {
			if let Some((n, tail)) = buf.split_once(unit) {
				if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
					return None;
				}
				*slot = n.parse().ok()?;
				buf = tail;
				any = true;
			}
		}
		if !buf.is_empty() {
			return None;
		}

		if let Some(time) = time {
			let mut buf = time;
			for (unit, slot) in [('H', &mut out.hours), ('M', &mut out.minutes)] {
				if let Some((n, tail)) = buf.split_once(unit) {
					if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
						return None;
					}
					*slot = n.parse().ok()?;
					buf = tail;
					any = true;
				}
			}
			if let Some(n) = buf.strip_suffix('S') {
				if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
					return None;
				}
				out.seconds = n.parse().ok()?;
				buf = "";
				any = true;
			}
			if !buf.is_empty() {
				return None;
			}
		}

		if any { Some(out) } else { None }
	}

	pub fn deserialize(value: &Value) -> Result<Self, TypeMismatch> {
		value.as_str()
			.and_then(Duration::parse)
			.ok_or_else(|| TypeMismatch::new(Datatype::Duration, value))
	}

	/// approximate length in seconds, months counted as 30 days and years as 365
	pub fn approximate_seconds(&self) -> f64 {
		let x = self.years as f64 * YEAR
			+ self.months as f64 * MONTH
			+ self.days as f64 * DAY
			+ self.hours as f64 * HOUR
			+ self.minutes as f64 * MINUTE
			+ self.seconds;
		if self.negative { -x } else { x }
	}

	pub fn to_time_delta(&self) -> Option<chrono::TimeDelta> {
		let millis = self.approximate_seconds() * 1000.;
		if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
			return None;
		}
		Some(chrono::TimeDelta::milliseconds(millis as i64))
	}

	pub fn compare(&self, other: &Self) -> Ordering {
		self.approximate_seconds().total_cmp(&other.approximate_seconds())
			.then_with(|| self.negative.cmp(&other.negative))
			.then_with(|| self.years.cmp(&other.years))
			.then_with(|| self.months.cmp(&other.months))
			.then_with(|| self.days.cmp(&other.days))
			.then_with(|| self.hours.cmp(&other.hours))
			.then_with(|| self.minutes.cmp(&other.minutes))
			.then_with(|| self.seconds.total_cmp(&other.seconds))
	}
}

impl std::fmt::Display for Duration {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut out = String::new();
		if self.negative {
			out.push('-');
		}
		out.push('P');
		if self.years > 0 { write!(out, "{}Y", self.years)?; }
		if self.months > 0 { write!(out, "{}M", self.months)?; }
		if self.days > 0 { write!(out, "{}D", self.days)?; }
		if self.hours > 0 || self.minutes > 0 || self.seconds > 0. {
			out.push('T');
			if self.hours > 0 { write!(out, "{}H", self.hours)?; }
			if self.minutes > 0 { write!(out, "{}M", self.minutes)?; }
			if self.seconds > 0. { write!(out, "{}S", self.seconds)?; }
		}
		if out.ends_with('P') {
			out.push_str("T0S");
		}
		f.write_str(&out)
	}
}

impl std::str::FromStr for Duration {
	type Err = TypeMismatch;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Duration::parse(s)
			.ok_or_else(|| TypeMismatch { datatype: Datatype::Duration, value: s.to_string() })
	}
}

#[cfg(test)]
mod test {
	use std::cmp::Ordering;

	use super::Duration;

	#[test]
	fn months_are_not_flattened() {
		let d = Duration::parse("P1M").unwrap();
		assert_eq!(d.months, 1);
		assert_eq!(d.to_string(), "P1M");
	}

	#[test]
	fn full_form_round_trips() {
		for x in ["P1Y2M3DT4H5M6S", "PT2H", "PT0.5S", "-P3D", "P1DT12H"] {
			assert_eq!(Duration::parse(x).unwrap().to_string(), x);
		}
	}

	#[test]
	fn zero_is_canonical() {
		assert_eq!(Duration::parse("PT0S").unwrap().to_string(), "PT0S");
		assert_eq!(Duration::parse("P0D").unwrap().to_string(), "PT0S");
	}

	#[test]
	fn rejects_garbage() {
		for x in ["", "P", "PT", "1D", "P1H", "PXD", "P1DT", "P-1D"] {
			assert!(Duration::parse(x).is_none(), "{x} should not parse");
		}
	}

	#[test]
	fn ordering_by_length_then_components() {
		let hour = Duration::parse("PT1H").unwrap();
		let sixty = Duration::parse("PT60M").unwrap();
		let day = Duration::parse("P1D").unwrap();
		assert_eq!(hour.compare(&day), Ordering::Less);
		assert_ne!(hour.compare(&sixty), Ordering::Equal);
		assert_eq!(hour.compare(&sixty), sixty.compare(&hour).reverse());
	}

	#[test]
	fn converts_to_time_delta() {
		let d = Duration::parse("PT1M30S").unwrap();
		assert_eq!(d.to_time_delta(), Some(chrono::TimeDelta::seconds(90)));
	}
}
