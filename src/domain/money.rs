use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A currency amount held as integer minor units (cents).
///
/// Every sum in the gateway and the ledger is accumulated in this type so
/// that repeated additions never drift. Conversion to a decimal value only
/// happens at the edges.
#[derive(
	Debug,
	Clone,
	Copy,
	Default,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Deserialize,
	Serialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
	pub const ZERO: Cents = Cents(0);

	pub const fn new(cents: i64) -> Self {
		Self(cents)
	}

	/// Converts a decimal amount into cents, rounding half away from zero.
	///
	/// Returns `None` for NaN, infinities and values that do not fit.
	pub fn from_decimal(value: f64) -> Option<Self> {
		if !value.is_finite() {
			return None;
		}

		let scaled = (value * 100.0).round();
		if scaled.abs() >= i64::MAX as f64 {
			return None;
		}

		Some(Self(scaled as i64))
	}

	pub const fn get(self) -> i64 {
		self.0
	}

	pub fn as_decimal(self) -> f64 {
		self.0 as f64 / 100.0
	}

	pub const fn is_positive(self) -> bool {
		self.0 > 0
	}
}

impl Add for Cents {
	type Output = Cents;

	fn add(self, rhs: Cents) -> Cents {
		Cents(self.0.saturating_add(rhs.0))
	}
}

impl AddAssign for Cents {
	fn add_assign(&mut self, rhs: Cents) {
		*self = *self + rhs;
	}
}

impl Sum for Cents {
	fn sum<I: Iterator<Item = Cents>>(iter: I) -> Self {
		iter.fold(Cents::ZERO, Add::add)
	}
}
