use std::str::FromStr;

use derive_more::derive::{Display, Error};
use serde::{Deserialize, Serialize};

/// Which downstream processor captured a payment. Also partitions the ledger.
#[derive(
	Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
	#[display("default")]
	Default,
	#[display("fallback")]
	Fallback,
}

impl Origin {
	pub const ALL: [Origin; 2] = [Origin::Default, Origin::Fallback];
}

#[derive(Debug, Display, Error, PartialEq)]
#[display("unknown payment origin '{name}'")]
pub struct UnknownOrigin {
	pub name: String,
}

impl FromStr for Origin {
	type Err = UnknownOrigin;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"default" => Ok(Origin::Default),
			"fallback" => Ok(Origin::Fallback),
			other => Err(UnknownOrigin {
				name: other.to_string(),
			}),
		}
	}
}
