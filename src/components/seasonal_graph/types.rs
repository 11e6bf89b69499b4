use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named time slice selecting one dataset snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
	Spring,
	Summer,
	Fall,
	Winter,
}

impl Period {
	/// Slider order.
	pub const ALL: [Period; 4] = [Period::Spring, Period::Summer, Period::Fall, Period::Winter];

	pub fn name(self) -> &'static str {
		match self {
			Period::Spring => "Spring",
			Period::Summer => "Summer",
			Period::Fall => "Fall",
			Period::Winter => "Winter",
		}
	}

	pub fn index(self) -> usize {
		Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
	}

	pub fn from_index(index: usize) -> Option<Self> {
		Self::ALL.get(index).copied()
	}
}

impl fmt::Display for Period {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Period {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|p| p.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| format!("unknown period: {s}"))
	}
}

/// Ecological role of an entity, drives marker colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Bird,
	Plant,
	Insect,
}

impl Category {
	pub const ALL: [Category; 3] = [Category::Bird, Category::Plant, Category::Insect];

	pub fn color(self) -> &'static str {
		match self {
			Category::Bird => "#4F46E5",
			Category::Plant => "#16A34A",
			Category::Insect => "#EAB308",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Category::Bird => "Bird",
			Category::Plant => "Plant",
			Category::Insect => "Insect",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
	pub id: String,
	pub category: Category,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

/// One period's immutable entity and relationship sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	pub entities: Vec<Entity>,
	pub relationships: Vec<Relationship>,
}
