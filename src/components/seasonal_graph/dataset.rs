//! Period catalog loading and validation.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::info;

use super::types::{Category, Period, Snapshot};

const BUILTIN_SEASONS: &str = include_str!("../../../data/seasons.json");

/// Reasons a catalog is rejected at load time.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
	#[error("dataset is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("no snapshot defined for {period}")]
	MissingPeriod { period: Period },

	#[error("{period}: entity {id:?} is defined more than once")]
	DuplicateEntity { period: Period, id: String },

	#[error("{period}: edge {from:?} -> {to:?} references unknown entity {missing:?}")]
	UnknownEndpoint {
		period: Period,
		from: String,
		to: String,
		missing: String,
	},

	#[error("{period}: edge {from:?} -> {to:?} has weight {weight}, expected a positive finite number")]
	InvalidWeight {
		period: Period,
		from: String,
		to: String,
		weight: f64,
	},

	#[error("{period}: edge {from:?} -> {to:?} is defined more than once")]
	DuplicateRelationship {
		period: Period,
		from: String,
		to: String,
	},

	#[error("{period}: entity {id:?} is linked to itself")]
	SelfLoop { period: Period, id: String },
}

/// Every period's snapshot, validated as a whole.
#[derive(Clone, Debug)]
pub struct Catalog {
	snapshots: BTreeMap<Period, Snapshot>,
}

impl Catalog {
	/// The seasonal ecosystem data shipped with the app.
	pub fn builtin() -> Result<Self, DatasetError> {
		Self::from_json(BUILTIN_SEASONS)
	}

	pub fn from_json(json: &str) -> Result<Self, DatasetError> {
		let snapshots: BTreeMap<Period, Snapshot> = serde_json::from_str(json)?;
		Self::new(snapshots)
	}

	pub fn new(snapshots: BTreeMap<Period, Snapshot>) -> Result<Self, DatasetError> {
		for period in Period::ALL {
			let snapshot = snapshots
				.get(&period)
				.ok_or(DatasetError::MissingPeriod { period })?;
			validate(period, snapshot)?;
		}
		info!(
			"Loaded {} periods ({} entities total)",
			snapshots.len(),
			snapshots.values().map(|s| s.entities.len()).sum::<usize>()
		);
		Ok(Self { snapshots })
	}

	pub fn snapshot(&self, period: Period) -> &Snapshot {
		// `new` guarantees every period is present.
		&self.snapshots[&period]
	}
}

fn validate(period: Period, snapshot: &Snapshot) -> Result<(), DatasetError> {
	let mut ids = HashSet::new();
	for entity in &snapshot.entities {
		if !ids.insert(entity.id.as_str()) {
			return Err(DatasetError::DuplicateEntity {
				period,
				id: entity.id.clone(),
			});
		}
	}

	let mut pairs = HashSet::new();
	for rel in &snapshot.relationships {
		if !pairs.insert((rel.source.as_str(), rel.target.as_str())) {
			return Err(DatasetError::DuplicateRelationship {
				period,
				from: rel.source.clone(),
				to: rel.target.clone(),
			});
		}
		for endpoint in [&rel.source, &rel.target] {
			if !ids.contains(endpoint.as_str()) {
				return Err(DatasetError::UnknownEndpoint {
					period,
					from: rel.source.clone(),
					to: rel.target.clone(),
					missing: endpoint.clone(),
				});
			}
		}
		if rel.source == rel.target {
			return Err(DatasetError::SelfLoop {
				period,
				id: rel.source.clone(),
			});
		}
		if !rel.weight.is_finite() || rel.weight <= 0.0 {
			return Err(DatasetError::InvalidWeight {
				period,
				from: rel.source.clone(),
				to: rel.target.clone(),
				weight: rel.weight,
			});
		}
	}
	Ok(())
}

impl Snapshot {
	/// Sum of incident edge weights per entity, for this snapshot only.
	/// Entities without edges are absent from the map.
	pub fn connectivity(&self) -> HashMap<String, f64> {
		let mut totals: HashMap<String, f64> = HashMap::new();
		for rel in &self.relationships {
			*totals.entry(rel.source.clone()).or_default() += rel.weight;
			*totals.entry(rel.target.clone()).or_default() += rel.weight;
		}
		totals
	}

	/// Categories present in this snapshot, in legend order.
	pub fn categories(&self) -> Vec<Category> {
		Category::ALL
			.into_iter()
			.filter(|c| self.entities.iter().any(|e| e.category == *c))
			.collect()
	}
}
