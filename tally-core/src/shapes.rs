use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_types::ScaleRatio;

use crate::sample::{PointData, Sample};

/// Plain numeric series: one spend amount per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostData {
    /// Spend accrued in the bucket.
    pub cost: Decimal,
}

impl CostData {
    /// Build a cost payload.
    #[must_use]
    pub const fn new(cost: Decimal) -> Self {
        Self { cost }
    }
}

impl PointData for CostData {
    fn merge(a: Self, b: Self) -> Self {
        Self { cost: a.cost + b.cost }
    }

    fn scaled(&self, ratio: ScaleRatio) -> Self {
        Self {
            cost: ratio.apply(self.cost),
        }
    }

    fn zero_like(_observed: &[Sample<Self>]) -> Self {
        Self::default()
    }
}

/// Gauge series carrying a running total plus observed extremes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeData {
    /// Sum of readings in the bucket.
    pub total: Decimal,
    /// Smallest reading observed.
    pub min: Decimal,
    /// Largest reading observed.
    pub max: Decimal,
}

impl PointData for GaugeData {
    fn merge(a: Self, b: Self) -> Self {
        Self {
            total: a.total + b.total,
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    fn scaled(&self, ratio: ScaleRatio) -> Self {
        Self {
            total: ratio.apply(self.total),
            min: ratio.apply(self.min),
            max: ratio.apply(self.max),
        }
    }

    fn zero_like(_observed: &[Sample<Self>]) -> Self {
        Self::default()
    }
}

/// One category's share of a breakdown bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    /// Category label (service, SKU, team, ...).
    pub category: String,
    /// Spend attributed to the category in this bucket.
    pub amount: Decimal,
}

/// Categorical breakdown series: per-category spend within each bucket.
///
/// Items are kept sorted by category so merged payloads compare and render
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownData {
    /// Per-category amounts, sorted by category.
    pub items: Vec<CategoryAmount>,
}

impl BreakdownData {
    /// Build a breakdown from `(category, amount)` pairs.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for (category, amount) in pairs {
            *by_category.entry(category.into()).or_default() += amount;
        }
        Self {
            items: by_category
                .into_iter()
                .map(|(category, amount)| CategoryAmount { category, amount })
                .collect(),
        }
    }

    /// Sum across all categories.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|i| i.amount).sum()
    }
}

impl PointData for BreakdownData {
    fn merge(a: Self, b: Self) -> Self {
        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for item in a.items.into_iter().chain(b.items) {
            *by_category.entry(item.category).or_default() += item.amount;
        }
        Self {
            items: by_category
                .into_iter()
                .map(|(category, amount)| CategoryAmount { category, amount })
                .collect(),
        }
    }

    fn scaled(&self, ratio: ScaleRatio) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|i| CategoryAmount {
                    category: i.category.clone(),
                    amount: ratio.apply(i.amount),
                })
                .collect(),
        }
    }

    fn zero_like(observed: &[Sample<Self>]) -> Self {
        let mut categories: Vec<&str> = observed
            .iter()
            .flat_map(|s| s.data.items.iter().map(|i| i.category.as_str()))
            .collect();
        categories.sort_unstable();
        categories.dedup();
        Self {
            items: categories
                .into_iter()
                .map(|category| CategoryAmount {
                    category: category.to_string(),
                    amount: Decimal::ZERO,
                })
                .collect(),
        }
    }
}
