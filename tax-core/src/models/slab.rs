use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// A contiguous income range taxed at a single marginal rate.
///
/// `upper` is `None` for the open-ended top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    pub lower: Decimal,
    #[serde(default)]
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl Slab {
    pub fn new(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { lower, upper, rate }
    }

    /// Width of the slab, or `None` when it is open-ended.
    pub fn width(&self) -> Option<Decimal> {
        self.upper.map(|upper| upper - self.lower)
    }

    /// Tax owed on the part of `taxable` that falls inside this slab.
    ///
    /// Income below the slab contributes nothing; income above it is capped
    /// at the slab width.
    pub fn tax_on(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        let mut portion = (taxable - self.lower).max(Decimal::ZERO);
        if let Some(width) = self.width() {
            portion = portion.min(width);
        }
        portion * self.rate
    }
}

/// An ordered, gap-free list of slabs covering all income from zero upwards.
///
/// Construction goes through [`SlabSchedule::new`], which rejects schedules
/// that leave income uncovered or overlap. Deserialization applies the same
/// checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slab>", into = "Vec<Slab>")]
pub struct SlabSchedule {
    slabs: Vec<Slab>,
}

impl SlabSchedule {
    /// Validates `slabs` and builds a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if the list is empty, does not start at zero,
    /// has gaps or overlaps, has an inverted slab, has a rate outside
    /// `0..=1`, or does not end in an open-ended slab.
    pub fn new(slabs: Vec<Slab>) -> Result<Self, RulesError> {
        let first = slabs.first().ok_or(RulesError::EmptySchedule)?;
        if first.lower != Decimal::ZERO {
            return Err(RulesError::DoesNotStartAtZero(first.lower));
        }

        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO {
                return Err(RulesError::NegativeRate {
                    index,
                    rate: slab.rate,
                });
            }
            if slab.rate > Decimal::ONE {
                return Err(RulesError::ExcessiveRate {
                    index,
                    rate: slab.rate,
                });
            }
            if let Some(upper) = slab.upper {
                if upper <= slab.lower {
                    return Err(RulesError::InvalidBounds {
                        index,
                        lower: slab.lower,
                        upper,
                    });
                }
            }
        }

        for (index, pair) in slabs.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let expected = prev.upper.ok_or(RulesError::UnboundedBeforeLast(index))?;
            if next.lower != expected {
                return Err(RulesError::NonContiguous {
                    index: index + 1,
                    expected,
                    found: next.lower,
                });
            }
        }

        if let Some(upper) = slabs.last().and_then(|slab| slab.upper) {
            return Err(RulesError::LastSlabBounded(upper));
        }

        Ok(Self { slabs })
    }

    /// Old-regime slabs: 0% to 2.5 lakh, 5% to 5 lakh, 20% to 10 lakh, 30% above.
    pub fn old_regime() -> Self {
        Self {
            slabs: vec![
                Slab::new(Decimal::ZERO, Some(Decimal::from(250_000)), Decimal::ZERO),
                Slab::new(
                    Decimal::from(250_000),
                    Some(Decimal::from(500_000)),
                    Decimal::new(5, 2),
                ),
                Slab::new(
                    Decimal::from(500_000),
                    Some(Decimal::from(1_000_000)),
                    Decimal::new(20, 2),
                ),
                Slab::new(Decimal::from(1_000_000), None, Decimal::new(30, 2)),
            ],
        }
    }

    /// New-regime slabs: 0% to 3 lakh, then 5/10/15/20% in 3 lakh steps, 30% above 15 lakh.
    pub fn new_regime() -> Self {
        let steps: [(i64, Option<i64>, i64); 6] = [
            (0, Some(300_000), 0),
            (300_000, Some(600_000), 5),
            (600_000, Some(900_000), 10),
            (900_000, Some(1_200_000), 15),
            (1_200_000, Some(1_500_000), 20),
            (1_500_000, None, 30),
        ];

        Self {
            slabs: steps
                .into_iter()
                .map(|(lower, upper, percent)| {
                    Slab::new(
                        Decimal::from(lower),
                        upper.map(Decimal::from),
                        Decimal::new(percent, 2),
                    )
                })
                .collect(),
        }
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Sum of each slab's share of `taxable`, before cess.
    pub fn tax_on(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        self.slabs.iter().map(|slab| slab.tax_on(taxable)).sum()
    }
}

impl TryFrom<Vec<Slab>> for SlabSchedule {
    type Error = RulesError;

    fn try_from(slabs: Vec<Slab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<SlabSchedule> for Vec<Slab> {
    fn from(schedule: SlabSchedule) -> Self {
        schedule.slabs
    }
}
