use serde::{Deserialize, Serialize};

/// A physical stock location holding a quantity of one part lot.
///
/// Lot and bin identifiers are fixed when the bin is seeded; only `stock` moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    lot_no: String,
    bin_no: String,
    stock: i64,
}

impl Bin {
    pub fn new(lot_no: impl Into<String>, bin_no: impl Into<String>, stock: i64) -> Self {
        Self {
            lot_no: lot_no.into(),
            bin_no: bin_no.into(),
            stock,
        }
    }

    pub fn lot_no(&self) -> &str {
        &self.lot_no
    }

    pub fn bin_no(&self) -> &str {
        &self.bin_no
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }
}

/// Ordered bins of one part.
///
/// Order is consumption order: deductions drain the first bin first. No operation adds
/// bins after seeding, and an emptied bin is dropped for good.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinLedger {
    bins: Vec<Bin>,
}

impl BinLedger {
    pub fn new(bins: Vec<Bin>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of stock across all bins, saturating at `i64::MAX`.
    pub fn total_stock(&self) -> i64 {
        self.bins.iter().map(Bin::stock).fold(0, i64::saturating_add)
    }

    /// Remove `quantity` units, first bin first, and drop every bin left at zero.
    ///
    /// Returns `true` when the full quantity was covered. When stock runs short every bin is
    /// drained and `false` is returned; stock never goes negative.
    ///
    /// A `quantity <= 0` touches no stock and reports success. There is no refund path:
    /// a negative quantity does not put units back.
    pub fn deduct(&mut self, quantity: i64) -> bool {
        let mut remaining = quantity;

        for bin in self.bins.iter_mut() {
            if remaining <= 0 {
                break;
            }
            if bin.stock >= remaining {
                bin.stock -= remaining;
                remaining = 0;
            } else {
                remaining -= bin.stock;
                bin.stock = 0;
            }
        }

        let before = self.bins.len();
        self.bins.retain(|bin| bin.stock > 0);
        let emptied = before - self.bins.len();
        if emptied > 0 {
            tracing::debug!(emptied, remaining_bins = self.bins.len(), "removed depleted bins");
        }

        remaining <= 0
    }

    pub fn lot_numbers(&self) -> Vec<&str> {
        self.bins.iter().map(Bin::lot_no).collect()
    }

    pub fn bin_numbers(&self) -> Vec<&str> {
        self.bins.iter().map(Bin::bin_no).collect()
    }
}

impl FromIterator<Bin> for BinLedger {
    fn from_iter<T: IntoIterator<Item = Bin>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
