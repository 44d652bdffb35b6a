use std::ops::Add;

/// Totals derived from a set of bets. Recomputed on every call, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateAmounts {
    /// Sum of every stake.
    pub total_wagered: f64,
    /// Sum of stake × odds over winning bets.
    pub total_won: f64,
}

impl AggregateAmounts {
    /// Pool profit: what was wagered minus what was paid out.
    /// Negative on a losing day; never clamped.
    pub fn profit(&self) -> f64 {
        self.total_wagered - self.total_won
    }
}

impl Add for AggregateAmounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_wagered: self.total_wagered + rhs.total_wagered,
            total_won: self.total_won + rhs.total_won,
        }
    }
}
