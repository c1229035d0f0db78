//! Held-position tracking.

/// A long position in the paper portfolio. Exists only while `quantity > 0`;
/// `average_cost` is the quantity-weighted purchase price, recomputed on
/// each buy and untouched by sells.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: u32,
    pub average_cost: f64,
}

impl Position {
    /// quantity × average cost.
    pub fn cost_basis(&self) -> f64 {
        self.quantity as f64 * self.average_cost
    }

    /// quantity × current price.
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity as f64 * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.market_value(price) - self.cost_basis()
    }
}
