//! The in-memory shopping cart.
//!
//! The cart lives and dies with the process and is never persisted or
//! synchronized. Adding the same product twice
//! appends two independent lines rather than merging quantities; each
//! add is its own line even when name, size, and color all match.

use rust_decimal::Decimal;
use velora_core::CartLine;

/// An ordered list of cart lines.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not summed quantities).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Append a line. Never merges with an existing line.
    pub fn add(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Raise the quantity of the line at `index` by one. Out-of-range
    /// indices are ignored.
    pub fn increment(&mut self, index: usize) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity += 1;
        }
    }

    /// Lower the quantity of the line at `index` by one, removing the
    /// line when its quantity would drop below one. Out-of-range
    /// indices are ignored.
    pub fn decrement(&mut self, index: usize) {
        if let Some(line) = self.lines.get_mut(index) {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                self.lines.remove(index);
            }
        }
    }

    /// Remove the line at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn line(name: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            name: name.to_owned(),
            price: Decimal::from(price),
            size: "M".to_owned(),
            image: "https://img.example/tee.jpg".to_owned(),
            color: "#000".to_owned(),
            quantity,
        }
    }

    #[test]
    fn test_duplicate_add_appends_instead_of_merging() {
        let mut cart = Cart::new();
        cart.add(line("Tee", 100, 1));
        cart.add(line("Tee", 100, 1));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::from(200));
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add(line("Tee", 100, 2));
        cart.add(line("Scarf", 50, 1));
        assert_eq!(cart.total(), Decimal::from(250));
    }

    #[test]
    fn test_increment_and_decrement_adjust_quantity() {
        let mut cart = Cart::new();
        cart.add(line("Tee", 100, 1));

        cart.increment(0);
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.decrement(0);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_decrement_below_one_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(line("Tee", 100, 1));
        cart.decrement(0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let mut cart = Cart::new();
        cart.add(line("Tee", 100, 1));
        cart.increment(5);
        cart.decrement(5);
        cart.remove(5);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }
}
