//! Tracks which food tiles of the current level have been eaten.

/// A bitset over the food tiles of a world, indexed by [`World::food_index`](super::world::World::food_index).
///
/// The remaining count always equals the number of unset bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodState {
    bits: Vec<u64>,
    total: usize,
    remaining: usize,
}

impl FoodState {
    pub fn new(total: usize) -> Self {
        Self {
            bits: vec![0; total.div_ceil(64)],
            total,
            remaining: total,
        }
    }

    /// Marks the food at `index` as eaten.
    ///
    /// Returns `false` if it was already eaten, in which case nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid food index.
    pub fn eat(&mut self, index: usize) -> bool {
        assert!(index < self.total, "food index {index} out of range (total {})", self.total);
        let (word, mask) = (index / 64, 1u64 << (index % 64));
        if self.bits[word] & mask != 0 {
            return false;
        }
        self.bits[word] |= mask;
        self.remaining -= 1;
        true
    }

    pub fn is_eaten(&self, index: usize) -> bool {
        index < self.total && self.bits[index / 64] & (1u64 << (index % 64)) != 0
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn eaten_count(&self) -> usize {
        self.total - self.remaining
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Iterates over the indices of all eaten food tiles.
    pub fn eaten(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.total).filter(|&i| self.is_eaten(i))
    }

    /// Restores all food. Only called when a level starts.
    pub fn reset(&mut self) {
        self.bits.fill(0);
        self.remaining = self.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_twice_is_noop() {
        let mut food = FoodState::new(100);
        assert!(food.eat(70));
        assert!(!food.eat(70));
        assert_eq!(food.remaining(), 99);
        assert_eq!(food.eaten_count(), 1);
    }

    #[test]
    fn test_remaining_matches_unset_bits() {
        let mut food = FoodState::new(130);
        for i in (0..130).step_by(3) {
            food.eat(i);
        }
        let unset = (0..130).filter(|&i| !food.is_eaten(i)).count();
        assert_eq!(food.remaining(), unset);
        assert_eq!(food.eaten().count(), food.eaten_count());
    }

    #[test]
    fn test_reset() {
        let mut food = FoodState::new(3);
        food.eat(0);
        food.eat(1);
        food.eat(2);
        assert!(food.is_exhausted());
        food.reset();
        assert_eq!(food.remaining(), 3);
        assert!(!food.is_eaten(1));
    }

    #[test]
    #[should_panic]
    fn test_eat_out_of_range_panics() {
        FoodState::new(4).eat(4);
    }
}
