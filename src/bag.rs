use super::alphabet;
use rand::prelude::*;

/// The undrawn tiles. Draws come off the end.
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for tile in 0..alphabet.len() {
            for _ in 0..alphabet.freq(tile) {
                bag.push(tile);
            }
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, mut rng: &mut dyn RngCore) {
        self.0.shuffle(&mut rng);
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.0.pop()
    }

    /// Draws until the rack holds `rack_size` tiles or the bag runs dry.
    pub fn replenish(&mut self, rack: &mut Vec<u8>, rack_size: usize) {
        for _ in 0..(rack_size.saturating_sub(rack.len())).min(self.0.len()) {
            if let Some(tile) = self.pop() {
                rack.push(tile);
            }
        }
    }

    /// Returns tiles to the bag and reshuffles so the next draws are fresh.
    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[u8]) {
        if tiles.is_empty() {
            return;
        }
        self.0.extend_from_slice(tiles);
        self.shuffle(rng);
    }
}

impl Clone for Bag {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn fresh_bag_holds_the_full_tile_set() {
        let alphabet = alphabet::make_english_alphabet();
        let bag = Bag::new(&alphabet);
        assert_eq!(bag.len(), 100);
        let blanks = bag.0.iter().filter(|&&t| t == alphabet::BLANK).count();
        assert_eq!(blanks, 2);
    }

    #[test]
    fn replenish_fills_to_rack_size() {
        let alphabet = alphabet::make_english_alphabet();
        let mut bag = Bag::new(&alphabet);
        let mut rack = Vec::new();
        bag.replenish(&mut rack, 7);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 93);
        bag.replenish(&mut rack, 7);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 93);
    }

    #[test]
    fn put_back_restores_the_count() {
        let alphabet = alphabet::make_english_alphabet();
        let mut bag = Bag::new(&alphabet);
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(1);
        let mut rack = Vec::new();
        bag.replenish(&mut rack, 7);
        bag.put_back(&mut rng, &rack);
        assert_eq!(bag.len(), 100);
    }

    #[test]
    fn drains_to_empty() {
        let alphabet = alphabet::make_english_alphabet();
        let mut bag = Bag::new(&alphabet);
        let mut rack = Vec::new();
        for _ in 0..20 {
            rack.clear();
            bag.replenish(&mut rack, 7);
        }
        assert!(bag.is_empty());
        assert_eq!(bag.pop(), None);
    }
}
