use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Seeded generator that remembers its seed so a session can be replayed.
#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
