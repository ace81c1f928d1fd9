use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::training::episode::Transition;

/// What `drain_batch` hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Everything currently held.
    #[default]
    Available,
    /// Nothing until the buffer is at capacity, then everything.
    FullOnly,
    /// Up to `batch_size` distinct transitions drawn uniformly at random.
    Sampled,
}

/// Replay buffer settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Defaults to the number of board cells when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    pub policy: BatchPolicy,
    /// Batch size of the `sampled` policy.
    pub batch_size: usize,
    pub clear_on_drain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            capacity: None,
            policy: BatchPolicy::Available,
            batch_size: 32,
            clear_on_drain: false,
            seed: None,
        }
    }
}

impl ReplayConfig {
    /// Buffer capacity for a board of `cells` cells: the configured value, or
    /// one board's worth of steps.
    pub fn capacity_for(&self, cells: usize) -> usize {
        self.capacity.unwrap_or(cells)
    }
}

/// Fixed-capacity ring buffer for storing transitions.
#[derive(Debug)]
pub struct ReplayBuffer {
    buffer: Vec<Transition>,
    capacity: usize,
    position: usize,
    len: usize,
    policy: BatchPolicy,
    batch_size: usize,
    clear_on_drain: bool,
    rng: StdRng,
}

impl ReplayBuffer {
    /// A buffer holding at most `capacity` transitions (at least one).
    pub fn new(capacity: usize, config: &ReplayConfig) -> Self {
        let capacity = capacity.max(1);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        ReplayBuffer {
            buffer: Vec::with_capacity(capacity),
            capacity,
            position: 0,
            len: 0,
            policy: config.policy,
            batch_size: config.batch_size,
            clear_on_drain: config.clear_on_drain,
            rng,
        }
    }

    /// Add a transition to the buffer. Overwrites the oldest when full.
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(transition);
        } else {
            self.buffer[self.position] = transition;
        }
        self.position = (self.position + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Held transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        let start = if self.len < self.capacity { 0 } else { self.position };
        let (newer, older) = self.buffer.split_at(start);
        older.iter().chain(newer.iter())
    }

    /// Batch for training according to the configured policy. Oldest first
    /// except for `Sampled`, which is in random order.
    ///
    /// With `clear_on_drain` a non-empty batch also empties the buffer.
    pub fn drain_batch(&mut self) -> Vec<Transition> {
        let batch: Vec<Transition> = match self.policy {
            BatchPolicy::FullOnly if !self.is_full() => return Vec::new(),
            BatchPolicy::Available | BatchPolicy::FullOnly => self.iter().cloned().collect(),
            BatchPolicy::Sampled => self.sample(self.batch_size),
        };
        if self.clear_on_drain && !batch.is_empty() {
            self.clear();
        }
        batch
    }

    /// Sample up to `batch_size` distinct transitions; all of them, shuffled,
    /// when fewer are held.
    pub fn sample(&mut self, batch_size: usize) -> Vec<Transition> {
        let amount = batch_size.min(self.len);
        let indices = index::sample(&mut self.rng, self.len, amount);
        indices.iter().map(|i| self.buffer[i].clone()).collect()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.position = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Match;
    use crate::game::Player;

    fn transition(action: usize) -> Transition {
        let mut game = Match::new(3, 3, Player::Blue).unwrap();
        let pre = game.snapshot();
        game.attempt(action % 9);
        Transition {
            pre,
            action,
            player: Player::Blue,
            post: game.snapshot(),
            reward: 0.0,
            done: false,
        }
    }

    fn actions(batch: &[Transition]) -> Vec<usize> {
        batch.iter().map(|t| t.action).collect()
    }

    #[test]
    fn test_push_and_len() {
        let mut buf = ReplayBuffer::new(10, &ReplayConfig::default());
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());

        buf.push(transition(0));
        assert_eq!(buf.len(), 1);

        for i in 1..10 {
            buf.push(transition(i));
        }
        assert_eq!(buf.len(), 10);
        assert!(buf.is_full());
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut buf = ReplayBuffer::new(5, &ReplayConfig::default());
        for i in 0..8 {
            buf.push(transition(i));
        }
        assert_eq!(buf.len(), 5);
        assert_eq!(actions(&buf.drain_batch()), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_drain_available_keeps_contents() {
        let mut buf = ReplayBuffer::new(4, &ReplayConfig::default());
        buf.push(transition(1));
        buf.push(transition(2));
        assert_eq!(actions(&buf.drain_batch()), vec![1, 2]);
        assert_eq!(buf.len(), 2);
        assert_eq!(actions(&buf.drain_batch()), vec![1, 2]);
    }

    #[test]
    fn test_drain_full_only_waits_for_capacity() {
        let config = ReplayConfig {
            policy: BatchPolicy::FullOnly,
            ..Default::default()
        };
        let mut buf = ReplayBuffer::new(3, &config);
        buf.push(transition(0));
        buf.push(transition(1));
        assert!(buf.drain_batch().is_empty());
        buf.push(transition(2));
        assert_eq!(actions(&buf.drain_batch()), vec![0, 1, 2]);
    }

    #[test]
    fn test_drain_clear_on_drain() {
        let config = ReplayConfig {
            clear_on_drain: true,
            ..Default::default()
        };
        let mut buf = ReplayBuffer::new(3, &config);
        for i in 0..4 {
            buf.push(transition(i));
        }
        assert_eq!(actions(&buf.drain_batch()), vec![1, 2, 3]);
        assert!(buf.is_empty());
        assert!(buf.drain_batch().is_empty());

        buf.push(transition(9));
        assert_eq!(actions(&buf.drain_batch()), vec![9]);
    }

    #[test]
    fn test_clear() {
        let mut buf = ReplayBuffer::new(3, &ReplayConfig::default());
        for i in 0..5 {
            buf.push(transition(i));
        }
        buf.clear();
        assert!(buf.is_empty());
        buf.push(transition(7));
        assert_eq!(actions(&buf.drain_batch()), vec![7]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let buf = ReplayBuffer::new(0, &ReplayConfig::default());
        assert_eq!(buf.capacity(), 1);
    }

    #[test]
    fn test_sample() {
        let config = ReplayConfig {
            seed: Some(7),
            ..Default::default()
        };
        let mut buf = ReplayBuffer::new(100, &config);
        for i in 0..50 {
            buf.push(transition(i));
        }
        let batch = buf.sample(10);
        assert_eq!(batch.len(), 10);
        let mut seen = actions(&batch);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 10);
        assert_eq!(buf.len(), 50);
    }

    #[test]
    fn test_sample_more_than_held() {
        let mut buf = ReplayBuffer::new(10, &ReplayConfig::default());
        assert!(buf.sample(4).is_empty());
        buf.push(transition(0));
        buf.push(transition(1));
        let mut seen = actions(&buf.sample(5));
        seen.sort();
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn test_drain_sampled_policy() {
        let config = ReplayConfig {
            policy: BatchPolicy::Sampled,
            batch_size: 4,
            seed: Some(3),
            ..Default::default()
        };
        let mut buf = ReplayBuffer::new(20, &config);
        for i in 0..3 {
            buf.push(transition(i));
        }
        assert_eq!(buf.drain_batch().len(), 3);
        for i in 3..20 {
            buf.push(transition(i));
        }
        let batch = actions(&buf.drain_batch());
        assert_eq!(batch.len(), 4);
        let mut distinct = batch.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 4);
        assert_eq!(buf.len(), 20);
    }

    #[test]
    fn test_sampled_policy_is_seeded() {
        let config = ReplayConfig {
            policy: BatchPolicy::Sampled,
            batch_size: 5,
            seed: Some(42),
            ..Default::default()
        };
        let mut a = ReplayBuffer::new(30, &config);
        let mut b = ReplayBuffer::new(30, &config);
        for i in 0..30 {
            a.push(transition(i));
            b.push(transition(i));
        }
        assert_eq!(actions(&a.drain_batch()), actions(&b.drain_batch()));
    }

    #[test]
    fn test_capacity_defaults_to_cell_count() {
        assert_eq!(ReplayConfig::default().capacity_for(64), 64);
        let config = ReplayConfig {
            capacity: Some(10),
            ..Default::default()
        };
        assert_eq!(config.capacity_for(64), 10);
    }
}
