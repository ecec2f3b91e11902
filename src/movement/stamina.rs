//! Movement domain: climbing stamina.

/// Stamina spent per tick of climbing input.
pub const CLIMB_COST: f32 = 1.0;

/// Stamina spent by jumping off a grabbed wall.
pub const WALL_JUMP_COST: f32 = 50.0;

/// Depletable climbing resource. Always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamina {
    current: f32,
    max: f32,
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Spend `amount`, stopping at zero.
    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Set directly, clamped into range.
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamina_starts_full() {
        let stamina = Stamina::new(180.0);
        assert_eq!(stamina.current(), 180.0);
        assert!(!stamina.is_empty());
    }

    #[test]
    fn test_drain_clamps_at_zero() {
        let mut stamina = Stamina::new(30.0);
        stamina.drain(WALL_JUMP_COST);
        assert_eq!(stamina.current(), 0.0);
        assert!(stamina.is_empty());
    }

    #[test]
    fn test_climb_drains_one_per_tick() {
        let mut stamina = Stamina::new(3.0);
        for expected in [2.0, 1.0, 0.0, 0.0] {
            stamina.drain(CLIMB_COST);
            assert_eq!(stamina.current(), expected);
        }
    }

    #[test]
    fn test_refill_and_set() {
        let mut stamina = Stamina::new(100.0);
        stamina.drain(70.0);
        stamina.refill();
        assert_eq!(stamina.current(), 100.0);

        stamina.set(250.0);
        assert_eq!(stamina.current(), 100.0);
        stamina.set(-4.0);
        assert_eq!(stamina.current(), 0.0);
    }
}
