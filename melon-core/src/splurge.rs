use rand::Rng;
use std::ops::RangeInclusive;

/// Range the per-order splurge factor is drawn from.
pub const SPLURGE_RANGE: RangeInclusive<i32> = 5..=9;

/// Supplies the splurge factor fixed into an order when it is built.
pub trait SplurgeSource: Send + Sync {
    fn draw(&self) -> i32;
}

/// Uniform draw over `SPLURGE_RANGE` from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSplurge;

impl SplurgeSource for ThreadRngSplurge {
    fn draw(&self) -> i32 {
        rand::thread_rng().gen_range(SPLURGE_RANGE)
    }
}

/// Always yields the same factor.
#[derive(Debug, Clone, Copy)]
pub struct FixedSplurge(pub i32);

impl SplurgeSource for FixedSplurge {
    fn draw(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_stays_in_range() {
        let source = ThreadRngSplurge;
        for _ in 0..500 {
            let factor = source.draw();
            assert!(SPLURGE_RANGE.contains(&factor), "drew {}", factor);
        }
    }

    #[test]
    fn test_fixed_splurge() {
        assert_eq!(FixedSplurge(7).draw(), 7);
    }
}
