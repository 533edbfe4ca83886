//! Unit tests for tb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActivityId, ZoneId};

    #[test]
    fn index_roundtrip() {
        let id = ZoneId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(ZoneId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(ActivityId::default(), ActivityId::INVALID);
        assert!(!ActivityId::default().is_valid());
        assert!(ActivityId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(ActivityId(7).to_string(), "activity#7");
        assert_eq!(ZoneId::INVALID.to_string(), "zone#none");
    }

    #[test]
    fn reserved_index_rejected() {
        assert!(ZoneId::try_from(usize::from(u16::MAX)).is_err());
        assert!(ZoneId::try_from(1usize << 20).is_err());
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0, 0, 0);
        let b = Position::new(3, 4, 0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-9);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn far_apart_distance_does_not_overflow() {
        let a = Position::new(i32::MAX, i32::MIN, 0);
        let b = Position::new(i32::MIN, i32::MIN, 0);
        assert_eq!(a.distance_to(b), 4_294_967_295.0);
        assert_eq!(b.distance_to(a), 4_294_967_295.0);
    }

    #[test]
    fn plane_check() {
        assert!(Position::new(1, 1, 0).same_plane(Position::new(9, 9, 0)));
        assert!(!Position::new(1, 1, 0).same_plane(Position::new(1, 1, 1)));
    }

    #[test]
    fn keys_distinguish_neighbours_and_planes() {
        let base = Position::new(2838, 9387, 0);
        assert_ne!(base.key(), Position::new(2839, 9387, 0).key());
        assert_ne!(base.key(), Position::new(2838, 9388, 0).key());
        assert_ne!(base.key(), Position::new(2838, 9387, 1).key());
        assert_eq!(base.key(), Position::new(2838, 9387, 0).key());
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, ManualClock, SystemClock, Throttle, Timestamp};

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp(1_000);
        assert_eq!(t + 500, Timestamp(1_500));
        assert_eq!(Timestamp(1_500) - t, 500);
        // saturates instead of underflowing
        assert_eq!(t.since(Timestamp(2_000)), 0);
    }

    #[test]
    fn manual_clock_only_moves_forward() {
        let mut clock = ManualClock::default();
        assert_eq!(clock.now(), Timestamp::ZERO);
        clock.advance(600);
        assert_eq!(clock.now(), Timestamp(600));
        clock.set(Timestamp(100));
        assert_eq!(clock.now(), Timestamp(600));
        clock.set(Timestamp(900));
        assert_eq!(clock.now(), Timestamp(900));
    }

    #[test]
    fn system_clock_starts_near_zero_and_never_goes_back() {
        let clock = SystemClock::new();
        let first = clock.now();
        assert!(first.0 < 1_000);
        let mut last = first;
        for _ in 0..100 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn throttle_fires_once_per_interval() {
        let mut t = Throttle::new(3_000);
        assert!(t.ready(Timestamp(0)));
        assert!(!t.ready(Timestamp(2_999)));
        assert!(t.ready(Timestamp(3_000)));
        assert!(!t.ready(Timestamp(3_001)));
        t.reset();
        assert!(t.ready(Timestamp(3_002)));
    }
}

#[cfg(test)]
mod rng {
    use crate::{BotRng, DelayRange, Spread};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = BotRng::new(12345);
        let mut r2 = BotRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.uniform_ms(0, 10_000), r2.uniform_ms(0, 10_000));
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = BotRng::new(1);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let xs: Vec<u64> = (0..8).map(|_| a.uniform_ms(0, u64::MAX / 2)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.uniform_ms(0, u64::MAX / 2)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn draws_stay_in_bounds() {
        let mut rng = BotRng::new(7);
        let uniform = DelayRange::uniform(15_000, 25_000);
        let gaussian = DelayRange::gaussian(10_000, 16_000, 5_000.0);
        for _ in 0..2_000 {
            assert!(uniform.contains(rng.draw(&uniform)));
            assert!(gaussian.contains(rng.draw(&gaussian)));
        }
    }

    #[test]
    fn degenerate_ranges() {
        let mut rng = BotRng::new(0);
        assert_eq!(rng.draw(&DelayRange::fixed(600)), 600);
        assert_eq!(rng.uniform_ms(10, 5), 10);
        // zero deviation collapses to the midpoint
        assert_eq!(rng.draw(&DelayRange::gaussian(1_000, 2_000, 0.0)), 1_500);
    }

    #[test]
    fn validation() {
        assert!(DelayRange::new(5, 1, Spread::Uniform).is_err());
        assert!(DelayRange::new(1, 5, Spread::Gaussian { std_dev_ms: -1.0 }).is_err());
        assert!(DelayRange::new(1, 5, Spread::Gaussian { std_dev_ms: f64::NAN }).is_err());
        assert!(DelayRange::new(1, 5, Spread::Gaussian { std_dev_ms: 1.0 }).is_ok());
    }
}
