mod tests {
    use prop_puzzle_engine::ButtonSet;
    use prop_puzzle_engine::rng::SplitMix64;

    #[test]
    fn test_insert_ignores_duplicates() {
        let mut set: ButtonSet<8> = ButtonSet::new();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 1);
        assert!(set.contains(3));
    }

    #[test]
    fn test_insert_rejects_out_of_range() {
        let mut set: ButtonSet<4> = ButtonSet::new();
        assert!(!set.insert(4));
        assert!(!set.insert(200));
        assert!(set.insert(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_matches_is_order_independent() {
        let mut a: ButtonSet<8> = ButtonSet::new();
        let mut b: ButtonSet<8> = ButtonSet::new();
        for idx in [2, 5, 7] {
            a.insert(idx);
        }
        for idx in [7, 2, 5] {
            b.insert(idx);
        }
        assert!(a.matches(&b));
        assert!(b.matches(&a));
    }

    #[test]
    fn test_matches_rejects_subset() {
        let mut a: ButtonSet<8> = ButtonSet::new();
        let mut b: ButtonSet<8> = ButtonSet::new();
        for idx in [2, 5] {
            a.insert(idx);
        }
        b.insert(2);
        assert!(!a.matches(&b));
        assert!(!b.matches(&a));
    }

    #[test]
    fn test_sample_is_distinct_and_in_range() {
        let mut rng = SplitMix64::new(11);
        for _ in 0..50 {
            let set: ButtonSet<8> = ButtonSet::sample(&mut rng, 5);
            assert_eq!(set.len(), 5);
            let slice = set.as_slice();
            for (i, &v) in slice.iter().enumerate() {
                assert!(v < 8);
                assert!(!slice[..i].contains(&v));
            }
        }
    }

    #[test]
    fn test_sample_caps_count_at_capacity() {
        let mut rng = SplitMix64::new(3);
        let set: ButtonSet<4> = ButtonSet::sample(&mut rng, 10);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_sample_zero_is_empty() {
        let mut rng = SplitMix64::new(3);
        let set: ButtonSet<8> = ButtonSet::sample(&mut rng, 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_sample_is_deterministic_per_seed() {
        let mut a = SplitMix64::new(99);
        let mut b = SplitMix64::new(99);
        let first: ButtonSet<8> = ButtonSet::sample(&mut a, 3);
        let second: ButtonSet<8> = ButtonSet::sample(&mut b, 3);
        assert_eq!(first, second);
    }
}
