mod tests {
    use embassy_time::Instant;
    use prop_puzzle_engine::combo::DEFAULT_COMBO_PALETTE;
    use prop_puzzle_engine::{ComboLock, PuzzleConfig, PuzzleEngine, TickEvent};

    fn ms(t: u64) -> Instant {
        Instant::from_millis(t)
    }

    #[test]
    fn test_press_cycles_modulo_palette() {
        let mut lock: ComboLock<2> = ComboLock::new([0, 0], &DEFAULT_COMBO_PALETTE);
        for _ in 0..DEFAULT_COMBO_PALETTE.len() {
            lock.press(1);
        }
        // A full cycle returns to the key combination
        assert!(lock.is_open());
    }

    #[test]
    fn test_opens_on_key_combination() {
        let mut lock: ComboLock<3> = ComboLock::new([1, 0, 2], &DEFAULT_COMBO_PALETTE);
        assert!(!lock.is_open());

        lock.press(0);
        assert!(!lock.is_open());
        lock.press(2);
        lock.press(2);
        assert!(lock.is_open());
    }

    #[test]
    fn test_paint_shows_cursor_colors() {
        let mut lock: ComboLock<2> = ComboLock::new([1, 1], &DEFAULT_COMBO_PALETTE);
        lock.press(0);

        let mut frame = [DEFAULT_COMBO_PALETTE[6]; 2];
        lock.paint(&mut frame);
        assert_eq!(frame[0], DEFAULT_COMBO_PALETTE[1]);
        assert_eq!(frame[1], DEFAULT_COMBO_PALETTE[0]);
    }

    #[test]
    fn test_out_of_range_press_is_ignored() {
        let mut lock: ComboLock<2> = ComboLock::new([0, 0], &DEFAULT_COMBO_PALETTE);
        lock.press(5);
        assert!(lock.is_open());
    }

    #[test]
    fn test_engine_gates_puzzle_behind_lock() {
        let key = [1, 0, 0, 0, 0, 0, 0, 0];
        let lock = ComboLock::new(key, &DEFAULT_COMBO_PALETTE);
        let mut engine: PuzzleEngine<8> =
            PuzzleEngine::new(PuzzleConfig::default(), 7).with_combo_lock(lock);

        assert!(!engine.is_unlocked());

        // Presses while locked cycle combination colors, not puzzle presses
        engine.record_press(3);
        assert_eq!(engine.tick(ms(0)), TickEvent::Render);
        assert!(engine.presses().is_empty());
        assert!(engine.targets().is_empty());

        // Undo the stray cycle, then dial in the key
        for _ in 0..DEFAULT_COMBO_PALETTE.len() - 1 {
            engine.record_press(3);
        }
        engine.record_press(0);
        assert_eq!(engine.tick(ms(50)), TickEvent::Unlocked);
        assert!(engine.is_unlocked());

        // The sequence puzzle begins on the next tick
        assert_eq!(engine.tick(ms(100)), TickEvent::Render);
        assert!(!engine.targets().is_empty());
    }
}
