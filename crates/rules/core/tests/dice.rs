use rules_core::{DiceExpr, DiceFormatError, PcgSource, RandomSource, roll_notation};

/// Same seed, same rolls: replays are reproducible.
#[test]
fn test_seeded_rolls_replay() {
    let mut first = PcgSource::new(42);
    let mut second = PcgSource::new(42);
    let a: Vec<u32> = (0..32).map(|_| first.draw(20)).collect();
    let b: Vec<u32> = (0..32).map(|_| second.draw(20)).collect();
    assert_eq!(a, b);
    assert!(a.iter().all(|roll| (1..=20).contains(roll)));
}

#[test]
fn test_notation_totals_stay_in_range() {
    let mut source = PcgSource::new(7);
    let expr: DiceExpr = "3d6+2".parse().unwrap();
    for _ in 0..200 {
        let total = expr.roll(&mut source);
        assert!((expr.min()..=expr.max()).contains(&total), "{total} out of range");
    }
    assert_eq!((expr.min(), expr.max()), (5, 20));
}

#[test]
fn test_roll_notation_rejects_garbage() {
    let mut source = PcgSource::new(1);
    for input in ["", "d", "3d", "2d6+", "xd6", "2d6*2", "1d0", "100000d100000", "d3000000000"] {
        assert_eq!(
            roll_notation(&mut source, input),
            Err(DiceFormatError::new(input)),
            "{input:?} should be rejected"
        );
    }
}
