use dstc::*;
use proptest::prelude::*;

#[test]
fn test_supply_cap_boundary() {
    assert!(is_legal_amount(Amount::from_drops(10_757_000_000)));
    assert!(!is_legal_amount(Amount::from_drops(10_757_000_001)));
}

#[test]
fn test_supply_cap_has_no_floor() {
    // Upper bound only: negative drop counts are accepted, callers needing
    // non-negativity must check the sign themselves.
    assert!(is_legal_amount(Amount::from_drops(0)));
    assert!(is_legal_amount(Amount::from_drops(-1)));
    assert!(is_legal_amount(Amount::from_drops(i64::MIN)));
}

#[test]
fn test_mul_ratio_reference_cases() {
    let cases = [
        (100, 1, 3, true, 34),
        (100, 1, 3, false, 33),
        (-100, 1, 3, true, -33),
        (-100, 1, 3, false, -34),
        (0, 1, 3, true, 0),
        (0, 1, 3, false, 0),
    ];
    for (drops, num, den, round_up, expected) in cases {
        let result = mul_ratio(Amount::from_drops(drops), num, den, round_up).unwrap();
        assert_eq!(result.drops(), expected, "mul_ratio({drops}, {num}, {den}, {round_up})");
    }
}

// Property test generators

fn arb_bounded_amount() -> impl Strategy<Value = Amount> {
    (-SUPPLY_CAP..=SUPPLY_CAP).prop_map(Amount::from_drops)
}

fn arb_nonneg_amount() -> impl Strategy<Value = Amount> {
    (0..=SUPPLY_CAP).prop_map(Amount::from_drops)
}

proptest! {
    #[test]
    fn prop_round_up_dominates_round_down_by_at_most_one(
        amount in arb_nonneg_amount(),
        num in 0u32..10_000,
        den in 1u32..10_000,
    ) {
        let up = mul_ratio(amount, num, den, true).unwrap().drops();
        let down = mul_ratio(amount, num, den, false).unwrap().drops();

        prop_assert!(up >= down);
        prop_assert!(up - down <= 1);
    }

    #[test]
    fn prop_rounding_is_mirrored_for_negative_amounts(
        amount in arb_nonneg_amount(),
        num in 0u32..10_000,
        den in 1u32..10_000,
    ) {
        let up = mul_ratio(amount, num, den, true).unwrap().drops();
        let down = mul_ratio(amount, num, den, false).unwrap().drops();
        let neg_up = mul_ratio(-amount, num, den, true).unwrap().drops();
        let neg_down = mul_ratio(-amount, num, den, false).unwrap().drops();

        // Magnitude rounding stays consistent across signs.
        prop_assert_eq!(neg_up, -down);
        prop_assert_eq!(neg_down, -up);
    }

    #[test]
    fn prop_zero_denominator_always_fails(
        amount in arb_bounded_amount(),
        num in 0u32..u32::MAX,
        round_up in any::<bool>(),
    ) {
        prop_assert_eq!(
            mul_ratio(amount, num, 0, round_up),
            Err(AmountError::DivisionByZero)
        );
    }

    #[test]
    fn prop_identity_ratio_is_exact(
        amount in arb_bounded_amount(),
        ratio in 1u32..10_000,
        round_up in any::<bool>(),
    ) {
        let scaled = mul_ratio(amount, ratio, ratio, round_up).unwrap();
        prop_assert_eq!(scaled, amount);
    }

    #[test]
    fn prop_add_sub_round_trips(a in arb_bounded_amount(), b in arb_bounded_amount()) {
        prop_assert_eq!(a + b - b, a);
        prop_assert_eq!(-(-a), a);
    }

    #[test]
    fn prop_signum_matches_ordering(a in arb_bounded_amount()) {
        match a.signum() {
            -1 => prop_assert!(a < Amount::ZERO),
            0 => prop_assert_eq!(a, Amount::ZERO),
            1 => prop_assert!(a > Amount::ZERO),
            _ => prop_assert!(false, "signum out of range"),
        }
    }
}
