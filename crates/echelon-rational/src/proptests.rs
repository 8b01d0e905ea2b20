//! Property-based tests for exact rational arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::Rational;

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    proptest! {
        // Field axioms

        #[test]
        fn add_commutative(a in small_int(), b in non_zero_int(),
                           c in small_int(), d in non_zero_int()) {
            let x = rat(a, b);
            let y = rat(c, d);
            prop_assert_eq!(x.clone() + y.clone(), y + x);
        }

        #[test]
        fn mul_commutative(a in small_int(), b in non_zero_int(),
                           c in small_int(), d in non_zero_int()) {
            let x = rat(a, b);
            let y = rat(c, d);
            prop_assert_eq!(x.clone() * y.clone(), y * x);
        }

        #[test]
        fn add_neg_is_zero(a in small_int(), b in non_zero_int()) {
            let x = rat(a, b);
            prop_assert!((x.clone() + (-x)).is_zero());
        }

        #[test]
        fn div_undoes_mul(a in small_int(), b in non_zero_int(),
                          c in non_zero_int(), d in non_zero_int()) {
            let x = rat(a, b);
            let y = rat(c, d);
            let back = (x.clone() * y.clone()).checked_div(&y).unwrap();
            prop_assert_eq!(back, x);
        }

        // Representation invariants

        #[test]
        fn stored_form_is_reduced(a in small_int(), b in non_zero_int()) {
            let x = rat(a, b);
            let (num, den) = x.to_i64_pair().unwrap();
            prop_assert!(den >= 1);
            prop_assert_eq!(gcd(num.unsigned_abs(), den.unsigned_abs()), 1);
        }

        #[test]
        fn to_f64_matches_ratio(a in small_int(), b in non_zero_int()) {
            let x = rat(a, b);
            let expected = a as f64 / b as f64;
            prop_assert!((x.to_f64() - expected).abs() < 1e-9);
        }

        // Round-trip through the text form

        #[test]
        fn display_parse_round_trip(a in small_int(), b in non_zero_int()) {
            let x = rat(a, b);
            let parsed: Rational = x.to_string().parse().unwrap();
            prop_assert_eq!(parsed, x);
        }
    }

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a.max(1)
    }
}
