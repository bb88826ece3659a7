//! End-to-end addition tests through the CPU backend

use ripple_backends::CpuBackend;
use ripple_core::{CarryPropagator, DigitVector, NullObserver, PassObserver, PassSnapshot, SumError};

const WIDTH: usize = 21;

fn add_decimal(lhs: &str, rhs: &str) -> (String, usize) {
    let lhs = DigitVector::from_decimal_str(lhs, WIDTH).unwrap();
    let rhs = DigitVector::from_decimal_str(rhs, WIDTH).unwrap();
    let mut backend = CpuBackend::new();
    let mut driver = CarryPropagator::new(&mut backend, 10, WIDTH).unwrap();
    let report = driver.run(&lhs, &rhs, &mut NullObserver).unwrap();
    (report.digits.to_decimal_string(), report.passes)
}

#[test]
fn test_twenty_digit_sum() {
    let (sum, passes) = add_decimal("084357083924567890123", "025785994397568899987");
    assert_eq!(sum, "110143078322136790110");
    assert!(passes >= 2, "this pair overflows and needs extra passes");
}

#[test]
fn test_zero_plus_zero() {
    let (sum, passes) = add_decimal("0", "0");
    assert_eq!(sum, "0".repeat(WIDTH));
    assert_eq!(passes, 1);
}

#[test]
fn test_addition_is_commutative() {
    let (forward, _) = add_decimal("123456789", "987654321");
    let (backward, _) = add_decimal("987654321", "123456789");
    assert_eq!(forward, backward);
    assert_eq!(forward, format!("{:0>width$}", "1111111110", width = WIDTH));
}

#[test]
fn test_carry_chain_across_full_width() {
    // 19 nines plus one ripples a carry across the whole vector.
    let nines = "9".repeat(WIDTH - 2);
    let (sum, _) = add_decimal(&nines, "1");
    let expected = format!("01{}", "0".repeat(WIDTH - 2));
    assert_eq!(sum, expected);
}

#[test]
fn test_observer_sees_every_pass() {
    struct CountingObserver {
        passes: Vec<usize>,
        widths_ok: bool,
    }

    impl PassObserver for CountingObserver {
        fn on_pass(&mut self, pass: usize, snapshot: &PassSnapshot<'_>) {
            self.passes.push(pass);
            self.widths_ok = self.widths_ok
                && snapshot.lhs.len() == WIDTH
                && snapshot.rhs.len() == WIDTH
                && snapshot.value.len() == WIDTH
                && snapshot.carry.len() == WIDTH;
        }
    }

    let lhs = DigitVector::from_decimal_str("084357083924567890123", WIDTH).unwrap();
    let rhs = DigitVector::from_decimal_str("025785994397568899987", WIDTH).unwrap();
    let mut backend = CpuBackend::new();
    let mut driver = CarryPropagator::new(&mut backend, 10, WIDTH).unwrap();
    let mut observer = CountingObserver {
        passes: Vec::new(),
        widths_ok: true,
    };

    let report = driver.run(&lhs, &rhs, &mut observer).unwrap();

    assert_eq!(observer.passes.len(), report.passes);
    assert_eq!(observer.passes, (1..=report.passes).collect::<Vec<_>>());
    assert!(observer.widths_ok);
}

#[test]
fn test_last_pass_carry_is_all_zero() {
    struct LastCarry(Vec<i64>);

    impl PassObserver for LastCarry {
        fn on_pass(&mut self, _pass: usize, snapshot: &PassSnapshot<'_>) {
            self.0 = snapshot.carry.to_vec();
        }
    }

    let lhs = DigitVector::from_decimal_str("555555555", WIDTH).unwrap();
    let rhs = DigitVector::from_decimal_str("555555555", WIDTH).unwrap();
    let mut backend = CpuBackend::new();
    let mut driver = CarryPropagator::new(&mut backend, 10, WIDTH).unwrap();
    let mut observer = LastCarry(Vec::new());

    driver.run(&lhs, &rhs, &mut observer).unwrap();
    assert!(observer.0.iter().all(|&c| c == 0));
}

#[test]
fn test_backend_is_reusable_across_runs() {
    let mut backend = CpuBackend::new();
    for _ in 0..3 {
        let lhs = DigitVector::from_decimal_str("42", WIDTH).unwrap();
        let rhs = DigitVector::from_decimal_str("58", WIDTH).unwrap();
        let mut driver = CarryPropagator::new(&mut backend, 10, WIDTH).unwrap();
        let report = driver.run(&lhs, &rhs, &mut NullObserver).unwrap();
        assert_eq!(
            report.digits.to_decimal_string(),
            format!("{:0>width$}", "100", width = WIDTH)
        );
    }
}

#[test]
fn test_adding_zero_is_identity() {
    // A settled sum plus zero must come back unchanged in a single pass.
    let (sum, _) = add_decimal("84357083924567890123", "5785994397568899987");
    let (again, passes) = add_decimal(sum.trim_start_matches('0'), "0");
    assert_eq!(again, sum);
    assert_eq!(passes, 1);
}

#[test]
fn test_overlong_operand_is_rejected() {
    let err = DigitVector::from_decimal_str(&"9".repeat(WIDTH), WIDTH).unwrap_err();
    assert!(matches!(err, SumError::InvalidOperand(_)));
}
