//! Domain checks for declared intervals.

use std::fmt;

use super::{TableInt, TestCase};

/// Largest value the target program accepts for `start`, `length` and `start + length`.
pub const DOMAIN_MAX: i64 = i64::MAX;

/// A case whose interval lies inside the supported domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInterval {
    pub start: i64,
    pub length: i64,
    /// Exclusive upper bound, `start + length`.
    pub end: i64,
    /// `start` and `length` as written in the table; passed to the program verbatim.
    pub args: [String; 2],
}

/// One failed domain check, carrying the operands as written in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Start(TableInt),
    Length(TableInt),
    Sum { start: TableInt, length: TableInt },
}

impl fmt::Display for Violation {
    /// The literal out-of-range operand or expression, e.g. `-5` or `1+9223372036854775807`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Start(v) | Violation::Length(v) => write!(f, "{v}"),
            Violation::Sum { start, length } => write!(f, "{start}+{length}"),
        }
    }
}

/// Checks [`TestCase`]s against the target program's numeric domain.
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    max: i128,
}

impl RangeValidator {
    /// Validator for the full signed 64-bit domain.
    pub fn new() -> Self {
        Self {
            max: DOMAIN_MAX as i128,
        }
    }

    /// Validate a case, returning the derived interval or every violated check in order.
    ///
    /// An operand too wide for `i128` is out of domain, and so is any sum it takes part in.
    pub fn validate(&self, case: &TestCase) -> Result<ValidatedInterval, Vec<Violation>> {
        let in_domain = |v: Option<i128>| v.is_some_and(|v| (0..=self.max).contains(&v));
        let mut violations = Vec::new();

        let (start, length) = (case.start.value(), case.length.value());
        if !in_domain(start) {
            violations.push(Violation::Start(case.start.clone()));
        }
        if !in_domain(length) {
            violations.push(Violation::Length(case.length.clone()));
        }

        let end = start.zip(length).and_then(|(s, l)| s.checked_add(l));
        if !in_domain(end) {
            violations.push(Violation::Sum {
                start: case.start.clone(),
                length: case.length.clone(),
            });
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        match (
            start.map(i64::try_from),
            length.map(i64::try_from),
            end.map(i64::try_from),
        ) {
            (Some(Ok(start)), Some(Ok(length)), Some(Ok(end))) => Ok(ValidatedInterval {
                start,
                length,
                end,
                args: [case.start.to_string(), case.length.to_string()],
            }),
            _ => Err(vec![Violation::Sum {
                start: case.start.clone(),
                length: case.length.clone(),
            }]),
        }
    }
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(token: &str) -> TableInt {
        TableInt::parse(token).unwrap()
    }

    fn case(start: impl ToString, length: impl ToString) -> TestCase {
        TestCase {
            start: int(&start.to_string()),
            length: int(&length.to_string()),
            expected_count: int("0"),
        }
    }

    #[test]
    fn test_accepts_valid_interval() {
        let interval = RangeValidator::new().validate(&case(10, 50)).unwrap();
        assert_eq!(
            interval,
            ValidatedInterval {
                start: 10,
                length: 50,
                end: 60,
                args: ["10".to_string(), "50".to_string()],
            }
        );
    }

    #[test]
    fn test_accepts_domain_edges() {
        let v = RangeValidator::new();
        let max = i64::MAX;
        assert_eq!(v.validate(&case(0, 0)).unwrap().end, 0);
        assert_eq!(v.validate(&case(max, 0)).unwrap().end, i64::MAX);
        assert_eq!(v.validate(&case(0, max)).unwrap().end, i64::MAX);
        assert_eq!(v.validate(&case(max - 5, 5)).unwrap().end, i64::MAX);
    }

    #[test]
    fn test_interval_keeps_table_literals() {
        let interval = RangeValidator::new().validate(&case("+7", "007")).unwrap();
        assert_eq!((interval.start, interval.length, interval.end), (7, 7, 14));
        assert_eq!(interval.args, ["+7".to_string(), "007".to_string()]);
    }

    #[test]
    fn test_negative_start_only() {
        let violations = RangeValidator::new().validate(&case(-5, 10)).unwrap_err();
        assert_eq!(violations, vec![Violation::Start(int("-5"))]);
        assert_eq!(violations[0].to_string(), "-5");
    }

    #[test]
    fn test_negative_start_and_sum() {
        let violations = RangeValidator::new().validate(&case(-50, 10)).unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::Start(int("-50")),
                Violation::Sum {
                    start: int("-50"),
                    length: int("10")
                }
            ]
        );
    }

    #[test]
    fn test_sum_overflow_with_valid_operands() {
        let max = i64::MAX;
        let violations = RangeValidator::new().validate(&case(max, 1)).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], Violation::Sum { .. }));
        assert_eq!(violations[0].to_string(), format!("{max}+1"));
    }

    #[test]
    fn test_every_check_in_order() {
        let too_big = i64::MAX as i128 + 1;
        let violations = RangeValidator::new()
            .validate(&case(too_big, -1))
            .unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::Start(int(&too_big.to_string())),
                Violation::Length(int("-1"))
            ]
        );

        let violations = RangeValidator::new()
            .validate(&case(too_big, too_big))
            .unwrap_err();
        assert!(matches!(
            violations.as_slice(),
            [
                Violation::Start(_),
                Violation::Length(_),
                Violation::Sum { .. }
            ]
        ));
    }

    #[test]
    fn test_negative_length() {
        let violations = RangeValidator::new().validate(&case(100, -1)).unwrap_err();
        assert_eq!(violations, vec![Violation::Length(int("-1"))]);
    }

    #[test]
    fn test_extreme_i128_operands_do_not_panic() {
        let violations = RangeValidator::new()
            .validate(&case(i128::MAX, i128::MAX))
            .unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_operand_wider_than_i128_is_rejected_with_its_text() {
        let huge = format!("1{}", "0".repeat(42));
        let violations = RangeValidator::new()
            .validate(&case(&huge, 10))
            .unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::Start(int(&huge)),
                Violation::Sum {
                    start: int(&huge),
                    length: int("10")
                }
            ]
        );
        assert_eq!(violations[1].to_string(), format!("{huge}+10"));
    }
}
