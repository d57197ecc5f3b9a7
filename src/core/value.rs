use std::cmp::Ordering;
use std::fmt;

/// A single sortable cell extracted from a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    /// Total ordering used by the table view.
    ///
    /// Text compares case-insensitively; integers by natural order. Mixed
    /// kinds never occur within one column, but integers sort before text
    /// so the ordering stays total.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => compare_ignore_case(a, b),
            (Value::Integer(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Integer(_)) => Ordering::Greater,
        }
    }
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let lhs = a.chars().flat_map(char::to_lowercase);
    let rhs = b.chars().flat_map(char::to_lowercase);
    lhs.cmp(rhs)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_compares_case_insensitively() {
        let a = Value::from("alpha");
        let b = Value::from("Beta");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(Value::from("ERP").compare(&Value::from("erp")), Ordering::Equal);
    }

    #[test]
    fn test_integers_compare_naturally() {
        assert_eq!(Value::from(9i64).compare(&Value::from(10i64)), Ordering::Less);
        assert_eq!(Value::from(10i64).compare(&Value::from(9i64)), Ordering::Greater);
    }

    #[test]
    fn test_mixed_kinds_are_total() {
        assert_eq!(Value::from(1i64).compare(&Value::from("a")), Ordering::Less);
        assert_eq!(Value::from("a").compare(&Value::from(1i64)), Ordering::Greater);
    }
}
