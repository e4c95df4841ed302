use std::fmt;

/// Opaque identifier of a table column or row.
///
/// Keys are hashable and totally ordered. Multi-level column headers or row
/// indexes are represented by [`Key::Tuple`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
    Tuple(Vec<Key>),
}

impl Key {
    /// Build a composite key from its levels.
    #[must_use]
    pub fn tuple<K: Into<Key>>(levels: impl IntoIterator<Item = K>) -> Self {
        Key::Tuple(levels.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) | Key::Tuple(_) => None,
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Key::Int(i64::from(v))
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Str(v.to_owned())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Str(v)
    }
}

impl From<&Key> for Key {
    fn from(v: &Key) -> Self {
        v.clone()
    }
}

impl<A: Into<Key>, B: Into<Key>> From<(A, B)> for Key {
    fn from((a, b): (A, B)) -> Self {
        Key::Tuple(vec![a.into(), b.into()])
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{v}"),
            Key::Str(v) => write!(f, "\"{v}\""),
            Key::Tuple(levels) => {
                write!(f, "(")?;
                for (i, level) in levels.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{level}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Key::from(3_i64), Key::Int(3));
        assert_eq!(Key::from(3_i32), Key::Int(3));
        assert_eq!(Key::from("a"), Key::Str("a".to_owned()));
        assert_eq!(
            Key::from(("a", 1_i64)),
            Key::Tuple(vec![Key::Str("a".into()), Key::Int(1)])
        );
        assert_eq!(Key::tuple(["x", "y"]), Key::from(("x", "y")));
    }

    #[test]
    fn display() {
        assert_eq!(Key::Int(4).to_string(), "4");
        assert_eq!(Key::from("a").to_string(), "\"a\"");
        assert_eq!(Key::from(("a", 1_i64)).to_string(), "(\"a\", 1)");
    }

    #[test]
    fn ordering_is_total() {
        let mut keys = vec![Key::from("b"), Key::Int(2), Key::from("a"), Key::Int(1)];
        keys.sort();
        assert_eq!(
            keys,
            vec![Key::Int(1), Key::Int(2), Key::from("a"), Key::from("b")]
        );
    }

    #[test]
    fn as_str() {
        assert_eq!(Key::from("col").as_str(), Some("col"));
        assert_eq!(Key::Int(1).as_str(), None);
    }
}
