use std::fmt::{Display, Formatter};

/// A key extended with the two sentinel bounds.
///
/// Variant order gives `NegInf < Value(_) < PosInf` for every value, so the header and tail
/// never compare equal to anything a caller can insert.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Key<K> {
    NegInf,
    Value(K),
    PosInf,
}

impl<K> Key<K> {
    pub fn value(&self) -> Option<&K> {
        match self {
            Key::Value(k) => Some(k),
            _ => None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Key::Value(_))
    }
}

impl<K: Ord> Key<K> {
    #[inline]
    pub(crate) fn lt_value(&self, other: &K) -> bool {
        match self {
            Key::NegInf => true,
            Key::Value(k) => k < other,
            Key::PosInf => false,
        }
    }

    #[inline]
    pub(crate) fn eq_value(&self, other: &K) -> bool {
        matches!(self, Key::Value(k) if k == other)
    }
}

impl<K> From<K> for Key<K> {
    fn from(k: K) -> Self {
        Key::Value(k)
    }
}

impl<K: Display> Display for Key<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::NegInf => f.write_str("HEAD"),
            Key::Value(k) => k.fmt(f),
            Key::PosInf => f.write_str("NIL"),
        }
    }
}
