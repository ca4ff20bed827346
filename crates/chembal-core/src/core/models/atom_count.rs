use indexmap::IndexMap;
use std::fmt;

/// Per-element atom tally of a molecule or of one side of an equation.
///
/// Elements keep the order in which they were first inserted. For a parsed
/// formula that is the order of first appearance scanning left to right,
/// which in turn fixes the row order of the stoichiometric matrix.
///
/// Equality ignores order: two tallies are equal when they hold the same
/// counts for the same elements.
#[derive(Debug, Clone, Default)]
pub struct AtomCount {
    counts: IndexMap<String, u64>,
}

impl AtomCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` atoms of `symbol`, creating the entry at the end if absent.
    ///
    /// A zero `count` leaves the tally untouched so that every stored count stays positive.
    pub fn add(&mut self, symbol: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(symbol) {
            Some(existing) => *existing = existing.saturating_add(count),
            None => {
                self.counts.insert(symbol.to_string(), count);
            }
        }
    }

    /// Count for `symbol`, or `0` when the element does not occur.
    pub fn get(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Element symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// `(symbol, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, &c)| (s.as_str(), c))
    }

    /// Adds `factor` copies of `other` to this tally.
    pub fn merge_scaled(&mut self, other: &AtomCount, factor: u64) {
        for (symbol, count) in other.iter() {
            self.add(symbol, count.saturating_mul(factor));
        }
    }
}

impl PartialEq for AtomCount {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(symbol, count)| other.get(symbol) == count)
    }
}

impl Eq for AtomCount {}

impl<S: Into<String>> FromIterator<(S, u64)> for AtomCount {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (symbol, count) in iter {
            tally.add(&symbol.into(), count);
        }
        tally
    }
}

impl fmt::Display for AtomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", symbol, count)?;
        }
        write!(f, "}}")
    }
}
