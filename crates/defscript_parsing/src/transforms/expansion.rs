/// The result of transforming a node that may expand into several
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion<T> {
    Single(T),
    Spread(Vec<T>),
}

impl<T> Expansion<T> {
    pub fn is_spread(&self) -> bool {
        matches!(self, Expansion::Spread(_))
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Expansion::Single(single) => vec![single],
            Expansion::Spread(spread) => spread,
        }
    }

    /// Collapses a spread of exactly one node into a single
    pub fn normalize(self) -> Self {
        match self {
            Expansion::Spread(mut spread) if spread.len() == 1 => match spread.pop() {
                Some(single) => Expansion::Single(single),
                None => Expansion::Spread(spread),
            },
            other => other,
        }
    }
}

impl<T> From<T> for Expansion<T> {
    fn from(value: T) -> Self {
        Expansion::Single(value)
    }
}

impl<T> IntoIterator for Expansion<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
