mod serde;

use itertools::Itertools;

use crate::core::Observation;

/// Full ordered history of observations, in capture order.
///
/// No deduplication: two observations may share a timestamp.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(try_from = "serde::Columns", into = "serde::Columns")]
pub struct Series(Vec<Observation>);

impl Series {
    pub fn push(&mut self, observation: Observation) {
        self.0.push(observation);
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.0.get(index)
    }

    pub fn last(&self) -> Option<&Observation> {
        self.0.last()
    }

    /// Indices of the observations captured on an exact hour.
    pub fn hour_ticks(&self) -> Vec<usize> {
        self.0.iter().positions(Observation::is_on_the_hour).collect()
    }
}

impl FromIterator<Observation> for Series {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
