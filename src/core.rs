mod observation;
mod series;

pub use self::{observation::Observation, series::Series};
