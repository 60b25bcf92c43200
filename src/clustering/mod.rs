pub mod abstraction;
pub mod histogram;
pub mod kmeans;
pub mod learner;
pub mod lookup;
