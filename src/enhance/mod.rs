//! Image enhancement core: parameter vector, estimator and staged pipeline.

pub mod color;
pub mod estimator;
pub mod params;
pub mod pipeline;
pub mod profiles;
pub mod stages;
