//! Application layer - use cases built on top of the domain ports

mod usecases;

pub use usecases::OrientationUsecases;
