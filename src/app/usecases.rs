mod orientation;

pub use orientation::OrientationUsecases;
