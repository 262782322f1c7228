//! Domain layer - ports between the application and the outside world

pub mod ports;
