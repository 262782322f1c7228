mod orientation;

pub use orientation::ORIENTATION;
