//! Port traits separating the training core from its observers

mod observer;

pub use observer::Observer;
