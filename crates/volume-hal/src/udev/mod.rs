//! Helpers for data reported by udev.

pub mod properties;
