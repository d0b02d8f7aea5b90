//! Station and port directory flows

pub mod service;

pub use service::StationDirectory;
