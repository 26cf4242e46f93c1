/// Device benefit module
pub mod device_benefit;

/// Session structures
pub mod session;
