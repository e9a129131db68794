#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod null;

#[cfg(target_os = "linux")]
pub use linux::LinuxPort as NativePort;

#[cfg(not(target_os = "linux"))]
pub use null::NullPort as NativePort;

/// Default i2c-dev node of the first bus.
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";
