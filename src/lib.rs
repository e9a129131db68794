#![allow(clippy::module_name_repetitions)]

pub mod bitfield;
pub mod control_data;
mod device;
pub mod extensions;
pub mod hal;
pub mod identity;
pub mod native;
pub mod port;
mod result;
pub mod rollover;

pub use control_data::CONTROL_DATA_MAX;

pub mod prelude {
    pub use crate::bitfield::{BitMap, ByteMap, ControlField};
    pub use crate::control_data::{ControlData, PayloadFault};
    pub use crate::device::{ConnectionState, ExtensionController, ExtensionData};
    pub use crate::hal::HalPort;
    pub use crate::identity::ControllerType;
    pub use crate::native::NativePort;
    pub use crate::port::{ExtensionPort, TransportError};
    pub use crate::result::*;
    pub use crate::rollover::RolloverChange;
    pub use crate::CONTROL_DATA_MAX;
}
