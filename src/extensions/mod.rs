//! Control layouts of the known extension controllers.
//!
//! Every controller is a view over [`ControlData`](crate::control_data::ControlData):
//! wrap a reference to read it, or a mutable reference to also write it (for emulating
//! a controller). The session itself can be wrapped, as it hands out its control data.

/// Generates getters and setters for active-low buttons of a controller view.
macro_rules! control_bits {
    ($view:ident { $($getter:ident, $setter:ident => $map:expr;)* }) => {
        impl<T: AsRef<$crate::control_data::ControlData>> $view<T> {
            $(
                #[must_use]
                pub fn $getter(&self) -> bool {
                    self.data.as_ref().bit($map)
                }
            )*
        }

        impl<T> $view<T>
        where
            T: AsRef<$crate::control_data::ControlData> + AsMut<$crate::control_data::ControlData>,
        {
            $(
                pub fn $setter(&mut self, pressed: bool) {
                    self.data.as_mut().set_bit(pressed, $map);
                }
            )*
        }
    };
}

/// Generates getters and setters for multi-bit controls of a controller view.
macro_rules! control_bytes {
    ($view:ident { $($getter:ident, $setter:ident => $map:expr;)* }) => {
        impl<T: AsRef<$crate::control_data::ControlData>> $view<T> {
            $(
                #[must_use]
                pub fn $getter(&self) -> u8 {
                    self.data.as_ref().field(&$map)
                }
            )*
        }

        impl<T> $view<T>
        where
            T: AsRef<$crate::control_data::ControlData> + AsMut<$crate::control_data::ControlData>,
        {
            $(
                pub fn $setter(&mut self, value: u8) {
                    self.data.as_mut().set_field(value, &$map);
                }
            )*
        }
    };
}

/// Declares a controller view struct wrapping its control data.
macro_rules! controller_view {
    ($(#[$meta:meta])* $view:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $view<T> {
            data: T,
        }

        impl<T: AsRef<$crate::control_data::ControlData>> $view<T> {
            pub const fn new(data: T) -> Self {
                Self { data }
            }

            #[must_use]
            pub fn control_data(&self) -> &$crate::control_data::ControlData {
                self.data.as_ref()
            }

            pub fn inner_mut(&mut self) -> &mut T {
                &mut self.data
            }

            pub fn into_inner(self) -> T {
                self.data
            }
        }
    };
}

pub mod classic;
pub mod drums;
pub mod guitar;
pub mod nunchuk;
pub mod turntable;

pub use classic::{ClassicButtons, ClassicController};
pub use drums::{DrumController, DrumVelocityId};
pub use guitar::GuitarController;
pub use nunchuk::{Nunchuk, NunchukButtons};
pub use turntable::{DjTurntable, EffectRollover, Turntable, TurntableConfig, TurntableSide};
