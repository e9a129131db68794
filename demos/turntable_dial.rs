use std::time::Duration;

use wii_extension::extensions::{DjTurntable, EffectRollover};
use wii_extension::native::DEFAULT_BUS_PATH;
use wii_extension::prelude::*;

fn main() -> ExtensionResult<()> {
    env_logger::init();

    let port = NativePort::open(DEFAULT_BUS_PATH)?;
    let mut controller = ExtensionController::for_controller(port, ControllerType::DjTurntable);
    controller.connect()?;

    let mut dj = DjTurntable::new(&mut controller);
    let mut rollover = EffectRollover::new();
    let mut position: i32 = 0;

    loop {
        let change = rollover.change(&dj);
        if change != 0 {
            position += i32::from(change);
            println!(
                "Effect dial moved {change:+} to {position} ({} turntables, fade {})",
                dj.num_turntables(),
                dj.crossfade_slider(),
            );
        }

        std::thread::sleep(Duration::from_millis(20));

        match dj.inner_mut().poll() {
            Ok(()) => {}
            // A garbled read is dropped, the next poll usually succeeds
            Err(ExtensionError::InvalidPayload(fault)) => eprintln!("Skipped a bad read: {fault}"),
            Err(error) => return Err(error),
        }
    }
}
