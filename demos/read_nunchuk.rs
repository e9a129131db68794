use std::time::Duration;

use wii_extension::extensions::Nunchuk;
use wii_extension::native::DEFAULT_BUS_PATH;
use wii_extension::prelude::*;

fn main() -> ExtensionResult<()> {
    env_logger::init();

    // Nunchuk wired to the first I2C bus of the board
    let port = NativePort::open(DEFAULT_BUS_PATH)?;
    let mut controller = ExtensionController::for_controller(port, ControllerType::Nunchuk);

    while let Err(error) = controller.connect() {
        eprintln!("Nunchuk not ready: {error}");
        std::thread::sleep(Duration::from_secs(1));
    }

    loop {
        match controller.poll() {
            Ok(()) => {
                let nunchuk = Nunchuk::new(&controller);
                println!(
                    "Joy:({:3}, {:3}) | Accel:({:4}, {:4}, {:4}) | Roll: {:6.1} Pitch: {:6.1} | {:?}",
                    nunchuk.joy_x(),
                    nunchuk.joy_y(),
                    nunchuk.accel_x(),
                    nunchuk.accel_y(),
                    nunchuk.accel_z(),
                    nunchuk.roll_angle(),
                    nunchuk.pitch_angle(),
                    nunchuk.buttons(),
                );
            }
            Err(error) => {
                eprintln!("Lost the nunchuk ({error}), reconnecting");
                controller.reconnect().ok();
            }
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
