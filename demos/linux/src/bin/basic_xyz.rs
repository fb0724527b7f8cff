//! Basic XYZ sensor reading example
//!
//! This example demonstrates how to:
//! - Initialize the TCS3430 sensor
//! - Configure gain and integration time
//! - Read X, Y, Z and IR1 values
//! - Calculate lux, chromaticity and color temperature

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use embedded_hal::delay::DelayNs;
    use linux_embedded_hal::{Delay, I2cdev};
    use tcs3430::{Config, Error, Gain, Tcs3430};

    // Initialize I2C interface
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut delay = Delay;

    let mut sensor = Tcs3430::new(i2c);

    println!("Initializing TCS3430 sensor...");
    sensor
        .init()
        .map_err(|e| format!("init failed: {:?}", e))?;

    let revision = sensor
        .revision_id()
        .map_err(|e| format!("{:?}", e))?;
    println!("Revision: 0x{:02X}", revision);

    let config = Config::default()
        .with_gain(Gain::X16)
        .with_integration_time(100.0);
    sensor
        .configure(&config)
        .map_err(|e| format!("{:?}", e))?;

    println!("Sensor configured. Starting measurements...");
    println!("Press Ctrl+C to exit\n");

    loop {
        // Let at least one integration cycle complete
        delay.delay_ms(200);

        let channels = sensor
            .read_channels()
            .map_err(|e| format!("{:?}", e))?;
        let lux = sensor.read_lux().map_err(|e| format!("{:?}", e))?;

        match sensor.read_cie() {
            Ok(cie) => {
                let cct = tcs3430::cct_from_chromaticity(cie.x, cie.y);
                println!(
                    "X: {:5} Y: {:5} Z: {:5} IR1: {:5} | Lux: {:8.2} | CCT: {:5.0}K | x: {:.4} y: {:.4}",
                    channels.x, channels.y, channels.z, channels.ir1, lux, cct, cie.x, cie.y
                );
            }
            Err(Error::ZeroChannelSum) => {
                println!(
                    "X: {:5} Y: {:5} Z: {:5} IR1: {:5} | Lux: {:8.2} | too dark for chromaticity",
                    channels.x, channels.y, channels.z, channels.ir1, lux
                );
            }
            Err(e) => return Err(format!("{:?}", e).into()),
        }

        delay.delay_ms(1000);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
