//! Automatic gain control example
//!
//! This example demonstrates how to:
//! - Step the gain up and down based on the Y channel
//! - Use the saturation flag to back off quickly
//! - Read IR2 alongside the XYZ channels

#[cfg(target_os = "linux")]
mod agc {
    use embedded_hal::i2c::I2c;
    use tcs3430::{Channels, Gain, Tcs3430};

    /// Full scale of one channel at the configured integration time
    pub const FULL_SCALE: u16 = u16::MAX;
    const SATURATION_THRESHOLD: u16 = FULL_SCALE / 10 * 9;
    const LOW_LIGHT_THRESHOLD: u16 = FULL_SCALE / 100;

    pub struct AutoGainController {
        current_gain: Gain,
        stable_readings: u8,
        min_stable_readings: u8,
    }

    impl AutoGainController {
        pub fn new() -> Self {
            Self {
                current_gain: Gain::X4,
                stable_readings: 0,
                min_stable_readings: 3,
            }
        }

        pub fn current_gain(&self) -> Gain {
            self.current_gain
        }

        pub fn update_gain<I2C, D>(
            &mut self,
            sensor: &mut Tcs3430<I2C, D>,
            channels: &Channels,
            saturated: bool,
        ) -> Result<bool, tcs3430::Error<I2C::Error>>
        where
            I2C: I2c,
        {
            let max_channel = channels.x.max(channels.y).max(channels.z);

            let new_gain = if saturated || max_channel > SATURATION_THRESHOLD {
                match self.current_gain {
                    Gain::X128 => Gain::X64,
                    Gain::X64 => Gain::X16,
                    Gain::X16 => Gain::X4,
                    Gain::X4 | Gain::X1 => Gain::X1,
                }
            } else if max_channel < LOW_LIGHT_THRESHOLD
                && self.stable_readings >= self.min_stable_readings
            {
                match self.current_gain {
                    Gain::X1 => Gain::X4,
                    Gain::X4 => Gain::X16,
                    Gain::X16 => Gain::X64,
                    Gain::X64 | Gain::X128 => Gain::X128,
                }
            } else {
                self.current_gain
            };

            if new_gain == self.current_gain {
                self.stable_readings = self.stable_readings.saturating_add(1);
                return Ok(false);
            }

            println!(
                "Gain: {:?} -> {:?} (max channel {})",
                self.current_gain, new_gain, max_channel
            );
            sensor.set_als_gain(new_gain)?;
            self.current_gain = new_gain;
            self.stable_readings = 0;
            Ok(true)
        }
    }
}

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use agc::AutoGainController;
    use embedded_hal::delay::DelayNs;
    use linux_embedded_hal::{Delay, I2cdev};
    use tcs3430::Tcs3430;

    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut delay = Delay;

    // The driver needs its own delay provider for IR2 reads
    let mut sensor = Tcs3430::new_with_delay(i2c, Delay);
    let mut agc = AutoGainController::new();

    println!("Initializing TCS3430 sensor with automatic gain control...");
    sensor
        .init()
        .map_err(|e| format!("init failed: {:?}", e))?;
    sensor
        .set_integration_time(100.0)
        .map_err(|e| format!("{:?}", e))?;
    sensor
        .set_als_gain(agc.current_gain())
        .map_err(|e| format!("{:?}", e))?;

    let integration_ms = sensor
        .integration_time()
        .map_err(|e| format!("{:?}", e))?;
    println!("- Integration time: {:.2} ms", integration_ms);
    println!("- Initial gain: {:?}", agc.current_gain());
    println!("Press Ctrl+C to exit\n");

    let mut reading_count = 0u32;

    loop {
        delay.delay_ms(200);
        reading_count += 1;

        let channels = sensor
            .read_channels()
            .map_err(|e| format!("{:?}", e))?;
        let saturated = sensor
            .is_als_saturated()
            .map_err(|e| format!("{:?}", e))?;

        let gain_changed = agc
            .update_gain(&mut sensor, &channels, saturated)
            .map_err(|e| format!("{:?}", e))?;
        if saturated {
            sensor
                .clear_als_saturated()
                .map_err(|e| format!("{:?}", e))?;
        }

        let lux = sensor.read_lux().map_err(|e| format!("{:?}", e))?;
        let percent = channels.y as u32 * 100 / agc::FULL_SCALE as u32;
        println!(
            "Reading #{:3}: Y: {:5} ({:2}%) | Lux: {:8.2} | Gain: {:?}",
            reading_count,
            channels.y,
            percent,
            lux,
            agc.current_gain()
        );

        if gain_changed {
            // Let the new gain take effect
            delay.delay_ms(300);
        }

        if reading_count % 10 == 0 {
            let ir2 = sensor.read_ir2().map_err(|e| format!("{:?}", e))?;
            println!("   IR1: {:5} IR2: {:5}", channels.ir1, ir2);
        }

        delay.delay_ms(1000);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
