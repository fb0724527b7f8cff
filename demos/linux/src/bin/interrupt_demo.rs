//! Interrupt-based sensor reading example
//!
//! This example demonstrates how to:
//! - Configure ALS interrupt thresholds and persistence
//! - Poll the interrupt and saturation flags
//! - Clear flags by writing back to STATUS

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use embedded_hal::delay::DelayNs;
    use linux_embedded_hal::{Delay, I2cdev};
    use tcs3430::{Config, Gain, Persistence, Tcs3430};

    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut delay = Delay;

    let mut sensor = Tcs3430::new(i2c);

    println!("Initializing TCS3430 sensor with interrupt support...");
    sensor
        .init()
        .map_err(|e| format!("init failed: {:?}", e))?;

    // Trigger when Y drops below 1000 or rises above 50000 for 2 cycles
    let config = Config::default()
        .with_gain(Gain::X4)
        .with_integration_time(100.0)
        .with_thresholds(1000, 50000, Persistence::Cycles2);
    sensor
        .configure(&config)
        .map_err(|e| format!("{:?}", e))?;
    sensor
        .enable_als_interrupt(true)
        .map_err(|e| format!("{:?}", e))?;
    sensor
        .enable_saturation_interrupt(true)
        .map_err(|e| format!("{:?}", e))?;

    println!("Sensor configured with interrupt thresholds:");
    println!("- Low threshold: 1000");
    println!("- High threshold: 50000");
    println!("- Persistence: {} consecutive cycles", Persistence::Cycles2.cycles());
    println!("\nMonitoring for interrupt conditions...");
    println!("Press Ctrl+C to exit\n");

    let mut reading_count = 0;

    loop {
        delay.delay_ms(200);
        reading_count += 1;

        let channels = sensor
            .read_channels()
            .map_err(|e| format!("{:?}", e))?;
        let status = sensor.status().map_err(|e| format!("{:?}", e))?;

        if status.saturated {
            println!("Reading #{:3}: Y: {:6} - ALS saturated", reading_count, channels.y);
            sensor
                .clear_als_saturated()
                .map_err(|e| format!("{:?}", e))?;
        }

        if status.interrupt {
            println!(
                "INTERRUPT #{}: Y: {:6} - threshold exceeded",
                reading_count, channels.y
            );
            // Re-asserts next cycle if Y is still out of range
            sensor
                .clear_als_interrupt()
                .map_err(|e| format!("{:?}", e))?;
        } else {
            println!("Reading #{:3}: Y: {:6} - Normal", reading_count, channels.y);
        }

        delay.delay_ms(1000);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
