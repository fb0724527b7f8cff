//! # TCS3430 Color and Ambient Light Sensor Driver
//!
//! This is a platform-agnostic Rust driver for the ams TCS3430 XYZ tristimulus color and
//! ambient light sensor, built using the [`embedded-hal`] traits for I2C communication.
//!
//! The TCS3430 provides:
//! - X, Y, Z and IR1 channels, plus an IR2 channel multiplexed with X
//! - Programmable gain (1x to 128x)
//! - Programmable integration and wait time (2.78ms steps)
//! - Interrupt support with configurable thresholds and persistence
//! - I2C interface (address 0x39)
//!
//! ## Features
//!
//! - **Register-level API** for every documented configuration field
//! - **Burst channel reads** that keep the X/IR2 multiplexer consistent
//! - **CIE 1931 chromaticity**, **lux** and **correlated color temperature**
//! - **Optional `defmt` support** through the `defmt-03` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tcs3430::{Gain, Tcs3430};
//!
//! # fn main() {
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let mut sensor = Tcs3430::new(i2c);
//!
//! // Check the chip ID, power on and enable ALS
//! sensor.init().unwrap();
//!
//! // Configure measurement settings
//! sensor.set_als_gain(Gain::X16).unwrap();
//! sensor.set_integration_time(100.0).unwrap();
//!
//! // Wait for an integration cycle, then read
//! // let channels = sensor.read_channels().unwrap();
//! // println!("X: {}, Y: {}, Z: {}, IR1: {}", channels.x, channels.y, channels.z, channels.ir1);
//!
//! // let lux = sensor.read_lux().unwrap();
//! // let cct = sensor.read_cct().unwrap();
//! # }
//! ```
//!
//! ## Reading IR2
//!
//! IR2 shares an ADC slot with X. [`Tcs3430::read_ir2`] switches the multiplexer, waits one
//! integration period and switches back, so it needs a delay provider:
//!
//! ```rust,ignore
//! let mut sensor = Tcs3430::new_with_delay(i2c, delay);
//! sensor.init()?;
//! let ir2 = sensor.read_ir2()?;
//! ```
//!
//! ## Concurrency
//!
//! Every bus operation takes `&mut self`. To share one sensor between contexts, wrap the driver
//! in a mutex; the multiplexer save/switch/restore in [`Tcs3430::read_channels`] and
//! [`Tcs3430::read_ir2`] is only correct if nothing else touches CFG1 in between.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

#![no_std]
#![deny(missing_docs)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

pub mod registers;

use registers::Field;

/// Default I2C address of the TCS3430
pub const DEFAULT_ADDRESS: u8 = 0x39;

/// Duration of one integration or wait cycle in milliseconds
pub const CYCLE_MS: f64 = 2.78;

/// ALS gain settings
///
/// 128x is not a separate AGAIN code: it is 64x with the HGAIN bit set in CFG2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Gain {
    /// 1x gain
    X1 = 0x0,
    /// 4x gain
    X4 = 0x1,
    /// 16x gain
    X16 = 0x2,
    /// 64x gain
    X64 = 0x3,
    /// 128x gain (64x plus HGAIN)
    X128 = 0x4,
}

impl Gain {
    /// Value written to the 2-bit AGAIN field
    pub const fn again_code(self) -> u8 {
        match self {
            Gain::X128 => Gain::X64 as u8,
            other => other as u8,
        }
    }

    /// Value written to the HGAIN bit
    pub const fn high_gain(self) -> bool {
        matches!(self, Gain::X128)
    }

    /// Decode the AGAIN field and HGAIN bit
    pub const fn from_fields(again: u8, high_gain: bool) -> Self {
        match again & 0x03 {
            0x0 => Gain::X1,
            0x1 => Gain::X4,
            0x2 => Gain::X16,
            _ if high_gain => Gain::X128,
            _ => Gain::X64,
        }
    }

    /// Multiplier used by the lux calculation
    ///
    /// 64x and 128x are measured values, not the nominal gain.
    pub const fn lux_multiplier(self) -> f32 {
        match self {
            Gain::X1 => 1.0,
            Gain::X4 => 4.0,
            Gain::X16 => 16.0,
            Gain::X64 => 66.0,
            Gain::X128 => 137.0,
        }
    }
}

/// ALS interrupt persistence: how many consecutive out-of-range cycles assert the interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Persistence {
    /// Every ALS cycle
    Every = 0x0,
    /// 1 consecutive value out of range
    Cycles1 = 0x1,
    /// 2 consecutive values out of range
    Cycles2 = 0x2,
    /// 3 consecutive values out of range
    Cycles3 = 0x3,
    /// 5 consecutive values out of range
    Cycles5 = 0x4,
    /// 10 consecutive values out of range
    Cycles10 = 0x5,
    /// 15 consecutive values out of range
    Cycles15 = 0x6,
    /// 20 consecutive values out of range
    Cycles20 = 0x7,
    /// 25 consecutive values out of range
    Cycles25 = 0x8,
    /// 30 consecutive values out of range
    Cycles30 = 0x9,
    /// 35 consecutive values out of range
    Cycles35 = 0xA,
    /// 40 consecutive values out of range
    Cycles40 = 0xB,
    /// 45 consecutive values out of range
    Cycles45 = 0xC,
    /// 50 consecutive values out of range
    Cycles50 = 0xD,
    /// 55 consecutive values out of range
    Cycles55 = 0xE,
    /// 60 consecutive values out of range
    Cycles60 = 0xF,
}

impl Persistence {
    /// Decode the 4-bit APERS field; upper bits are ignored
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0x0 => Persistence::Every,
            0x1 => Persistence::Cycles1,
            0x2 => Persistence::Cycles2,
            0x3 => Persistence::Cycles3,
            0x4 => Persistence::Cycles5,
            0x5 => Persistence::Cycles10,
            0x6 => Persistence::Cycles15,
            0x7 => Persistence::Cycles20,
            0x8 => Persistence::Cycles25,
            0x9 => Persistence::Cycles30,
            0xA => Persistence::Cycles35,
            0xB => Persistence::Cycles40,
            0xC => Persistence::Cycles45,
            0xD => Persistence::Cycles50,
            0xE => Persistence::Cycles55,
            _ => Persistence::Cycles60,
        }
    }

    /// Number of consecutive out-of-range cycles, 0 for [`Persistence::Every`]
    pub const fn cycles(self) -> u8 {
        match self {
            Persistence::Every => 0,
            Persistence::Cycles1 => 1,
            Persistence::Cycles2 => 2,
            Persistence::Cycles3 => 3,
            other => (other as u8 - 3) * 5,
        }
    }
}

/// One burst of channel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Channels {
    /// X channel (CH3 with the multiplexer on X)
    pub x: u16,
    /// Y channel (CH1)
    pub y: u16,
    /// Z channel (CH0)
    pub z: u16,
    /// IR1 channel (CH2)
    pub ir1: u16,
}

/// CIE 1931 chromaticity coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Chromaticity {
    /// CIE x
    pub x: f32,
    /// CIE y
    pub y: f32,
}

/// Decoded STATUS register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Status {
    /// ALS saturation (ASAT)
    pub saturated: bool,
    /// ALS interrupt (AINT)
    pub interrupt: bool,
}

/// Measurement configuration applied by [`Tcs3430::configure`]
///
/// The default matches the register values after power-on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Config {
    /// ALS gain
    pub gain: Gain,
    /// Raw ATIME value (N encodes N + 1 cycles)
    pub integration_cycles: u8,
    /// Raw WTIME value (N encodes N + 1 cycles)
    pub wait_cycles: u8,
    /// Insert the wait time between ALS cycles
    pub wait_enable: bool,
    /// Multiply the wait time by 12
    pub wait_long: bool,
    /// Interrupt persistence filter
    pub persistence: Persistence,
    /// ALS interrupt low threshold
    pub threshold_low: u16,
    /// ALS interrupt high threshold
    pub threshold_high: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gain: Gain::X1,
            integration_cycles: 0,
            wait_cycles: 0,
            wait_enable: false,
            wait_long: false,
            persistence: Persistence::Every,
            threshold_low: 0,
            threshold_high: 0,
        }
    }
}

impl Config {
    /// Set the gain
    pub const fn with_gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    /// Set the integration time as a raw cycle count
    pub const fn with_integration_cycles(mut self, cycles: u8) -> Self {
        self.integration_cycles = cycles;
        self
    }

    /// Set the integration time in milliseconds (truncated to whole cycles)
    pub fn with_integration_time(mut self, ms: f32) -> Self {
        self.integration_cycles = ms_to_cycles(ms);
        self
    }

    /// Set the wait time as a raw cycle count and enable waiting
    pub const fn with_wait_cycles(mut self, cycles: u8) -> Self {
        self.wait_cycles = cycles;
        self.wait_enable = true;
        self
    }

    /// Enable the x12 wait multiplier
    pub const fn with_wait_long(mut self, enable: bool) -> Self {
        self.wait_long = enable;
        self
    }

    /// Set the interrupt thresholds and persistence
    pub const fn with_thresholds(mut self, low: u16, high: u16, persistence: Persistence) -> Self {
        self.threshold_low = low;
        self.threshold_high = high;
        self.persistence = persistence;
        self
    }
}

/// All possible errors in this crate
#[derive(Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Invalid device ID detected
    InvalidDeviceId {
        /// Expected device ID
        expected: u8,
        /// Found device ID
        found: u8,
    },
    /// X + Y + Z is zero, so chromaticity is undefined
    ZeroChannelSum,
}

/// Convert a raw ATIME/WTIME value to milliseconds
pub fn cycles_to_ms(cycles: u8) -> f32 {
    ((cycles as f64 + 1.0) * CYCLE_MS) as f32
}

/// Convert milliseconds to a raw ATIME/WTIME value
///
/// Truncates, then wraps into a byte: no rounding and no clamping, so out-of-range inputs land
/// on an arbitrary cycle count.
pub fn ms_to_cycles(ms: f32) -> u8 {
    (libm::floor(ms as f64 / CYCLE_MS) as i32).wrapping_sub(1) as u8
}

/// Compute CIE 1931 chromaticity from a channel burst
///
/// Returns `None` when X + Y + Z is zero.
pub fn cie_from_channels(channels: &Channels) -> Option<Chromaticity> {
    let sum = channels.x as f32 + channels.y as f32 + channels.z as f32;
    if sum <= 0.0 {
        return None;
    }

    Some(Chromaticity {
        x: channels.x as f32 / sum,
        y: channels.y as f32 / sum,
    })
}

/// Compute lux from the Y channel, gain and integration time
pub fn lux_from_channels(y: u16, gain: Gain, integration_ms: f32) -> f32 {
    if integration_ms <= 0.0 {
        return 0.0;
    }
    y as f32 / gain.lux_multiplier() / (integration_ms / 1000.0)
}

/// McCamy's approximation of correlated color temperature in Kelvin
///
/// `y == 0.1858` divides by zero and yields an infinite or NaN result.
pub fn cct_from_chromaticity(x: f32, y: f32) -> f32 {
    let n = (x - 0.3320) / (0.1858 - y);
    (449.0 * n * n * n) + (3525.0 * n * n) + (6823.3 * n) + 5520.33
}

/// High-level TCS3430 driver
pub struct Tcs3430<I2C, Delay = ()> {
    i2c: I2C,
    address: u8,
    delay: Delay,
}

impl<I2C, E> Tcs3430<I2C, ()>
where
    I2C: I2c<Error = E>,
{
    /// Create a new driver at the default address without delay support
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a new driver at a custom address without delay support
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            delay: (),
        }
    }
}

impl<I2C, E, Delay> Tcs3430<I2C, Delay>
where
    I2C: I2c<Error = E>,
    Delay: DelayNs,
{
    /// Create a new driver at the default address with delay support
    pub fn new_with_delay(i2c: I2C, delay: Delay) -> Self {
        Self::new_with_address_and_delay(i2c, DEFAULT_ADDRESS, delay)
    }

    /// Create a new driver at a custom address with delay support
    pub fn new_with_address_and_delay(i2c: I2C, address: u8, delay: Delay) -> Self {
        Self {
            i2c,
            address,
            delay,
        }
    }

    /// Read the IR2 channel
    ///
    /// Switches the multiplexer to IR2, blocks for one integration period so the ADC picks up
    /// the new input, reads CH3 and switches back to X if X was selected before.
    pub fn read_ir2(&mut self) -> Result<u16, Error<E>> {
        let was_ir2 = self.als_mux_ir2()?;
        self.set_als_mux_ir2(true)?;

        let ir2 = self.settle_and_read_ch3();

        if !was_ir2 && self.set_als_mux_ir2(false).is_err() {
            #[cfg(feature = "defmt-03")]
            defmt::warn!("failed to restore ALS MUX to X after IR2 read");
        }

        ir2
    }

    fn settle_and_read_ch3(&mut self) -> Result<u16, Error<E>> {
        let settle_ms = self.integration_time()? as u32;
        #[cfg(feature = "defmt-03")]
        defmt::debug!("waiting {} ms for IR2 to settle", settle_ms);
        self.delay.delay_ms(settle_ms);
        self.read_u16(registers::CH3DATAL)
    }
}

impl<I2C, E, Delay> Tcs3430<I2C, Delay>
where
    I2C: I2c<Error = E>,
{
    /// Verify the chip ID, power the device on and enable ALS
    pub fn init(&mut self) -> Result<(), Error<E>> {
        let id = self.device_id()?;
        if id != registers::CHIP_ID {
            return Err(Error::InvalidDeviceId {
                expected: registers::CHIP_ID,
                found: id,
            });
        }

        self.power_on(true)?;
        self.enable_als(true)?;

        #[cfg(feature = "defmt-03")]
        defmt::debug!("TCS3430 at {=u8:#x} powered on, ALS enabled", self.address);

        Ok(())
    }

    /// Apply a measurement configuration
    ///
    /// Stops at the first failed write; fields written before it keep their new values.
    pub fn configure(&mut self, config: &Config) -> Result<(), Error<E>> {
        self.set_als_gain(config.gain)?;
        self.set_integration_cycles(config.integration_cycles)?;
        self.set_wait_cycles(config.wait_cycles)?;
        self.set_wait_long(config.wait_long)?;
        self.set_interrupt_persistence(config.persistence)?;
        self.set_als_threshold_low(config.threshold_low)?;
        self.set_als_threshold_high(config.threshold_high)?;
        self.enable_wait(config.wait_enable)
    }

    /// I2C address the driver talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read the device ID register
    pub fn device_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(registers::ID)
    }

    /// Read the revision ID register
    pub fn revision_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(registers::REVID)
    }

    /// Set the raw integration cycle count (N encodes N + 1 cycles)
    pub fn set_integration_cycles(&mut self, cycles: u8) -> Result<(), Error<E>> {
        self.write_register(registers::ATIME, cycles)
    }

    /// Get the raw integration cycle count
    pub fn integration_cycles(&mut self) -> Result<u8, Error<E>> {
        self.read_register(registers::ATIME)
    }

    /// Set the integration time in milliseconds, see [`ms_to_cycles`]
    pub fn set_integration_time(&mut self, ms: f32) -> Result<(), Error<E>> {
        self.set_integration_cycles(ms_to_cycles(ms))
    }

    /// Get the integration time in milliseconds
    pub fn integration_time(&mut self) -> Result<f32, Error<E>> {
        Ok(cycles_to_ms(self.integration_cycles()?))
    }

    /// Set the raw wait cycle count (N encodes N + 1 cycles)
    pub fn set_wait_cycles(&mut self, cycles: u8) -> Result<(), Error<E>> {
        self.write_register(registers::WTIME, cycles)
    }

    /// Get the raw wait cycle count
    pub fn wait_cycles(&mut self) -> Result<u8, Error<E>> {
        self.read_register(registers::WTIME)
    }

    /// Set the wait time in milliseconds, see [`ms_to_cycles`]
    pub fn set_wait_time(&mut self, ms: f32) -> Result<(), Error<E>> {
        self.set_wait_cycles(ms_to_cycles(ms))
    }

    /// Get the wait time in milliseconds
    ///
    /// Does not include the x12 factor of [`Tcs3430::set_wait_long`].
    pub fn wait_time(&mut self) -> Result<f32, Error<E>> {
        Ok(cycles_to_ms(self.wait_cycles()?))
    }

    /// Set the ALS interrupt low threshold
    pub fn set_als_threshold_low(&mut self, threshold: u16) -> Result<(), Error<E>> {
        self.write_u16(registers::AILTL, threshold)
    }

    /// Get the ALS interrupt low threshold
    pub fn als_threshold_low(&mut self) -> Result<u16, Error<E>> {
        self.read_u16(registers::AILTL)
    }

    /// Set the ALS interrupt high threshold
    pub fn set_als_threshold_high(&mut self, threshold: u16) -> Result<(), Error<E>> {
        self.write_u16(registers::AIHTL, threshold)
    }

    /// Get the ALS interrupt high threshold
    pub fn als_threshold_high(&mut self) -> Result<u16, Error<E>> {
        self.read_u16(registers::AIHTL)
    }

    /// Set the interrupt persistence filter
    pub fn set_interrupt_persistence(&mut self, persistence: Persistence) -> Result<(), Error<E>> {
        self.write_field(registers::APERS, persistence as u8)
    }

    /// Get the interrupt persistence filter
    pub fn interrupt_persistence(&mut self) -> Result<Persistence, Error<E>> {
        Ok(Persistence::from_bits(self.read_field(registers::APERS)?))
    }

    /// Enable or disable the x12 wait time multiplier
    pub fn set_wait_long(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::WLONG, enable)
    }

    /// Check if the x12 wait time multiplier is enabled
    pub fn wait_long(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::WLONG)
    }

    /// Route IR2 (`true`) or X (`false`) to CH3
    pub fn set_als_mux_ir2(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::AMUX, enable)
    }

    /// Check whether CH3 currently carries IR2
    pub fn als_mux_ir2(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::AMUX)
    }

    /// Set the ALS gain
    ///
    /// Writes AGAIN in CFG1, then HGAIN in CFG2. If the second write fails the first is not
    /// undone, leaving the hardware with the new AGAIN and the old HGAIN.
    pub fn set_als_gain(&mut self, gain: Gain) -> Result<(), Error<E>> {
        self.write_field(registers::AGAIN, gain.again_code())?;
        self.write_flag(registers::HGAIN, gain.high_gain())
    }

    /// Get the ALS gain
    pub fn als_gain(&mut self) -> Result<Gain, Error<E>> {
        let again = self.read_field(registers::AGAIN)?;
        let high_gain = self.read_flag(registers::HGAIN)?;
        Ok(Gain::from_fields(again, high_gain))
    }

    /// Read STATUS once and decode both flags
    pub fn status(&mut self) -> Result<Status, Error<E>> {
        let status = self.read_register(registers::STATUS)?;
        Ok(Status {
            saturated: registers::ASAT.get(status) != 0,
            interrupt: registers::AINT.get(status) != 0,
        })
    }

    /// Check if the ALS saturated
    pub fn is_als_saturated(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::ASAT)
    }

    /// Clear the saturation flag only
    pub fn clear_als_saturated(&mut self) -> Result<(), Error<E>> {
        self.write_register(registers::STATUS, registers::STATUS_CLEAR_SATURATION)
    }

    /// Check if the ALS interrupt is active
    pub fn is_als_interrupt(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::AINT)
    }

    /// Clear all STATUS flags
    ///
    /// If the threshold condition persists while ALS runs, AINT asserts again on the next
    /// integration cycle.
    pub fn clear_als_interrupt(&mut self) -> Result<(), Error<E>> {
        self.write_register(registers::STATUS, registers::STATUS_CLEAR_ALL)
    }

    /// Read X, Y, Z and IR1 in a single burst
    ///
    /// If CH3 is routed to IR2 it is switched to X for the burst and switched back afterwards,
    /// also when the burst itself fails.
    pub fn read_channels(&mut self) -> Result<Channels, Error<E>> {
        let was_ir2 = self.als_mux_ir2()?;
        if was_ir2 {
            #[cfg(feature = "defmt-03")]
            defmt::debug!("switching ALS MUX to X for channel burst");
            self.set_als_mux_ir2(false)?;
        }

        // CH0 (Z), CH1 (Y), CH2 (IR1), CH3 (X)
        let mut buffer = [0u8; 8];
        let burst = self
            .i2c
            .write_read(self.address, &[registers::CH0DATAL], &mut buffer)
            .map_err(Error::I2c);

        if was_ir2 && self.set_als_mux_ir2(true).is_err() {
            #[cfg(feature = "defmt-03")]
            defmt::warn!("failed to restore ALS MUX to IR2 after channel burst");
        }
        burst?;

        Ok(Channels {
            z: u16::from_le_bytes([buffer[0], buffer[1]]),
            y: u16::from_le_bytes([buffer[2], buffer[3]]),
            ir1: u16::from_le_bytes([buffer[4], buffer[5]]),
            x: u16::from_le_bytes([buffer[6], buffer[7]]),
        })
    }

    /// Read the channels and compute CIE 1931 chromaticity
    pub fn read_cie(&mut self) -> Result<Chromaticity, Error<E>> {
        let channels = self.read_channels()?;
        cie_from_channels(&channels).ok_or(Error::ZeroChannelSum)
    }

    /// Read the channels and compute lux from the Y channel
    pub fn read_lux(&mut self) -> Result<f32, Error<E>> {
        let channels = self.read_channels()?;
        let gain = self.als_gain()?;
        let integration_ms = self.integration_time()?;
        Ok(lux_from_channels(channels.y, gain, integration_ms))
    }

    /// Read the channels and compute correlated color temperature in Kelvin
    pub fn read_cct(&mut self) -> Result<f32, Error<E>> {
        let cie = self.read_cie()?;
        Ok(cct_from_chromaticity(cie.x, cie.y))
    }

    /// Clear interrupt flags whenever STATUS is read
    pub fn set_interrupt_clear_on_read(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::INT_READ_CLEAR, enable)
    }

    /// Check if interrupt flags clear on STATUS read
    pub fn interrupt_clear_on_read(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::INT_READ_CLEAR)
    }

    /// Power down the oscillator after an ALS interrupt
    pub fn set_sleep_after_interrupt(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::SAI, enable)
    }

    /// Check if sleep after interrupt is enabled
    pub fn sleep_after_interrupt(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::SAI)
    }

    /// Enable or disable auto-zero
    pub fn set_auto_zero_mode(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::AZ_MODE, enable)
    }

    /// Check if auto-zero is enabled
    pub fn auto_zero_mode(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::AZ_MODE)
    }

    /// Run auto-zero every `n` ALS cycles (7 bits; 0 runs it only before the first cycle)
    pub fn set_auto_zero_every_n(&mut self, n: u8) -> Result<(), Error<E>> {
        self.write_field(registers::AZ_NTH_ITERATION, n)
    }

    /// Get the auto-zero interval
    pub fn auto_zero_every_n(&mut self) -> Result<u8, Error<E>> {
        self.read_field(registers::AZ_NTH_ITERATION)
    }

    /// Enable or disable the saturation interrupt
    pub fn enable_saturation_interrupt(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::ASIEN, enable)
    }

    /// Check if the saturation interrupt is enabled
    pub fn saturation_interrupt_enabled(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::ASIEN)
    }

    /// Enable or disable the ALS threshold interrupt
    pub fn enable_als_interrupt(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::AIEN, enable)
    }

    /// Check if the ALS threshold interrupt is enabled
    pub fn als_interrupt_enabled(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::AIEN)
    }

    /// Enable or disable the wait time between ALS cycles
    pub fn enable_wait(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::WEN, enable)
    }

    /// Check if the wait time is enabled
    pub fn is_wait_enabled(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::WEN)
    }

    /// Enable or disable ALS
    pub fn enable_als(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::AEN, enable)
    }

    /// Check if ALS is enabled
    pub fn is_als_enabled(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::AEN)
    }

    /// Power the oscillator on or off
    pub fn power_on(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_flag(registers::PON, enable)
    }

    /// Check if the device is powered on
    pub fn is_powered_on(&mut self) -> Result<bool, Error<E>> {
        self.read_flag(registers::PON)
    }

    /// Destroy the driver and return the I2C interface
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    // Helper methods for register access
    fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buffer)
            .map_err(Error::I2c)?;
        Ok(buffer[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::I2c)
    }

    fn read_u16(&mut self, register: u8) -> Result<u16, Error<E>> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register], &mut buffer)
            .map_err(Error::I2c)?;
        Ok(u16::from_le_bytes(buffer))
    }

    fn write_u16(&mut self, register: u8, value: u16) -> Result<(), Error<E>> {
        let [low, high] = value.to_le_bytes();
        self.i2c
            .write(self.address, &[register, low, high])
            .map_err(Error::I2c)
    }

    fn read_field(&mut self, field: Field) -> Result<u8, Error<E>> {
        Ok(field.get(self.read_register(field.register)?))
    }

    fn write_field(&mut self, field: Field, value: u8) -> Result<(), Error<E>> {
        let current = self.read_register(field.register)?;
        self.write_register(field.register, field.set(current, value))
    }

    fn read_flag(&mut self, field: Field) -> Result<bool, Error<E>> {
        Ok(self.read_field(field)? != 0)
    }

    fn write_flag(&mut self, field: Field, enable: bool) -> Result<(), Error<E>> {
        self.write_field(field, enable as u8)
    }
}
