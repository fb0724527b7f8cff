//! Common test utilities and the simulated sensor

pub mod simulated_chip;

pub use simulated_chip::{RecordingDelay, SimulatedChip};

use tcs3430::Tcs3430;

/// Driver wired to a fresh simulated chip, plus a handle to inspect the chip
pub fn create_driver() -> (Tcs3430<SimulatedChip>, SimulatedChip) {
    let chip = SimulatedChip::new();
    (Tcs3430::new(chip.clone()), chip)
}

/// Driver with a recording delay, for IR2 reads
pub fn create_driver_with_delay() -> (
    Tcs3430<SimulatedChip, RecordingDelay>,
    SimulatedChip,
    RecordingDelay,
) {
    let chip = SimulatedChip::new();
    let delay = RecordingDelay::default();
    (
        Tcs3430::new_with_delay(chip.clone(), delay.clone()),
        chip,
        delay,
    )
}
