//! Register map and bitfield helpers for the TCS3430

/// Expected value of the `ID` register
pub const CHIP_ID: u8 = 0xDC;

/// Enable states and interrupts
pub const ENABLE: u8 = 0x80;
/// ADC integration time
pub const ATIME: u8 = 0x81;
/// ALS wait time
pub const WTIME: u8 = 0x83;
/// ALS interrupt low threshold, low byte
pub const AILTL: u8 = 0x84;
/// ALS interrupt low threshold, high byte
pub const AILTH: u8 = 0x85;
/// ALS interrupt high threshold, low byte
pub const AIHTL: u8 = 0x86;
/// ALS interrupt high threshold, high byte
pub const AIHTH: u8 = 0x87;
/// ALS interrupt persistence filter
pub const PERS: u8 = 0x8C;
/// Configuration register zero
pub const CFG0: u8 = 0x8D;
/// Configuration register one
pub const CFG1: u8 = 0x90;
/// Revision ID
pub const REVID: u8 = 0x91;
/// Device ID
pub const ID: u8 = 0x92;
/// Device status
pub const STATUS: u8 = 0x93;
/// Z channel (CH0), low byte
pub const CH0DATAL: u8 = 0x94;
/// Y channel (CH1), low byte
pub const CH1DATAL: u8 = 0x96;
/// IR1 channel (CH2), low byte
pub const CH2DATAL: u8 = 0x98;
/// X or IR2 channel (CH3), low byte
pub const CH3DATAL: u8 = 0x9A;
/// Configuration register two
pub const CFG2: u8 = 0x9F;
/// Configuration register three
pub const CFG3: u8 = 0xAB;
/// Auto-zero configuration
pub const AZ_CONFIG: u8 = 0xD6;
/// Interrupt enables
pub const INTENAB: u8 = 0xDD;

/// STATUS write-back value that clears only the saturation flag
pub const STATUS_CLEAR_SATURATION: u8 = 0x80;
/// STATUS write-back value that clears every flag
pub const STATUS_CLEAR_ALL: u8 = 0xFF;

/// A sub-byte field inside a single 8-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Register holding the field
    pub register: u8,
    /// Width in bits (1..=8)
    pub width: u8,
    /// Position of the least significant bit
    pub offset: u8,
}

impl Field {
    const fn new(register: u8, width: u8, offset: u8) -> Self {
        Self {
            register,
            width,
            offset,
        }
    }

    /// Decode this field from a raw register value
    pub const fn get(&self, reg: u8) -> u8 {
        extract(reg, self.width, self.offset)
    }

    /// Return `reg` with this field replaced by `value`
    pub const fn set(&self, reg: u8, value: u8) -> u8 {
        insert(reg, self.width, self.offset, value)
    }
}

const fn mask(width: u8) -> u8 {
    if width >= 8 {
        0xFF
    } else {
        (1u8 << width) - 1
    }
}

/// Extract `width` bits starting at `offset` from `reg`
pub const fn extract(reg: u8, width: u8, offset: u8) -> u8 {
    (reg >> offset) & mask(width)
}

/// Replace `width` bits starting at `offset` in `reg` with `value`
///
/// Bits of `value` above `width` are discarded; the rest of `reg` is kept.
pub const fn insert(reg: u8, width: u8, offset: u8, value: u8) -> u8 {
    let m = mask(width) << offset;
    (reg & !m) | ((value << offset) & m)
}

/// Wait enable
pub const WEN: Field = Field::new(ENABLE, 1, 3);
/// ALS enable
pub const AEN: Field = Field::new(ENABLE, 1, 1);
/// Power on
pub const PON: Field = Field::new(ENABLE, 1, 0);
/// ALS interrupt persistence
pub const APERS: Field = Field::new(PERS, 4, 0);
/// Wait time x12 multiplier
pub const WLONG: Field = Field::new(CFG0, 1, 2);
/// CH3 multiplexer: 0 = X, 1 = IR2
pub const AMUX: Field = Field::new(CFG1, 1, 3);
/// ALS gain code
pub const AGAIN: Field = Field::new(CFG1, 2, 0);
/// High gain (128x when AGAIN is 64x)
pub const HGAIN: Field = Field::new(CFG2, 1, 4);
/// ALS saturation flag (read-only)
pub const ASAT: Field = Field::new(STATUS, 1, 7);
/// ALS interrupt flag (read-only)
pub const AINT: Field = Field::new(STATUS, 1, 4);
/// Clear interrupt flags when STATUS is read
pub const INT_READ_CLEAR: Field = Field::new(CFG3, 1, 7);
/// Sleep after interrupt
pub const SAI: Field = Field::new(CFG3, 1, 4);
/// Auto-zero mode
pub const AZ_MODE: Field = Field::new(AZ_CONFIG, 1, 7);
/// Run auto-zero every Nth ALS cycle
pub const AZ_NTH_ITERATION: Field = Field::new(AZ_CONFIG, 7, 0);
/// ALS saturation interrupt enable
pub const ASIEN: Field = Field::new(INTENAB, 1, 7);
/// ALS interrupt enable
pub const AIEN: Field = Field::new(INTENAB, 1, 4);
