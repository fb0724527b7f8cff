//! Simulated TCS3430 register file behind the `embedded-hal` I2C trait

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::cell::RefCell;
use std::rc::Rc;
use tcs3430::registers;

/// Shared state of the simulated chip (uses interior mutability)
#[derive(Debug)]
struct ChipState {
    address: u8,
    registers: [u8; 256],
    /// Register pointer set by the first byte of a write
    pointer: u8,
    /// CH3 contents when the multiplexer selects X
    x: u16,
    /// CH3 contents when the multiplexer selects IR2
    ir2: u16,
    /// Fail the next read that starts at this register
    fail_read_at: Option<u8>,
    /// Fail the next write that targets this register
    fail_write_at: Option<u8>,
    /// Every register write as (register, data)
    writes: Vec<(u8, Vec<u8>)>,
}

impl ChipState {
    fn new() -> Self {
        let mut regs = [0u8; 256];
        regs[registers::ID as usize] = registers::CHIP_ID;
        regs[registers::REVID as usize] = 0x41;
        regs[registers::CFG2 as usize] = 0x04;
        regs[registers::AZ_CONFIG as usize] = 0x7F;

        Self {
            address: tcs3430::DEFAULT_ADDRESS,
            registers: regs,
            pointer: 0,
            x: 0,
            ir2: 0,
            fail_read_at: None,
            fail_write_at: None,
            writes: Vec::new(),
        }
    }

    fn mux_ir2(&self) -> bool {
        registers::AMUX.get(self.registers[registers::CFG1 as usize]) != 0
    }

    fn read_byte(&self, register: u8) -> u8 {
        let ch3 = if self.mux_ir2() { self.ir2 } else { self.x };
        match register {
            r if r == registers::CH3DATAL => ch3.to_le_bytes()[0],
            r if r == registers::CH3DATAL + 1 => ch3.to_le_bytes()[1],
            r => self.registers[r as usize],
        }
    }

    fn write_byte(&mut self, register: u8, value: u8) {
        match register {
            // Write 1 to clear
            r if r == registers::STATUS => self.registers[r as usize] &= !value,
            r if r == registers::ID || r == registers::REVID => {}
            r => self.registers[r as usize] = value,
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ErrorKind> {
        let Some((&register, data)) = bytes.split_first() else {
            return Ok(());
        };
        if self.fail_write_at == Some(register) && !data.is_empty() {
            self.fail_write_at = None;
            return Err(ErrorKind::Other);
        }

        self.pointer = register;
        if !data.is_empty() {
            self.writes.push((register, data.to_vec()));
        }
        for (i, &value) in data.iter().enumerate() {
            self.write_byte(register.wrapping_add(i as u8), value);
        }
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), ErrorKind> {
        if self.fail_read_at == Some(self.pointer) {
            self.fail_read_at = None;
            return Err(ErrorKind::Other);
        }
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read_byte(self.pointer.wrapping_add(i as u8));
        }
        Ok(())
    }
}

/// Cloneable handle to a simulated TCS3430; clones share the same chip
#[derive(Debug, Clone)]
pub struct SimulatedChip {
    state: Rc<RefCell<ChipState>>,
}

impl Default for SimulatedChip {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedChip {
    /// Chip in its power-on state at the default address
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ChipState::new())),
        }
    }

    /// Chip that answers at a different address
    pub fn with_address(address: u8) -> Self {
        let chip = Self::new();
        chip.state.borrow_mut().address = address;
        chip
    }

    /// Raw register value
    pub fn register(&self, register: u8) -> u8 {
        self.state.borrow().registers[register as usize]
    }

    /// Overwrite a register directly, bypassing write-1-to-clear
    pub fn set_register(&self, register: u8, value: u8) {
        self.state.borrow_mut().registers[register as usize] = value;
    }

    /// Load a conversion result; CH3 serves `x` or `ir2` depending on the multiplexer
    pub fn set_channels(&self, x: u16, y: u16, z: u16, ir1: u16, ir2: u16) {
        let mut state = self.state.borrow_mut();
        for (register, value) in [
            (registers::CH0DATAL, z),
            (registers::CH1DATAL, y),
            (registers::CH2DATAL, ir1),
        ] {
            let [low, high] = value.to_le_bytes();
            state.registers[register as usize] = low;
            state.registers[register as usize + 1] = high;
        }
        state.x = x;
        state.ir2 = ir2;
    }

    /// Fail the next read starting at `register`
    pub fn fail_next_read_at(&self, register: u8) {
        self.state.borrow_mut().fail_read_at = Some(register);
    }

    /// Fail the next write to `register`
    pub fn fail_next_write_at(&self, register: u8) {
        self.state.borrow_mut().fail_write_at = Some(register);
    }

    /// Registers written so far, in order
    pub fn written_registers(&self) -> Vec<u8> {
        self.state
            .borrow()
            .writes
            .iter()
            .map(|(register, _)| *register)
            .collect()
    }

    /// Current multiplexer selection
    pub fn mux_ir2(&self) -> bool {
        self.state.borrow().mux_ir2()
    }
}

impl ErrorType for SimulatedChip {
    type Error = ErrorKind;
}

impl I2c for SimulatedChip {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if address != state.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => state.write(bytes)?,
                Operation::Read(buffer) => state.read(buffer)?,
            }
        }
        Ok(())
    }
}

/// Delay provider that records requested millisecond delays instead of sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    delays_ms: Rc<RefCell<Vec<u32>>>,
}

impl RecordingDelay {
    /// Millisecond delays requested so far
    pub fn delays_ms(&self) -> Vec<u32> {
        self.delays_ms.borrow().clone()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.borrow_mut().push(ms);
    }
}
