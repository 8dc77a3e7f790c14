use bincode::{Decode, Encode};

/// The address space the CPU drives. Every 16-bit address is valid; implementations decide what
/// lives behind each one.
pub trait BusInterface {
    fn read(&mut self, address: u16) -> u8;

    /// Read without side effects, for debuggers and other inspection tools. The CPU never calls
    /// this while executing.
    fn peek(&self, address: u16) -> u8;

    fn write(&mut self, address: u16, value: u8);
}

const ADDRESS_SPACE_LEN: usize = 0x10000;

/// Flat 64KB of RAM, zero-initialized.
#[derive(Debug, Clone, Encode, Decode)]
pub struct InMemoryBus {
    memory: Vec<u8>,
}

impl InMemoryBus {
    #[must_use]
    pub fn new() -> Self {
        Self { memory: vec![0; ADDRESS_SPACE_LEN] }
    }

    /// Copy `bytes` into memory starting at `address`, wrapping around at the end of the address
    /// space.
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            let address = address.wrapping_add(i as u16);
            self.memory[usize::from(address)] = byte;
        }
    }

    pub fn set_reset_vector(&mut self, address: u16) {
        self.load(crate::RESET_VECTOR, &address.to_le_bytes());
    }

    pub fn set_irq_vector(&mut self, address: u16) {
        self.load(crate::IRQ_VECTOR, &address.to_le_bytes());
    }

    pub fn set_nmi_vector(&mut self, address: u16) {
        self.load(crate::NMI_VECTOR, &address.to_le_bytes());
    }

    #[must_use]
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusInterface for InMemoryBus {
    #[inline]
    fn read(&mut self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    #[inline]
    fn peek(&self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    #[inline]
    fn write(&mut self, address: u16, value: u8) {
        self.memory[usize::from(address)] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_wraps_at_end_of_address_space() {
        let mut bus = InMemoryBus::new();
        assert_eq!(bus.memory().len(), 0x10000);

        bus.load(0xFFFE, &[0x01, 0x02, 0x03]);

        assert_eq!(bus.peek(0xFFFE), 0x01);
        assert_eq!(bus.peek(0xFFFF), 0x02);
        assert_eq!(bus.peek(0x0000), 0x03);
    }

    #[test]
    fn vectors_are_little_endian() {
        let mut bus = InMemoryBus::new();
        bus.set_reset_vector(0x8123);
        bus.set_nmi_vector(0x9000);

        assert_eq!(bus.read(0xFFFC), 0x23);
        assert_eq!(bus.read(0xFFFD), 0x81);
        assert_eq!(bus.read(0xFFFA), 0x00);
        assert_eq!(bus.read(0xFFFB), 0x90);
    }
}
