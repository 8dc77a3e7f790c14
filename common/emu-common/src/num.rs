pub trait GetBit {
    #[must_use]
    fn bit(self, i: u8) -> bool;
}

macro_rules! impl_get_bit {
    ($t:ty) => {
        impl GetBit for $t {
            #[inline]
            fn bit(self, i: u8) -> bool {
                debug_assert!(i < (<$t>::BITS as u8));
                self & (1 << i) != 0
            }
        }
    };
}

impl_get_bit!(u8);
impl_get_bit!(u16);

pub trait U16Ext {
    fn lsb(self) -> u8;

    fn msb(self) -> u8;

    /// The 256-byte page this address lives in, i.e. the address with the low byte cleared.
    fn page(self) -> u16;

    fn same_page(self, other: u16) -> bool;
}

impl U16Ext for u16 {
    #[inline(always)]
    fn lsb(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    fn msb(self) -> u8 {
        (self >> 8) as u8
    }

    #[inline(always)]
    fn page(self) -> u16 {
        self & 0xFF00
    }

    #[inline(always)]
    fn same_page(self, other: u16) -> bool {
        self.page() == other.page()
    }
}
