pub trait Leb128 {
    fn to_leb128_bytes(&self, out: &mut Vec<u8>);
    fn from_leb128_bytes(slice: &[u8]) -> Option<(Self, usize)>
    where
        Self: std::marker::Sized;
}

macro_rules! impl_unsigned_leb128 {
    ($int_ty:ident) => {
        impl Leb128 for $int_ty {
            #[inline]
            fn to_leb128_bytes(&self, out: &mut Vec<u8>) {
                let mut value = *self;
                loop {
                    if value < 0x80 {
                        out.push(value as u8);
                        break;
                    } else {
                        out.push(((value & 0x7f) | 0x80) as u8);
                        value >>= 7;
                    }
                }
            }

            #[inline]
            fn from_leb128_bytes(slice: &[u8]) -> Option<($int_ty, usize)> {
                let mut result: $int_ty = 0;
                let mut shift = 0;
                for (position, byte) in slice.iter().enumerate() {
                    if shift >= $int_ty::BITS {
                        return None;
                    }
                    result |= ((byte & 0x7F) as $int_ty).checked_shl(shift)?;
                    if (byte & 0x80) == 0 {
                        return Some((result, position + 1));
                    }
                    shift += 7;
                }
                None
            }
        }
    };
}

impl_unsigned_leb128!(u16);
impl_unsigned_leb128!(u32);
impl_unsigned_leb128!(u64);
impl_unsigned_leb128!(usize);

#[inline(always)]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline(always)]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Sequential reader over a byte slice, used by the identifier decoders.
pub struct Leb128Reader<'x> {
    bytes: &'x [u8],
    pos: usize,
}

impl<'x> Leb128Reader<'x> {
    pub fn new(bytes: &'x [u8]) -> Self {
        Leb128Reader { bytes, pos: 0 }
    }

    pub fn next_u8(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    pub fn next_u16_le(&mut self) -> Option<u16> {
        let bytes = self.next_bytes(2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn next_bytes(&mut self, len: usize) -> Option<&'x [u8]> {
        let bytes = self.bytes.get(self.pos..self.pos.checked_add(len)?)?;
        self.pos += len;
        Some(bytes)
    }

    pub fn next_leb128<T: Leb128>(&mut self) -> Option<T> {
        let (value, len) = T::from_leb128_bytes(self.bytes.get(self.pos..)?)?;
        self.pos += len;
        Some(value)
    }

    pub fn next_zigzag(&mut self) -> Option<i64> {
        self.next_leb128::<u64>().map(zigzag_decode)
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}
