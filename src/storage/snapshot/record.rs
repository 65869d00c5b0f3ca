// Fixed width record encoding
//
// A type can be written to a snapshot only if every value of it has the same encoded width and carries
// no indirection. Integers, floats, bool, char and fixed arrays of those qualify. String, Vec and
// anything holding a pointer do not implement FixedRecord, so a list keyed or valued by them can't be
// saved at all.
//
// All multi-byte values are little endian.

pub trait FixedRecord: Sized {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Writes exactly `WIDTH` bytes into `out`.
    fn encode(&self, out: &mut [u8]);

    /// Reads a value from exactly `WIDTH` bytes. `None` if the bytes are not a valid value.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

macro_rules! le_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedRecord for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn encode(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn decode(bytes: &[u8]) -> Option<Self> {
                    Some(<$ty>::from_le_bytes(bytes.try_into().ok()?))
                }
            }
        )*
    };
}

le_record!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl FixedRecord for bool {
    const WIDTH: usize = 1;

    fn encode(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0] => Some(false),
            [1] => Some(true),
            _ => None,
        }
    }
}

impl FixedRecord for char {
    const WIDTH: usize = 4;

    fn encode(&self, out: &mut [u8]) {
        u32::from(*self).encode(out);
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        char::from_u32(u32::decode(bytes)?)
    }
}

impl<T: FixedRecord, const N: usize> FixedRecord for [T; N] {
    const WIDTH: usize = T::WIDTH * N;

    fn encode(&self, out: &mut [u8]) {
        if T::WIDTH == 0 {
            return;
        }
        for (item, chunk) in self.iter().zip(out.chunks_exact_mut(T::WIDTH)) {
            item.encode(chunk);
        }
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::WIDTH {
            return None;
        }
        let items = (0..N)
            .map(|i| T::decode(&bytes[i * T::WIDTH..(i + 1) * T::WIDTH]))
            .collect::<Option<Vec<T>>>()?;
        items.try_into().ok()
    }
}
