//! Adler-32 per RFC 1950, with the modulo deferred across NMAX-byte blocks.

/// Largest prime smaller than 65536.
const BASE: u32 = 65521;

/// Largest n such that 255*n*(n+1)/2 + (n+1)*(BASE-1) <= 2^32-1, so the
/// running sums cannot overflow a u32 within one block.
const NMAX: usize = 5552;

/// Running Adler-32 over a byte stream. Starts at the RFC 1950 initial
/// value `(a=1, b=0)`.
#[derive(Clone, Copy, Debug)]
pub struct Adler32 {
    a: u32,
    b: u32,
}

impl Adler32 {
    pub fn new() -> Self {
        Adler32 { a: 1, b: 0 }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        let mut a = self.a;
        let mut b = self.b;
        for block in bytes.chunks(NMAX) {
            for &byte in block {
                a += u32::from(byte);
                b += a;
            }
            a %= BASE;
            b %= BASE;
        }
        self.a = a;
        self.b = b;
    }

    /// Finalized checksum `(b << 16) | a` of everything fed so far.
    pub fn value(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adler32_of(bytes: &[u8]) -> u32 {
        let mut adler = Adler32::new();
        adler.update(bytes);
        adler.value()
    }

    #[test]
    fn known_vectors() {
        // zlib adler32() reference values
        assert_eq!(adler32_of(b""), 1);
        assert_eq!(adler32_of(b"Wikipedia"), 0x11E6_0398);
        assert_eq!(adler32_of(b"123456789"), 0x091E_01DE);
    }

    #[test]
    fn blocking_matches_bytewise() {
        // Long enough to cross several NMAX block boundaries
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7) as u8).collect();

        let blocked = adler32_of(&data);

        let (mut a, mut b) = (1u64, 0u64);
        for &byte in &data {
            a = (a + u64::from(byte)) % 65521;
            b = (b + a) % 65521;
        }
        assert_eq!(blocked, ((b as u32) << 16) | a as u32);
    }

    #[test]
    fn split_update_matches_one_shot() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i ^ 0x5A) as u8).collect();
        let mut adler = Adler32::new();
        adler.update(&data[..3333]);
        adler.update(&data[3333..]);
        assert_eq!(adler.value(), adler32_of(&data));
    }
}
