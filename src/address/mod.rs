//! Address display helpers: chunking, derivation paths, QR scale

mod path;
mod qr;

pub use path::{path_to_string, DerivationPath, HARDENED};
pub use qr::{
    qr_coefficient, QrPlacement, QR_SCALE_LONG, QR_SCALE_SHORT, QR_SIZE_THRESHOLD, QR_X, QR_Y,
};

/// Characters per address chunk; one mono line on the default display
pub const ADDRESS_CHUNK_LEN: usize = 17;

/// Lazy iterator over fixed-length chunks of an address.
///
/// Chunks are counted in characters; the last one may be shorter. A clone
/// taken before iteration replays the whole sequence.
#[derive(Debug, Clone)]
pub struct AddressChunks<'a> {
    rest: &'a str,
    chunk_size: usize,
}

impl<'a> Iterator for AddressChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let split = self
            .rest
            .char_indices()
            .nth(self.chunk_size)
            .map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.rest.is_empty() {
            return (0, Some(0));
        }
        let bytes = self.rest.len();
        (
            bytes.div_ceil(self.chunk_size.saturating_mul(4)),
            Some(bytes.div_ceil(self.chunk_size)),
        )
    }
}

impl std::iter::FusedIterator for AddressChunks<'_> {}

/// Split `address` into chunks of `chunk_size` characters.
///
/// A `chunk_size` of 0 is treated as 1.
pub fn chunk_address(address: &str, chunk_size: usize) -> AddressChunks<'_> {
    AddressChunks {
        rest: address,
        chunk_size: chunk_size.max(1),
    }
}

/// Split `address` into [`ADDRESS_CHUNK_LEN`] character chunks
pub fn split_address(address: &str) -> AddressChunks<'_> {
    chunk_address(address, ADDRESS_CHUNK_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BTC: &str = "1JAd7XCBzGudGpJQSDSfpmJhiygtLQWaGL";

    #[test]
    fn test_split_address() {
        let chunks: Vec<_> = split_address(BTC).collect();
        assert_eq!(chunks, vec!["1JAd7XCBzGudGpJQS", "DSfpmJhiygtLQWaGL"]);
    }

    #[test]
    fn test_short_last_chunk() {
        let addr = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
        let chunks: Vec<_> = split_address(addr).collect();
        assert_eq!(chunks.len(), 3);
        assert!(chunks[..2].iter().all(|c| c.chars().count() == 17));
        assert_eq!(chunks[2], "7kv8f3t4");
        assert_eq!(chunks.concat(), addr);
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(split_address("").count(), 0);
    }

    #[test]
    fn test_restartable() {
        let chunks = split_address(BTC);
        let first: Vec<_> = chunks.clone().collect();
        let second: Vec<_> = chunks.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multibyte_chunks() {
        let chunks: Vec<_> = chunk_address("ααβββγ", 2).collect();
        assert_eq!(chunks, vec!["αα", "ββ", "βγ"]);
    }

    #[test]
    fn test_huge_chunk_size() {
        let chunks = chunk_address("bc1qabc", usize::MAX / 4 + 1);
        assert_eq!(chunks.size_hint(), (1, Some(1)));
        assert_eq!(chunks.collect::<Vec<_>>(), vec!["bc1qabc"]);
        assert_eq!(chunk_address("bc1q", usize::MAX).size_hint(), (1, Some(1)));
    }

    #[test]
    fn test_zero_chunk_size() {
        assert_eq!(chunk_address("abc", 0).count(), 3);
    }

    #[test]
    fn test_reconstructs_various_lengths() {
        let alphabet = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
        for len in 1..=120 {
            let addr: String = alphabet.chars().cycle().take(len).collect();
            let chunks: Vec<_> = split_address(&addr).collect();
            assert_eq!(chunks.concat(), addr);
            assert_eq!(chunks.len(), len.div_ceil(17));
            let (last, full) = chunks.split_last().unwrap();
            assert!(full.iter().all(|c| c.len() == 17));
            assert!(!last.is_empty() && last.len() <= 17);
        }
    }
}
