//! Hierarchical key derivation paths

use crate::error::PathError;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Bit marking a hardened path component
pub const HARDENED: u32 = 0x8000_0000;

/// Ordered derivation path components.
///
/// Callers guarantee each component is either a plain index below
/// [`HARDENED`] or such an index with the hardened bit set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(SmallVec<[u32; 8]>);

impl DerivationPath {
    pub fn new(components: &[u32]) -> Self {
        Self(SmallVec::from_slice(components))
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, component: u32) {
        self.0.push(component);
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(components: Vec<u32>) -> Self {
        Self(SmallVec::from_vec(components))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &component in &self.0 {
            if component & HARDENED != 0 {
                write!(f, "/{}'", component ^ HARDENED)?;
            } else {
                write!(f, "/{component}")?;
            }
        }
        Ok(())
    }
}

/// Format raw path components, `"m"` for the empty path
pub fn path_to_string(path: &[u32]) -> String {
    DerivationPath::new(path).to_string()
}

impl FromStr for DerivationPath {
    type Err = PathError;

    /// Parse `m/44'/0'/0'/0/0`; the `m/` prefix is optional and `h`/`H`
    /// may stand in for `'`
    fn from_str(s: &str) -> Result<Self, PathError> {
        let body = match s {
            "" | "m" | "M" => return Ok(Self::default()),
            _ => s
                .strip_prefix("m/")
                .or_else(|| s.strip_prefix("M/"))
                .unwrap_or(s),
        };

        let mut path = Self::default();
        for (position, part) in body.split('/').enumerate() {
            if part.is_empty() {
                return Err(PathError::EmptyComponent(position));
            }
            let (digits, hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PathError::InvalidComponent(part.to_string()));
            }
            let index: u64 = digits
                .parse()
                .map_err(|_| PathError::InvalidComponent(part.to_string()))?;
            if index >= u64::from(HARDENED) {
                return Err(PathError::ComponentTooLarge(index));
            }
            let index = index as u32;
            path.push(if hardened { index | HARDENED } else { index });
        }
        Ok(path)
    }
}
