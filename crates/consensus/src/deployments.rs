//! Version-bits soft-fork deployment descriptors.
//!
//! Only the fixed parameters live here. Walking the DEFINED / STARTED /
//! LOCKED_IN / ACTIVE / FAILED state machine against chain history belongs to
//! block validation.

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DeploymentPos {
    TestDummy = 0,
    Csv = 1,
    Dip0001 = 2,
}

pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 3;

/// Signaling bits occupy the low bits of the block version.
pub const VERSION_BITS_NUM_BITS: u8 = 32;

pub const ALL_DEPLOYMENTS: [DeploymentPos; MAX_VERSION_BITS_DEPLOYMENTS] = [
    DeploymentPos::TestDummy,
    DeploymentPos::Csv,
    DeploymentPos::Dip0001,
];

impl DeploymentPos {
    pub const fn as_usize(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Csv => "csv",
            DeploymentPos::Dip0001 => "dip0001",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_DEPLOYMENTS.into_iter().find(|pos| pos.name() == name)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Deployment {
    pub bit: u8,
    /// Median time past at which signaling may begin.
    pub start_time: i64,
    /// Median time past after which an unlocked deployment fails.
    pub timeout: i64,
    pub window_size: u32,
    /// Signaling blocks required within one window to lock in.
    pub threshold: u32,
}

impl Deployment {
    pub fn mask(&self) -> u32 {
        1u32 << self.bit
    }

    pub fn is_signaling_window(&self, time: i64) -> bool {
        self.start_time <= time && time < self.timeout
    }

    pub fn overlaps(&self, other: &Deployment) -> bool {
        self.start_time < other.timeout && other.start_time < self.timeout
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeploymentError {
    BitOutOfRange {
        deployment: DeploymentPos,
        bit: u8,
    },
    BitConflict {
        first: DeploymentPos,
        second: DeploymentPos,
        bit: u8,
    },
}

impl fmt::Display for DeploymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentError::BitOutOfRange { deployment, bit } => write!(
                f,
                "deployment {} uses bit {bit} outside 0..{VERSION_BITS_NUM_BITS}",
                deployment.name()
            ),
            DeploymentError::BitConflict { first, second, bit } => write!(
                f,
                "deployments {} and {} signal on bit {bit} with overlapping windows",
                first.name(),
                second.name()
            ),
        }
    }
}

impl std::error::Error for DeploymentError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deployments([Deployment; MAX_VERSION_BITS_DEPLOYMENTS]);

impl Deployments {
    pub const fn new(entries: [Deployment; MAX_VERSION_BITS_DEPLOYMENTS]) -> Self {
        Self(entries)
    }

    pub fn get(&self, pos: DeploymentPos) -> &Deployment {
        &self.0[pos.as_usize()]
    }

    pub fn by_name(&self, name: &str) -> Option<&Deployment> {
        DeploymentPos::from_name(name).map(|pos| self.get(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeploymentPos, &Deployment)> {
        ALL_DEPLOYMENTS.into_iter().zip(self.0.iter())
    }

    /// Rejects bits outside the version field and bit reuse between
    /// deployments whose signaling windows overlap. Reuse across disjoint
    /// windows is allowed.
    pub fn validate(&self) -> Result<(), DeploymentError> {
        for (pos, deployment) in self.iter() {
            if deployment.bit >= VERSION_BITS_NUM_BITS {
                return Err(DeploymentError::BitOutOfRange {
                    deployment: pos,
                    bit: deployment.bit,
                });
            }
        }

        for (i, (first, a)) in self.iter().enumerate() {
            for (second, b) in self.iter().skip(i + 1) {
                if a.bit == b.bit && a.overlaps(b) {
                    return Err(DeploymentError::BitConflict {
                        first,
                        second,
                        bit: a.bit,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment(bit: u8, start_time: i64, timeout: i64) -> Deployment {
        Deployment {
            bit,
            start_time,
            timeout,
            window_size: 100,
            threshold: 75,
        }
    }

    #[test]
    fn names_roundtrip() {
        for pos in ALL_DEPLOYMENTS {
            assert_eq!(DeploymentPos::from_name(pos.name()), Some(pos));
        }
        assert_eq!(DeploymentPos::from_name("segwit"), None);
    }

    #[test]
    fn mask_and_window() {
        let d = deployment(28, 100, 200);
        assert_eq!(d.mask(), 0x1000_0000);
        assert!(!d.is_signaling_window(99));
        assert!(d.is_signaling_window(100));
        assert!(d.is_signaling_window(199));
        assert!(!d.is_signaling_window(200));
    }

    #[test]
    fn bit_reuse_allowed_for_disjoint_windows() {
        let table = Deployments::new([
            deployment(28, 0, 100),
            deployment(28, 100, 200),
            deployment(1, 0, 200),
        ]);
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn bit_reuse_rejected_for_overlapping_windows() {
        let table = Deployments::new([
            deployment(0, 0, 150),
            deployment(0, 100, 200),
            deployment(1, 0, 200),
        ]);
        assert_eq!(
            table.validate(),
            Err(DeploymentError::BitConflict {
                first: DeploymentPos::TestDummy,
                second: DeploymentPos::Csv,
                bit: 0,
            })
        );
    }

    #[test]
    fn bit_out_of_range_rejected() {
        let table = Deployments::new([
            deployment(32, 0, 100),
            deployment(0, 0, 100),
            deployment(1, 0, 100),
        ]);
        assert!(matches!(
            table.validate(),
            Err(DeploymentError::BitOutOfRange { bit: 32, .. })
        ));
    }
}
