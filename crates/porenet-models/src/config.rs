//! Object construction inputs and their validation.
//!
//! Building network topology is out of scope here: a [`NetworkConfig`] is
//! plain input data (coordinates plus connectivity) that is only checked
//! for structural consistency.

use std::collections::HashSet;

use porenet_core::ConfigError;

use crate::object::ObjectRef;

/// Input for [`ObjectRef::network`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkConfig {
    /// Pore center coordinates.
    pub coords: Vec<[f64; 3]>,
    /// Pore index pairs, one per throat.
    pub conns: Vec<[usize; 2]>,
}

impl NetworkConfig {
    /// A simple `nx × ny × nz` lattice with nearest-neighbor throats.
    ///
    /// Pores are numbered x-fastest. Throats are listed per pore, in the
    /// +x, +y, +z direction order.
    pub fn cubic(nx: usize, ny: usize, nz: usize, spacing: f64) -> Self {
        let index = |x: usize, y: usize, z: usize| x + nx * (y + ny * z);
        let mut coords = Vec::with_capacity(nx * ny * nz);
        let mut conns = Vec::new();
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    coords.push([
                        (x as f64 + 0.5) * spacing,
                        (y as f64 + 0.5) * spacing,
                        (z as f64 + 0.5) * spacing,
                    ]);
                }
            }
        }
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let here = index(x, y, z);
                    if x + 1 < nx {
                        conns.push([here, index(x + 1, y, z)]);
                    }
                    if y + 1 < ny {
                        conns.push([here, index(x, y + 1, z)]);
                    }
                    if z + 1 < nz {
                        conns.push([here, index(x, y, z + 1)]);
                    }
                }
            }
        }
        Self { coords, conns }
    }

    /// Check structural invariants.
    ///
    /// 1. At least one pore.
    /// 2. Every throat references existing pores.
    /// 3. No throat connects a pore to itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coords.is_empty() {
            return Err(ConfigError::EmptyNetwork);
        }
        let pore_count = self.coords.len();
        for (throat, &[a, b]) in self.conns.iter().enumerate() {
            for pore in [a, b] {
                if pore >= pore_count {
                    return Err(ConfigError::PoreOutOfRange {
                        throat,
                        pore,
                        pore_count,
                    });
                }
            }
            if a == b {
                return Err(ConfigError::SelfLoop { throat });
            }
        }
        Ok(())
    }
}

/// Input for [`ObjectRef::geometry`]: which network elements it covers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometryConfig {
    /// Network pore indices, in the order the geometry stores them.
    pub pores: Vec<usize>,
    /// Network throat indices, in the order the geometry stores them.
    pub throats: Vec<usize>,
}

impl GeometryConfig {
    /// Cover the given pores and throats.
    pub fn new(pores: Vec<usize>, throats: Vec<usize>) -> Self {
        Self { pores, throats }
    }

    /// Cover every pore and throat of `network`.
    pub fn all(network: &ObjectRef) -> Self {
        Self {
            pores: (0..network.pore_count()).collect(),
            throats: (0..network.throat_count()).collect(),
        }
    }

    /// Check that every index exists in the parent and none repeats.
    pub fn validate(&self, pore_count: usize, throat_count: usize) -> Result<(), ConfigError> {
        check_subset("pore", &self.pores, pore_count)?;
        check_subset("throat", &self.throats, throat_count)
    }
}

fn check_subset(element: &'static str, indices: &[usize], len: usize) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(indices.len());
    for &index in indices {
        if index >= len {
            return Err(ConfigError::IndexOutOfRange {
                element,
                index,
                len,
            });
        }
        if !seen.insert(index) {
            return Err(ConfigError::DuplicateIndex { element, index });
        }
    }
    Ok(())
}
