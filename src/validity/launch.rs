//! Worker-group geometry for device stages.
//!
//! The group size is the object count rounded up to a multiple of the minimum
//! group unit, capped at the device maximum. Groups tile the objects and are
//! laid out as a near-square 2-D grid.

use numr::error::{Error, Result};
use tracing::warn;

/// Smallest worker group the device schedules.
pub const MIN_GROUP_SIZE: usize = 32;
/// Largest worker group the device accepts.
pub const MAX_GROUP_SIZE: usize = 1024;

/// Bounds on the worker-group size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchLimits {
    /// Group sizes are rounded up to a multiple of this.
    pub min_group_size: usize,
    /// Group sizes above this are clamped.
    pub max_group_size: usize,
}

impl Default for LaunchLimits {
    fn default() -> Self {
        Self {
            min_group_size: MIN_GROUP_SIZE,
            max_group_size: MAX_GROUP_SIZE,
        }
    }
}

impl LaunchLimits {
    fn validate(&self) -> Result<()> {
        if self.min_group_size == 0 {
            return Err(Error::InvalidArgument {
                arg: "min_group_size",
                reason: "launch requires min_group_size > 0".to_string(),
            });
        }
        if self.max_group_size < self.min_group_size {
            return Err(Error::InvalidArgument {
                arg: "max_group_size",
                reason: format!(
                    "launch requires max_group_size >= min_group_size, got {} < {}",
                    self.max_group_size, self.min_group_size
                ),
            });
        }
        Ok(())
    }
}

/// Resolved launch layout for `n` objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchGeometry {
    /// Objects handled per worker group.
    pub group_size: usize,
    /// Worker groups along (x, y); `x * y >= n_groups`.
    pub grid: (usize, usize),
    /// Worker groups needed to cover every object.
    pub n_groups: usize,
}

impl LaunchGeometry {
    /// Geometry for `n_objects`, clamping oversized groups with a warning.
    pub fn for_objects(n_objects: usize, limits: &LaunchLimits) -> Result<Self> {
        limits.validate()?;

        let units = n_objects.div_ceil(limits.min_group_size).max(1);
        let requested = units * limits.min_group_size;
        let group_size = if requested > limits.max_group_size {
            warn!(
                requested,
                max = limits.max_group_size,
                "worker group exceeds device limit, clamping"
            );
            limits.max_group_size
        } else {
            requested
        };

        let n_groups = n_objects.div_ceil(group_size).max(1);
        let gx = ceil_sqrt(n_groups);
        let gy = n_groups.div_ceil(gx);

        Ok(Self {
            group_size,
            grid: (gx, gy),
            n_groups,
        })
    }

    /// Half-open object ranges `(start, len)` covered by each worker group.
    ///
    /// Groups are visited row by row over the grid; slots past `n_groups`
    /// stay idle.
    pub fn row_tiles(&self, n_objects: usize) -> impl Iterator<Item = (usize, usize)> {
        let (gx, gy) = self.grid;
        let group_size = self.group_size;
        (0..gy)
            .flat_map(move |y| (0..gx).map(move |x| y * gx + x))
            .map(move |group| group * group_size)
            .take_while(move |&start| start < n_objects)
            .map(move |start| (start, group_size.min(n_objects - start)))
    }
}

fn ceil_sqrt(x: usize) -> usize {
    let mut r = (x as f64).sqrt() as usize;
    while r * r < x {
        r += 1;
    }
    r.max(1)
}
