//! In-memory [`GridMutationPort`] and manual clock for tests.

use core::cell::Cell;
use core::ops;

use hashbrown::{HashMap, HashSet};

use crate::cell::{CellValue, LightProfile, MAX_LIGHT, MaterialId};
use crate::chunking::ChunkPos;
use crate::math::Cube;
use crate::port::GridMutationPort;
use crate::time::{Duration, Instant};

/// Error type of [`MemoryGrid`].
#[derive(Clone, Debug, Eq, PartialEq, displaydoc::Display)]
pub(crate) enum HostError {
    /// material {0:?} is not registered
    UnknownMaterial(MaterialId),
    /// injected failure at {0:?}
    Injected(Cube),
}

impl core::error::Error for HostError {}

/// A world stored in a hash map, which records every lighting and notification request
/// made to it.
#[derive(Debug)]
pub(crate) struct MemoryGrid {
    cells: HashMap<Cube, CellValue>,
    profiles: HashMap<MaterialId, LightProfile>,
    recomputed: Vec<Cube>,
    notified: Vec<ChunkPos>,
    write_count: usize,
    /// Every [`recompute_light()`] advances [`TestInstant`] by this much.
    recompute_cost: Duration,
    fail_at: HashSet<Cube>,
}

impl MemoryGrid {
    pub const STONE: MaterialId = MaterialId(1);
    pub const GLASS: MaterialId = MaterialId(20);
    pub const TORCH: MaterialId = MaterialId(50);
    pub const GLOWSTONE: MaterialId = MaterialId(89);
    /// Not registered; using it fails.
    pub const UNKNOWN: MaterialId = MaterialId(999);

    pub fn new() -> Self {
        let profiles = HashMap::from([
            (MaterialId::AIR, LightProfile::TRANSPARENT),
            (Self::STONE, LightProfile::OPAQUE),
            (Self::GLASS, LightProfile::TRANSPARENT),
            (
                Self::TORCH,
                LightProfile {
                    emission: 14,
                    blocking: 0,
                },
            ),
            (
                Self::GLOWSTONE,
                LightProfile {
                    emission: MAX_LIGHT,
                    blocking: MAX_LIGHT,
                },
            ),
        ]);
        Self {
            cells: HashMap::new(),
            profiles,
            recomputed: Vec::new(),
            notified: Vec::new(),
            write_count: 0,
            recompute_cost: Duration::ZERO,
            fail_at: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_recompute_cost(mut self, cost: Duration) -> Self {
        self.recompute_cost = cost;
        self
    }

    /// Makes every port operation on `cube` fail with [`HostError::Injected`].
    #[must_use]
    pub fn with_failure_at(mut self, cube: Cube) -> Self {
        self.fail_at.insert(cube);
        self
    }

    pub fn get(&self, cube: Cube) -> CellValue {
        self.cells.get(&cube).copied().unwrap_or(CellValue::AIR)
    }

    /// Cubes passed to [`recompute_light()`], in call order.
    pub fn recomputed(&self) -> &[Cube] {
        &self.recomputed
    }

    /// Chunks passed to [`notify_viewers_of_chunk()`], in call order.
    pub fn notified(&self) -> &[ChunkPos] {
        &self.notified
    }

    pub fn write_count(&self) -> usize {
        self.write_count
    }

    pub fn clear_log(&mut self) {
        self.recomputed.clear();
        self.notified.clear();
    }

    fn check(&self, cube: Cube) -> Result<(), HostError> {
        if self.fail_at.contains(&cube) {
            Err(HostError::Injected(cube))
        } else {
            Ok(())
        }
    }

    fn profile(&self, material: MaterialId) -> Result<LightProfile, HostError> {
        self.profiles
            .get(&material)
            .copied()
            .ok_or(HostError::UnknownMaterial(material))
    }
}

impl GridMutationPort for MemoryGrid {
    type Error = HostError;

    fn write_fast(&mut self, cube: Cube, value: CellValue) -> Result<bool, Self::Error> {
        self.check(cube)?;
        self.profile(value.material)?;
        self.write_count += 1;
        let old = if value == CellValue::AIR {
            self.cells.remove(&cube)
        } else {
            self.cells.insert(cube, value)
        };
        Ok(old.unwrap_or(CellValue::AIR) != value)
    }

    fn material_at(&self, cube: Cube) -> Result<MaterialId, Self::Error> {
        Ok(self.get(cube).material)
    }

    fn light_emission(&self, material: MaterialId) -> Result<u8, Self::Error> {
        Ok(self.profile(material)?.emission)
    }

    fn light_blocking(&self, material: MaterialId) -> Result<u8, Self::Error> {
        Ok(self.profile(material)?.blocking)
    }

    fn recompute_light(&mut self, cube: Cube) -> Result<(), Self::Error> {
        self.check(cube)?;
        TestInstant::advance(self.recompute_cost);
        self.recomputed.push(cube);
        Ok(())
    }

    fn is_fully_enclosed(&self, cube: Cube) -> Result<bool, Self::Error> {
        for neighbor in cube.neighbors() {
            if self.light_blocking(self.get(neighbor).material)? < MAX_LIGHT {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn notify_viewers_of_chunk(&mut self, chunk: ChunkPos) -> Result<(), Self::Error> {
        self.notified.push(chunk);
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

std::thread_local! {
    static NOW: Cell<Duration> = const { Cell::new(Duration::ZERO) };
}

/// Clock which only advances when told to.
///
/// Each thread, and therefore each test, has its own independent clock starting at zero.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct TestInstant(Duration);

impl TestInstant {
    pub fn advance(by: Duration) {
        NOW.set(NOW.get() + by);
    }
}

impl ops::Add<Duration> for TestInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Instant for TestInstant {
    fn now() -> Self {
        Self(NOW.get())
    }

    fn saturating_duration_since(self, other: Self) -> Duration {
        self.0.saturating_sub(other.0)
    }
}

#[test]
fn memory_grid_write_reports_change() {
    let mut grid = MemoryGrid::new();
    let cube = Cube::new(1, 2, 3);
    assert_eq!(grid.write_fast(cube, CellValue::AIR), Ok(false));
    assert_eq!(grid.write_fast(cube, CellValue::from(MemoryGrid::STONE)), Ok(true));
    assert_eq!(grid.write_fast(cube, CellValue::from(MemoryGrid::STONE)), Ok(false));
    assert_eq!(
        grid.write_fast(cube, CellValue::new(MemoryGrid::STONE, 1)),
        Ok(true)
    );
    assert_eq!(
        grid.write_fast(cube, CellValue::from(MemoryGrid::UNKNOWN)),
        Err(HostError::UnknownMaterial(MemoryGrid::UNKNOWN))
    );
    assert_eq!(grid.write_count(), 4);
}

#[test]
fn test_instant_advances_only_on_request() {
    let t0 = TestInstant::now();
    assert_eq!(TestInstant::now(), t0);
    TestInstant::advance(Duration::from_millis(3));
    assert_eq!(
        TestInstant::now().saturating_duration_since(t0),
        Duration::from_millis(3)
    );
    assert_eq!(t0.saturating_duration_since(TestInstant::now()), Duration::ZERO);
}
