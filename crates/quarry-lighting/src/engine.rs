use std::collections::VecDeque;
use std::time::Instant;

use rayon::prelude::*;

use crate::access::{COLUMN_WIDTH, ColumnPos, SECTION_HEIGHT, VoxelAccess};
use crate::error::LightError;
use crate::opacity::OpacityClassifier;
use crate::value::LightValue;

// Face neighbours: +X, -X, +Y, -Y, +Z, -Z
const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Counters from one column bake.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BakeStats {
    /// Voxels lit directly by the sky or by their own emission.
    pub seeded: usize,
    /// Neighbour raises performed by the flood.
    pub raised: usize,
    /// Worklist entries processed (seeds plus raises).
    pub visited: usize,
}

/// Outcome of a batch bake. Columns that failed keep whatever light they
/// held when the error surfaced.
#[derive(Debug, Default)]
pub struct BakeReport {
    pub baked: Vec<(ColumnPos, BakeStats)>,
    pub failures: Vec<(ColumnPos, LightError)>,
}

impl BakeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sky and block light flood fill over one column at a time.
///
/// Holds the worklist so its allocation is reused across bakes.
#[derive(Debug, Default)]
pub struct LightPropagationEngine {
    queue: VecDeque<(usize, i32, usize)>,
}

impl LightPropagationEngine {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(4096),
        }
    }

    /// Recomputes all light in the populated sections of `access`.
    ///
    /// The existing field is cleared first, so baking an already baked
    /// column leaves it unchanged.
    pub fn bake_column<A, C>(&mut self, access: &mut A, classifier: &C) -> Result<BakeStats, LightError>
    where
        A: VoxelAccess + ?Sized,
        C: OpacityClassifier + ?Sized,
    {
        let mut stats = BakeStats::default();
        let (Some(lo), Some(hi)) = (
            access.lowest_populated_section(),
            access.highest_populated_section(),
        ) else {
            return Ok(stats);
        };
        let bounds = lo.checked_mul(SECTION_HEIGHT).zip(
            hi.checked_add(1)
                .and_then(|top| top.checked_mul(SECTION_HEIGHT)),
        );
        let Some((y_min, y_max)) = bounds else {
            return Err(LightError::HeightRange {
                lowest: lo,
                highest: hi,
            });
        };
        self.queue.clear();

        for y in y_min..y_max {
            for z in 0..COLUMN_WIDTH {
                for x in 0..COLUMN_WIDTH {
                    access.set_light(x, y, z, LightValue::DARK)?;
                }
            }
        }

        // Sky: walk each open column down to its heightmap voxel
        for z in 0..COLUMN_WIDTH {
            for x in 0..COLUMN_WIDTH {
                let mut carried = LightValue::FULL_SKY;
                for y in (y_min..y_max).rev() {
                    let block = access.block(x, y, z)?;
                    carried = carried
                        .attenuated_downward()
                        .reduced_by(classifier.opacity(block));
                    if carried.is_dark() {
                        break;
                    }
                    access.set_light(x, y, z, carried)?;
                    self.queue.push_back((x, y, z));
                    stats.seeded += 1;
                    if classifier.is_heightmap_solid(block) {
                        break;
                    }
                }
            }
        }

        // Emitters
        for y in y_min..y_max {
            for z in 0..COLUMN_WIDTH {
                for x in 0..COLUMN_WIDTH {
                    let emission = classifier.emission(access.block(x, y, z)?);
                    if emission == 0 {
                        continue;
                    }
                    let current = access.light(x, y, z)?;
                    let lit = current.brightest(LightValue::new(emission, 0));
                    if lit.has_stronger_light_than(current) {
                        access.set_light(x, y, z, lit)?;
                        self.queue.push_back((x, y, z));
                        stats.seeded += 1;
                    }
                }
            }
        }

        while let Some((x, y, z)) = self.queue.pop_front() {
            stats.visited += 1;
            let here = access.light(x, y, z)?;
            if here.is_dark() {
                continue;
            }
            for (dx, dy, dz) in NEIGHBORS {
                let nx = x as i32 + dx;
                let Some(ny) = y.checked_add(dy) else {
                    continue;
                };
                let nz = z as i32 + dz;
                if nx < 0
                    || nz < 0
                    || nx >= COLUMN_WIDTH as i32
                    || nz >= COLUMN_WIDTH as i32
                    || ny < y_min
                    || ny >= y_max
                {
                    continue;
                }
                let (nx, nz) = (nx as usize, nz as usize);
                let step = if dy < 0 {
                    here.attenuated_downward()
                } else {
                    here.attenuated()
                };
                let candidate = step.reduced_by(classifier.opacity(access.block(nx, ny, nz)?));
                let current = access.light(nx, ny, nz)?;
                if candidate.has_stronger_light_than(current) {
                    access.set_light(nx, ny, nz, candidate.brightest(current))?;
                    self.queue.push_back((nx, ny, nz));
                    stats.raised += 1;
                }
            }
        }
        Ok(stats)
    }
}

/// Bakes one column with a fresh engine.
pub fn bake_column<A, C>(access: &mut A, classifier: &C) -> Result<BakeStats, LightError>
where
    A: VoxelAccess + ?Sized,
    C: OpacityClassifier + ?Sized,
{
    LightPropagationEngine::new().bake_column(access, classifier)
}

/// Bakes every column in parallel.
///
/// A column whose storage fails is logged and reported; the rest of the
/// batch still completes.
pub fn bake_columns<A, C>(columns: &mut [A], classifier: &C) -> BakeReport
where
    A: VoxelAccess + Send,
    C: OpacityClassifier + Sync + ?Sized,
{
    let start = Instant::now();
    let results: Vec<(ColumnPos, Result<BakeStats, LightError>)> = columns
        .par_iter_mut()
        .map_init(LightPropagationEngine::new, |engine, column| {
            let pos = column.position();
            (pos, engine.bake_column(column, classifier))
        })
        .collect();

    let mut report = BakeReport::default();
    for (pos, result) in results {
        match result {
            Ok(stats) => report.baked.push((pos, stats)),
            Err(e) => {
                log::warn!("light bake failed for column {}: {}", pos, e);
                report.failures.push((pos, e));
            }
        }
    }
    log::info!(
        target: "perf",
        "ms={} light_bake columns={} failed={}",
        start.elapsed().as_millis(),
        report.baked.len(),
        report.failures.len()
    );
    report
}
