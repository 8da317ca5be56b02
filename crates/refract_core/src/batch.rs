//! Batch driver: every beam origin against every color in the index table.
//!
//! Each (origin, color) trace is independent, so origins can be traced in
//! parallel with rayon. Output order is the same either way: origins in beam
//! order, colors in table order.

use log::{debug, trace};
use rayon::prelude::*;
use refract_math::{unit, DVec3};

use crate::droplet::{Discard, Droplet, TraceOutcome};
use crate::error::{ConfigError, ConfigResult};
use crate::{Beam, BeamConfig, RayPath};

/// How the batch is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Sequential,
    /// Origins are split across the rayon thread pool.
    Parallel,
}

/// Counts of what happened to every traced (origin, color) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub origins: usize,
    pub emitted: usize,
    pub missed_entry: usize,
    pub entry_total_reflection: usize,
    pub no_internal_bounce: usize,
    pub no_exit: usize,
    pub exit_total_reflection: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: &TraceOutcome) {
        match outcome {
            TraceOutcome::Emitted(_) => self.emitted += 1,
            TraceOutcome::Discarded(Discard::MissedEntry) => self.missed_entry += 1,
            TraceOutcome::Discarded(Discard::EntryTotalReflection) => {
                self.entry_total_reflection += 1
            }
            TraceOutcome::Discarded(Discard::NoInternalBounce) => self.no_internal_bounce += 1,
            TraceOutcome::Discarded(Discard::NoExit) => self.no_exit += 1,
            TraceOutcome::Discarded(Discard::ExitTotalReflection) => {
                self.exit_total_reflection += 1
            }
        }
    }

    fn merge(mut self, other: &BatchReport) -> Self {
        self.origins += other.origins;
        self.emitted += other.emitted;
        self.missed_entry += other.missed_entry;
        self.entry_total_reflection += other.entry_total_reflection;
        self.no_internal_bounce += other.no_internal_bounce;
        self.no_exit += other.no_exit;
        self.exit_total_reflection += other.exit_total_reflection;
        self
    }

    /// Pairs that produced no path.
    pub fn discarded(&self) -> usize {
        self.missed_entry
            + self.entry_total_reflection
            + self.no_internal_bounce
            + self.no_exit
            + self.exit_total_reflection
    }

    /// Every (origin, color) pair that was traced.
    pub fn attempted(&self) -> usize {
        self.emitted + self.discarded()
    }
}

/// Paths produced by a batch, plus what happened to the rest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    pub paths: Vec<RayPath>,
    pub report: BatchReport,
}

/// Trace every color from a single origin.
fn trace_origin(droplet: &Droplet, origin: DVec3, direction: DVec3) -> (Vec<RayPath>, BatchReport) {
    let mut report = BatchReport {
        origins: 1,
        ..Default::default()
    };
    let mut paths = Vec::with_capacity(droplet.table().len());

    for (band, index) in droplet.table().iter() {
        let outcome = droplet.trace_ray(origin, direction, band, index);
        report.record(&outcome);
        match outcome {
            TraceOutcome::Emitted(t) => paths.push(t.to_path(droplet.exit_extension())),
            TraceOutcome::Discarded(reason) => {
                trace!("{band} ray from {origin:?} discarded: {reason:?}")
            }
        }
    }

    (paths, report)
}

/// Trace `origins` x colors with a shared unit `direction`.
///
/// Callers have already checked that `direction` is unit length and every
/// origin lies outside the droplet. Rays that miss the droplet or are totally
/// internally reflected contribute nothing to `paths`; they are only counted
/// in the report.
pub(crate) fn trace_origins(
    droplet: &Droplet,
    origins: &[DVec3],
    direction: DVec3,
    execution: Execution,
) -> BatchResult {
    let per_origin: Vec<(Vec<RayPath>, BatchReport)> = match execution {
        Execution::Sequential => origins
            .iter()
            .map(|&origin| trace_origin(droplet, origin, direction))
            .collect(),
        Execution::Parallel => origins
            .par_iter()
            .map(|&origin| trace_origin(droplet, origin, direction))
            .collect(),
    };

    let mut result = BatchResult::default();
    for (paths, report) in per_origin {
        result.paths.extend(paths);
        result.report = result.report.merge(&report);
    }

    debug!(
        "Traced {} origins x {} colors: {} emitted, {} discarded",
        result.report.origins,
        droplet.table().len(),
        result.report.emitted,
        result.report.discarded()
    );
    result
}

impl Droplet {
    /// Reject the first origin that is not strictly outside the sphere.
    fn check_origins(&self, origins: &[DVec3]) -> ConfigResult<()> {
        if !origins.iter().all(|p| p.is_finite()) {
            return Err(ConfigError::NonFinite { field: "ray origin" });
        }
        match origins.iter().find(|&&p| self.sphere().contains(p)) {
            Some(&p) => Err(ConfigError::OriginInsideDroplet(p)),
            None => Ok(()),
        }
    }

    /// Trace caller-supplied origins along `direction`, which is validated
    /// and normalized first. Every origin must lie outside the droplet.
    pub fn trace_along(
        &self,
        origins: &[DVec3],
        direction: DVec3,
        execution: Execution,
    ) -> ConfigResult<BatchResult> {
        let direction = unit(direction).ok_or(ConfigError::DegenerateDirection)?;
        self.check_origins(origins)?;
        Ok(trace_origins(self, origins, direction, execution))
    }

    /// Build the cylindrical beam described by `config` around this droplet
    /// and trace it.
    pub fn trace_beam(
        &self,
        config: &BeamConfig,
        execution: Execution,
    ) -> ConfigResult<(Beam, BatchResult)> {
        let beam = Beam::cylinder(self.sphere().center(), config)?;
        self.check_origins(beam.origins())?;
        let result = trace_origins(self, beam.origins(), beam.direction(), execution);
        Ok((beam, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Band, DropletConfig, RefractiveIndexTable};

    const DOWN: DVec3 = DVec3::new(0.0, 0.0, -1.0);

    #[test]
    fn test_order_is_origins_then_colors() {
        let droplet = Droplet::default();
        let origins = [DVec3::new(0.0, 0.3, 5.0), DVec3::new(0.4, 0.0, 5.0)];
        let result = trace_origins(&droplet, &origins, DOWN, Execution::Sequential);

        assert_eq!(result.paths.len(), 12);
        assert_eq!(result.report.emitted, 12);
        for (i, path) in result.paths.iter().enumerate() {
            assert_eq!(path.band, Band::ALL[i % 6]);
            assert_eq!(path.segments.incoming.start, origins[i / 6]);
            assert!(path.is_contiguous(1e-12));
        }
    }

    #[test]
    fn test_missing_origin_contributes_nothing() {
        let droplet = Droplet::default();
        let origins = [
            DVec3::new(0.0, 0.5, 5.0),
            DVec3::new(3.0, 0.0, 5.0),
            DVec3::new(-0.2, -0.2, 5.0),
        ];
        let result = trace_origins(&droplet, &origins, DOWN, Execution::Sequential);

        assert_eq!(result.report.origins, 3);
        assert_eq!(result.report.attempted(), 18);
        assert_eq!(result.report.missed_entry, 6);
        assert_eq!(result.paths.len(), 12);
        assert!(result
            .paths
            .iter()
            .all(|p| p.segments.incoming.start != origins[1]));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let droplet = Droplet::default();
        let config = BeamConfig {
            num_rays: 64,
            cylinder_radius: 0.9,
            ..Default::default()
        };
        let (_, sequential) = droplet.trace_beam(&config, Execution::Sequential).unwrap();
        let (_, parallel) = droplet.trace_beam(&config, Execution::Parallel).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_beam_bounded_by_six_per_origin() {
        let droplet = Droplet::default();
        let config = BeamConfig {
            num_rays: 40,
            cylinder_radius: 1.5,
            ..Default::default()
        };
        let (beam, result) = droplet.trace_beam(&config, Execution::Sequential).unwrap();

        assert_eq!(beam.len(), 40);
        // Beam wider than the droplet: every ray misses
        assert!(result.paths.is_empty());
        assert_eq!(result.report.missed_entry, 240);

        let config = BeamConfig {
            num_rays: 40,
            ..Default::default()
        };
        let (_, result) = droplet.trace_beam(&config, Execution::Sequential).unwrap();
        assert!(result.paths.len() <= 6 * 40);
        assert_eq!(result.report.attempted(), 240);
        assert_eq!(result.report.emitted, result.paths.len());
    }

    #[test]
    fn test_trace_along_validates_direction() {
        let droplet = Droplet::default();
        let origins = [DVec3::new(0.0, 0.0, 5.0)];
        assert_eq!(
            droplet.trace_along(&origins, DVec3::ZERO, Execution::Sequential),
            Err(ConfigError::DegenerateDirection)
        );

        // Unnormalized direction is normalized before tracing
        let scaled = droplet
            .trace_along(&origins, DVec3::new(0.0, 0.0, -7.0), Execution::Sequential)
            .unwrap();
        let normalized = droplet
            .trace_along(&origins, DOWN, Execution::Sequential)
            .unwrap();
        assert_eq!(scaled.paths.len(), 6);
        assert_eq!(scaled, normalized);

        let off_axis = [DVec3::new(0.0, 0.7, 5.0)];
        let scaled = droplet
            .trace_along(&off_axis, DVec3::new(0.0, 0.0, -2.0), Execution::Sequential)
            .unwrap();
        let normalized = droplet
            .trace_along(&off_axis, DOWN, Execution::Sequential)
            .unwrap();
        assert_eq!(scaled.paths.len(), 6);
        for (a, b) in scaled.paths.iter().zip(&normalized.paths) {
            assert!(a.segments.outgoing.end.abs_diff_eq(b.segments.outgoing.end, 1e-12));
        }
    }

    #[test]
    fn test_origins_inside_droplet_rejected() {
        let droplet = Droplet::default();
        let config = BeamConfig {
            num_rays: 4,
            cylinder_radius: 0.2,
            distance: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            droplet.trace_beam(&config, Execution::Sequential),
            Err(ConfigError::OriginInsideDroplet(_))
        ));

        // On the surface counts as inside
        let on_surface = DVec3::new(0.0, 0.0, 1.0);
        assert_eq!(
            droplet.trace_along(
                &[DVec3::new(0.0, 0.0, 5.0), on_surface],
                DOWN,
                Execution::Sequential
            ),
            Err(ConfigError::OriginInsideDroplet(on_surface))
        );
        assert_eq!(
            droplet.trace_along(&[DVec3::NAN], DOWN, Execution::Parallel),
            Err(ConfigError::NonFinite { field: "ray origin" })
        );

        // Standoff just clear of the surface is accepted
        let config = BeamConfig {
            num_rays: 4,
            cylinder_radius: 0.2,
            distance: 1.5,
            ..Default::default()
        };
        assert!(droplet.trace_beam(&config, Execution::Sequential).is_ok());
    }

    #[test]
    fn test_custom_table_drives_colors() {
        let droplet = Droplet::new(DropletConfig {
            table: RefractiveIndexTable::new(vec![(Band::Violet, 1.342), (Band::Red, 1.331)])
                .unwrap(),
            ..Default::default()
        })
        .unwrap();
        let result = droplet
            .trace_along(&[DVec3::new(0.0, 0.7, 5.0)], DOWN, Execution::Sequential)
            .unwrap();

        let bands: Vec<Band> = result.paths.iter().map(|p| p.band).collect();
        assert_eq!(bands, vec![Band::Violet, Band::Red]);
    }
}
