//! Instruction logger of the emulated vector unit.
//!
//! Every instruction the [`VectorUnit`](super::unit::VectorUnit) executes is
//! counted together with the number of lanes its mask kept active. The ratio
//! of active lanes to issued lanes is the vector utilization: the fraction of
//! the hardware a predicated program actually puts to work. Divergent
//! branches and loops whose lanes finish at different times lower it.
//!
//! A logger can additionally keep a trace of every instruction with the mask
//! it ran under, which is handy to inspect how a kernel diverges.
//!
//! Records are also forwarded to the `log` facade at `trace` level.

use std::fmt;

use log::trace;

use super::mask::Mask;

/// Aggregated utilization counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub vector_width: usize,
    pub total_instructions: usize,
    pub utilized_lanes: usize,
    pub total_lanes: usize,
}

impl Stats {
    /// Percentage of issued lanes that were active, `0.0` when nothing ran.
    pub fn utilization(&self) -> f64 {
        if self.total_lanes == 0 {
            return 0.0;
        }
        100.0 * self.utilized_lanes as f64 / self.total_lanes as f64
    }

    /// Folds the counters of another run into these.
    ///
    /// # Panics
    ///
    /// Panics if both sides recorded instructions at different widths.
    pub fn merge(&mut self, other: &Stats) {
        if self.vector_width == 0 {
            self.vector_width = other.vector_width;
        }
        assert!(
            other.vector_width == 0 || other.vector_width == self.vector_width,
            "Cannot merge statistics of width {} into width {}",
            other.vector_width,
            self.vector_width
        );

        self.total_instructions += other.total_instructions;
        self.utilized_lanes += other.utilized_lanes;
        self.total_lanes += other.total_lanes;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vector width:              {}", self.vector_width)?;
        writeln!(f, "Total vector instructions: {}", self.total_instructions)?;
        writeln!(f, "Vector utilization:        {:.6}%", self.utilization())?;
        writeln!(f, "Utilized vector lanes:     {}", self.utilized_lanes)?;
        write!(f, "Total vector lanes:        {}", self.total_lanes)
    }
}

/// One traced instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub instruction: &'static str,
    /// Mask rendered as `*` (active) and `_` (inactive).
    pub mask: String,
}

#[derive(Clone, Debug, Default)]
pub struct Logger {
    stats: Stats,
    entries: Option<Vec<LogEntry>>,
}

impl Logger {
    /// Logger that only keeps counters.
    pub fn new(vector_width: usize) -> Self {
        Self {
            stats: Stats {
                vector_width,
                ..Stats::default()
            },
            entries: None,
        }
    }

    /// Logger that also keeps a per-instruction trace.
    pub fn with_trace(vector_width: usize) -> Self {
        Self {
            entries: Some(Vec::new()),
            ..Self::new(vector_width)
        }
    }

    pub fn record<const W: usize>(&mut self, instruction: &'static str, mask: &Mask<W>) {
        debug_assert_eq!(W, self.stats.vector_width, "mask width differs from logger width");

        self.stats.total_instructions += 1;
        self.stats.utilized_lanes += mask.count();
        self.stats.total_lanes += W;

        trace!("{instruction:<12} | {mask}");

        if let Some(entries) = self.entries.as_mut() {
            entries.push(LogEntry {
                instruction,
                mask: mask.to_string(),
            });
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Traced instructions, empty unless built with [`Logger::with_trace`].
    pub fn entries(&self) -> &[LogEntry] {
        self.entries.as_deref().unwrap_or(&[])
    }

    pub fn is_tracing(&self) -> bool {
        self.entries.is_some()
    }

    /// One line per traced instruction: `name | mask`.
    pub fn render_trace(&self) -> String {
        self.entries()
            .iter()
            .map(|entry| format!("{:<12} | {}", entry.instruction, entry.mask))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Clears counters and trace, keeping width and trace mode.
    pub fn reset(&mut self) {
        self.stats = Stats {
            vector_width: self.stats.vector_width,
            ..Stats::default()
        };
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }
}
