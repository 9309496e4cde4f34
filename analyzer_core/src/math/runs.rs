use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Direction of one monotonic price run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
pub enum RunDirection {
    #[strum(serialize = "UP")]
    Up,
    #[strum(serialize = "DOWN")]
    Down,
}

/// Maximal stretch of strictly monotonic day-over-day movement.
///
/// `start` and `end` are price indices and both belong to the run, so the
/// peak that ends an up-run is also the first index of the down-run that
/// follows it. `magnitude` is the signed net change `close[end] -
/// close[start]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub direction: RunDirection,
    pub magnitude: f64,
}

impl Run {
    /// Number of prices covered, so a single up step has length 2.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Number of day-over-day steps covered.
    pub fn steps(&self) -> usize {
        self.end - self.start
    }
}

/// Ordered run list plus the scalar summaries derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RunReport {
    pub runs: Vec<Run>,
    pub up_steps: usize,
    pub down_steps: usize,
    longest_up: Option<usize>,
    longest_down: Option<usize>,
}

impl RunReport {
    /// Longest up-run; the earliest one wins a length tie.
    pub fn longest_up(&self) -> Option<&Run> {
        self.longest_up.map(|i| &self.runs[i])
    }

    /// Longest down-run; the earliest one wins a length tie.
    pub fn longest_down(&self) -> Option<&Run> {
        self.longest_down.map(|i| &self.runs[i])
    }

    fn push(&mut self, run: Run) {
        match run.direction {
            RunDirection::Up => self.up_steps += run.steps(),
            RunDirection::Down => self.down_steps += run.steps(),
        }

        let slot = match run.direction {
            RunDirection::Up => &mut self.longest_up,
            RunDirection::Down => &mut self.longest_down,
        };
        // strictly longer replaces, so the earliest run keeps a tie
        let current = *slot;
        if current.map_or(true, |i| run.len() > self.runs[i].len()) {
            *slot = Some(self.runs.len());
        }
        self.runs.push(run);
    }
}

/// Single-pass run identification.
///
/// A strictly greater close extends or starts an up-run, a strictly lesser
/// one a down-run; an unchanged close finalizes any open run and starts
/// nothing. `finish` flushes the run still open at the end of the series.
#[derive(Debug, Default)]
pub struct RunTracker {
    report: RunReport,
    last_price: Option<f64>,
    index: usize,
    open: Option<Run>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, price: f64) {
        let index = self.index;
        self.index += 1;

        let last_price = match self.last_price.replace(price) {
            Some(p) => p,
            None => return,
        };

        let direction = if price > last_price {
            Some(RunDirection::Up)
        } else if price < last_price {
            Some(RunDirection::Down)
        } else {
            None
        };

        match direction {
            Some(dir) => {
                match self.open.as_mut() {
                    Some(run) if run.direction == dir => {
                        run.end = index;
                        run.magnitude += price - last_price;
                    }
                    _ => {
                        if let Some(run) = self.open.take() {
                            self.report.push(run);
                        }
                        self.open = Some(Run {
                            start: index - 1,
                            end: index,
                            direction: dir,
                            magnitude: price - last_price,
                        });
                    }
                }
            }
            None => {
                if let Some(run) = self.open.take() {
                    self.report.push(run);
                }
            }
        }
    }

    pub fn finish(mut self) -> RunReport {
        if let Some(run) = self.open.take() {
            self.report.push(run);
        }
        self.report
    }
}
