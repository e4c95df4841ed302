/// Knobs for a matrix evaluation pass.
///
/// ```
/// use pandatex::EvalOptions;
///
/// let opts = EvalOptions::new().parallel(true).num_threads(4);
/// assert!(opts.is_parallel());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalOptions {
    parallel: bool,
    num_threads: Option<usize>,
    hoist_conditional_values: bool,
}

impl EvalOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate rows concurrently on the rayon pool.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run parallel passes on a dedicated pool of `n` threads instead of the
    /// global one. Implies [`parallel`](Self::parallel); `0` lets rayon pick.
    #[must_use]
    pub fn num_threads(mut self, n: usize) -> Self {
        self.parallel = true;
        self.num_threads = Some(n);
        self
    }

    /// Resolve every lazy operand once before the pass instead of once per
    /// cell. Results differ from the default only if a group changes while
    /// the pass is running.
    #[must_use]
    pub fn hoist_conditional_values(mut self, hoist: bool) -> Self {
        self.hoist_conditional_values = hoist;
        self
    }

    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    #[must_use]
    pub fn threads(&self) -> Option<usize> {
        self.num_threads
    }

    #[must_use]
    pub fn hoists_conditional_values(&self) -> bool {
        self.hoist_conditional_values
    }
}
