//! Move selection for one step.

/// Keeps the accepted move with the greatest key.
///
/// Keys compare lexicographically with `f64::total_cmp`; on equal keys the
/// first move offered wins, so generation order settles ties.
#[derive(Debug)]
pub struct BestMoveForager<T> {
    best: Option<((f64, f64), T)>,
}

impl<T> Default for BestMoveForager<T> {
    fn default() -> Self {
        Self { best: None }
    }
}

impl<T> BestMoveForager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called at the start of each step to reset state.
    pub fn step_started(&mut self) {
        self.best = None;
    }

    pub fn add_move(&mut self, key: (f64, f64), item: T) {
        let better = match &self.best {
            None => true,
            Some((best, _)) => key
                .0
                .total_cmp(&best.0)
                .then(key.1.total_cmp(&best.1))
                .is_gt(),
        };
        if better {
            self.best = Some((key, item));
        }
    }

    /// Picks the best move from those collected.
    pub fn pick_move(&mut self) -> Option<T> {
        self.best.take().map(|(_, item)| item)
    }
}
