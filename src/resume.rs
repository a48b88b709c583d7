//! Start-point resolution for a run.

/// Where a `run` call should start, decided from the requested iteration
/// count, the overwrite flag, and the last iteration already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePlan {
    /// No usable prior state, or overwrite requested: start at step 1.
    /// Under overwrite, existing checkpoints are rewritten in place as the
    /// new run reaches the same iteration numbers.
    Fresh,
    /// Load the checkpoint named `checkpoint` and continue the loop from
    /// `checkpoint + 1`.
    Resume { checkpoint: u64 },
    /// The store already holds at least `iterations` completed steps.
    /// Nothing to do unless overwrite is passed or the limit is raised;
    /// this is a normal outcome, not an error.
    Satisfied { last_iteration: u64 },
}

impl ResumePlan {
    /// Decide the plan. `last_iteration` is the store scan captured at
    /// driver construction, not a live re-query.
    pub fn resolve(iterations: u64, overwrite: bool, last_iteration: u64) -> Self {
        if overwrite {
            Self::Fresh
        } else if last_iteration >= iterations {
            Self::Satisfied { last_iteration }
        } else if last_iteration > 0 {
            Self::Resume {
                checkpoint: last_iteration,
            }
        } else {
            Self::Fresh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_starts_fresh() {
        assert_eq!(ResumePlan::resolve(500, false, 0), ResumePlan::Fresh);
    }

    #[test]
    fn prior_progress_resumes() {
        assert_eq!(
            ResumePlan::resolve(500, false, 20),
            ResumePlan::Resume { checkpoint: 20 }
        );
    }

    #[test]
    fn saturated_store_is_satisfied() {
        assert_eq!(
            ResumePlan::resolve(10, false, 10),
            ResumePlan::Satisfied { last_iteration: 10 }
        );
        assert_eq!(
            ResumePlan::resolve(10, false, 25),
            ResumePlan::Satisfied { last_iteration: 25 }
        );
    }

    #[test]
    fn overwrite_always_starts_fresh() {
        assert_eq!(ResumePlan::resolve(10, true, 25), ResumePlan::Fresh);
        assert_eq!(ResumePlan::resolve(10, true, 0), ResumePlan::Fresh);
    }

    #[test]
    fn zero_iterations_without_overwrite_is_satisfied() {
        assert_eq!(
            ResumePlan::resolve(0, false, 0),
            ResumePlan::Satisfied { last_iteration: 0 }
        );
    }
}
