//! Native HiGHS backend with its own time limit.

use std::time::Duration;

use equigroup_core::{LinearModel, Result, SolveStatus};
use good_lp::solvers::highs::highs;
use good_lp::solvers::WithTimeLimit;
use good_lp::ResolutionError;

use crate::translate::{map_resolution, run, translate};

pub(crate) fn solve(model: &LinearModel, time_limit: Duration) -> Result<(Vec<f64>, SolveStatus)> {
    solve_raw(model, time_limit).map_err(|e| map_resolution(e, model.name(), time_limit))
}

pub(crate) fn solve_raw(
    model: &LinearModel,
    time_limit: Duration,
) -> std::result::Result<(Vec<f64>, SolveStatus), ResolutionError> {
    let t = translate(model);
    let problem = t
        .vars
        .minimise(t.objective)
        .using(highs)
        .with_time_limit(time_limit.as_secs_f64());
    run(problem, t.constraints, &t.handles)
}
