//! The globally adaptive integration driver.
//!
//! The driver keeps a partition of the integration range, always bisects the subinterval with
//! the largest error estimate, and periodically extrapolates the sequence of integral
//! approximations with the epsilon algorithm. The scheme is the one of QUADPACK's `QAGS` and
//! `QAGI` routines; the rule passed in decides which of the two it is.

use super::extrapolation::EpsilonTable;
use super::options::QuadratureOptions;
use super::rules::Rule;
use super::{QuadratureResult, QuadratureWarning};
use crate::error::VirialError;
use crate::math::constants::{MACHINE_EPSILON, OVERFLOW, UNDERFLOW};

/// Internal termination flags. Several map onto the same public warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    None,
    MaxSubdivisions,
    Roundoff,
    RoundoffDetected,
    BadIntegrand,
    ExtrapolationRoundoff,
    Divergent,
}

impl Flag {
    fn into_warning(self) -> Option<QuadratureWarning> {
        match self {
            Flag::None => None,
            Flag::MaxSubdivisions => Some(QuadratureWarning::MaxSubdivisions),
            Flag::Roundoff | Flag::RoundoffDetected => Some(QuadratureWarning::RoundoffError),
            Flag::BadIntegrand => Some(QuadratureWarning::BadIntegrandBehavior),
            Flag::ExtrapolationRoundoff => Some(QuadratureWarning::ExtrapolationRoundoff),
            Flag::Divergent => Some(QuadratureWarning::Divergent),
        }
    }
}

/// Where the main loop hands control after it stops bisecting.
enum Exit {
    /// Compare the extrapolated result against the plain sum.
    Check,
    /// Use the sum over all subintervals.
    Sum,
    /// Keep the current result as is.
    Done,
}

/// The current partition of the integration range.
///
/// `order` lists interval indices by decreasing error estimate, at least for the part of the
/// list that can still be bisected before the subdivision budget runs out.
struct Partition {
    lower: Vec<f64>,
    upper: Vec<f64>,
    result: Vec<f64>,
    error: Vec<f64>,
    order: Vec<usize>,
    limit: usize,
}

impl Partition {
    fn new(limit: usize, a: f64, b: f64, result: f64, error: f64) -> Self {
        let mut partition = Self {
            lower: vec![0.0; limit],
            upper: vec![0.0; limit],
            result: vec![0.0; limit],
            error: vec![0.0; limit],
            order: vec![0; limit],
            limit,
        };
        partition.lower[0] = a;
        partition.upper[0] = b;
        partition.result[0] = result;
        partition.error[0] = error;
        partition
    }

    fn width(&self, index: usize) -> f64 {
        (self.upper[index] - self.lower[index]).abs()
    }

    /// Restores the descending error order after interval `maxerr` was bisected into itself
    /// and the newest interval `last - 1`.
    ///
    /// Returns the new `(maxerr, errmax)`. `nrmax` is the position in `order` of the interval
    /// to bisect next and is updated in place.
    fn sort(&mut self, last: usize, maxerr: usize, nrmax: &mut usize) -> (usize, f64) {
        let newest = last - 1;
        if last <= 2 {
            self.order[0] = 0;
            self.order[1] = 1;
        } else {
            let errmax = self.error[maxerr];
            // Roundoff may have made the bisected interval's error larger than that of
            // intervals ranked above it.
            while *nrmax > 0 {
                let isucc = self.order[*nrmax - 1];
                if errmax <= self.error[isucc] {
                    break;
                }
                self.order[*nrmax] = isucc;
                *nrmax -= 1;
            }

            // Only the first `jupbn` positions need to stay sorted; intervals beyond can never
            // be bisected within the remaining budget.
            let jupbn = if last > self.limit / 2 + 2 {
                self.limit + 2 - last
            } else {
                last - 1
            };
            let errmin = self.error[newest];
            let jbnd = jupbn - 1;

            let mut insert_at = None;
            for i in (*nrmax + 1)..=jbnd {
                let isucc = self.order[i];
                if errmax >= self.error[isucc] {
                    insert_at = Some(i);
                    break;
                }
                self.order[i - 1] = isucc;
            }

            match insert_at {
                None => {
                    self.order[jbnd] = maxerr;
                    self.order[jupbn] = newest;
                }
                Some(i) => {
                    self.order[i - 1] = maxerr;
                    let mut k = jbnd;
                    let mut placed = false;
                    for _ in i..=jbnd {
                        let isucc = self.order[k];
                        if errmin < self.error[isucc] {
                            self.order[k + 1] = newest;
                            placed = true;
                            break;
                        }
                        self.order[k + 1] = isucc;
                        k -= 1;
                    }
                    if !placed {
                        self.order[i] = newest;
                    }
                }
            }
        }

        let maxerr = self.order[*nrmax];
        (maxerr, self.error[maxerr])
    }

    fn sum(&self, last: usize) -> f64 {
        self.result[..last].iter().sum()
    }
}

/// Integrates `f` over `[a, b]` in the coordinates of `rule`.
///
/// For the infinite-range rule `[a, b]` is `[0, 1]` in the transformed variable.
pub(crate) fn integrate<F, R>(
    f: &mut F,
    rule: &R,
    a: f64,
    b: f64,
    options: &QuadratureOptions,
) -> Result<QuadratureResult, VirialError>
where
    F: FnMut(f64) -> f64,
    R: Rule,
{
    options.validate()?;

    let epsabs = options.abs_tolerance;
    let epsrel = options.rel_tolerance;
    let limit = options.max_subdivisions;

    let first = rule.apply(f, a, b);
    let mut result = first.result;
    let mut abserr = first.abs_error;
    let defabs = first.abs_integral;
    let resabs = first.deviation;

    let mut partition = Partition::new(limit, a, b, result, abserr);
    let mut last = 1;

    let dres = result.abs();
    let mut errbnd = epsabs.max(epsrel * dres);
    let mut flag = Flag::None;
    if abserr <= 100.0 * MACHINE_EPSILON * defabs && abserr > errbnd {
        flag = Flag::Roundoff;
    }
    if limit == 1 {
        flag = Flag::MaxSubdivisions;
    }
    if flag != Flag::None || (abserr <= errbnd && abserr != resabs) || abserr == 0.0 {
        return Ok(finish(rule, result, abserr, flag, last));
    }

    let mut table = EpsilonTable::new(result);
    let mut errmax = abserr;
    let mut maxerr = 0;
    let mut area = result;
    let mut errsum = abserr;
    abserr = OVERFLOW;
    let mut nrmax = 0;
    let mut ktmin = 0;
    let mut extrap = false;
    let mut noext = false;
    let mut extrapolation_roundoff = false;
    let mut iroff1 = 0;
    let mut iroff2 = 0;
    let mut iroff3 = 0;
    let ksgn_negative = dres < (1.0 - 50.0 * MACHINE_EPSILON) * defabs;
    let mut small = 0.0;
    let mut erlarg = 0.0;
    let mut ertest = 0.0;
    let mut correc = 0.0;

    let mut exit = Exit::Check;

    'bisect: for step in 2..=limit {
        last = step;
        let newest = last - 1;

        let a1 = partition.lower[maxerr];
        let b1 = 0.5 * (partition.lower[maxerr] + partition.upper[maxerr]);
        let a2 = b1;
        let b2 = partition.upper[maxerr];
        let erlast = errmax;

        let left = rule.apply(f, a1, b1);
        let right = rule.apply(f, a2, b2);
        let (area1, error1) = (left.result, left.abs_error);
        let (area2, error2) = (right.result, right.abs_error);

        let area12 = area1 + area2;
        let erro12 = error1 + error2;
        errsum = errsum + erro12 - errmax;
        area = area + area12 - partition.result[maxerr];

        if left.deviation != error1 && right.deviation != error2 {
            if (partition.result[maxerr] - area12).abs() <= 1.0e-5 * area12.abs()
                && erro12 >= 0.99 * errmax
            {
                if extrap {
                    iroff2 += 1;
                } else {
                    iroff1 += 1;
                }
            }
            if last > 10 && erro12 > errmax {
                iroff3 += 1;
            }
        }

        partition.result[maxerr] = area1;
        partition.result[newest] = area2;
        errbnd = epsabs.max(epsrel * area.abs());

        if iroff1 + iroff2 >= 10 || iroff3 >= 20 {
            flag = Flag::Roundoff;
        }
        if iroff2 >= 5 {
            extrapolation_roundoff = true;
        }
        if last == limit {
            flag = Flag::MaxSubdivisions;
        }
        if a1.abs().max(b2.abs())
            <= (1.0 + 100.0 * MACHINE_EPSILON) * (a2.abs() + 1000.0 * UNDERFLOW)
        {
            flag = Flag::BadIntegrand;
        }

        if error2 > error1 {
            partition.lower[maxerr] = a2;
            partition.lower[newest] = a1;
            partition.upper[newest] = b1;
            partition.result[maxerr] = area2;
            partition.result[newest] = area1;
            partition.error[maxerr] = error2;
            partition.error[newest] = error1;
        } else {
            partition.lower[newest] = a2;
            partition.upper[maxerr] = b1;
            partition.upper[newest] = b2;
            partition.error[maxerr] = error1;
            partition.error[newest] = error2;
        }

        (maxerr, errmax) = partition.sort(last, maxerr, &mut nrmax);

        if errsum <= errbnd {
            exit = Exit::Sum;
            break 'bisect;
        }
        if flag != Flag::None {
            break 'bisect;
        }
        if last == 2 {
            small = 0.375 * (b - a).abs();
            erlarg = errsum;
            ertest = errbnd;
            table.set(1, area);
            continue;
        }
        if noext {
            continue;
        }

        erlarg -= erlast;
        if (b1 - a1).abs() > small {
            erlarg += erro12;
        }
        if !extrap {
            // Extrapolation starts once the interval to bisect next is among the smallest.
            if partition.width(maxerr) > small {
                continue;
            }
            extrap = true;
            nrmax = 1;
        }

        if !extrapolation_roundoff && erlarg > ertest {
            // Large intervals still dominate the error: bisect them before extrapolating.
            let jupbnd = if last > 2 + limit / 2 {
                limit + 3 - last
            } else {
                last
            };
            for _ in nrmax..jupbnd {
                maxerr = partition.order[nrmax];
                errmax = partition.error[maxerr];
                if partition.width(maxerr) > small {
                    continue 'bisect;
                }
                nrmax += 1;
            }
        }

        let (reseps, abseps) = table.extrapolate(area);
        ktmin += 1;
        if ktmin > 5 && abserr < 1.0e-3 * errsum {
            flag = Flag::ExtrapolationRoundoff;
        }
        if abseps < abserr {
            ktmin = 0;
            abserr = abseps;
            result = reseps;
            correc = erlarg;
            ertest = epsabs.max(epsrel * reseps.abs());
            if abserr <= ertest {
                break 'bisect;
            }
        }

        if table.len() == 1 {
            noext = true;
        }
        if flag == Flag::ExtrapolationRoundoff {
            break 'bisect;
        }

        maxerr = partition.order[0];
        errmax = partition.error[maxerr];
        nrmax = 0;
        extrap = false;
        small *= 0.5;
        erlarg = errsum;
    }

    if let Exit::Check = exit {
        exit = check_extrapolation(
            &mut flag,
            &mut abserr,
            result,
            area,
            errsum,
            correc,
            extrapolation_roundoff,
        );
    }

    match exit {
        Exit::Check => {
            let negligible = ksgn_negative && result.abs().max(area.abs()) <= defabs * 0.01;
            if !negligible
                && (0.01 > result / area || result / area > 100.0 || errsum > area.abs())
            {
                flag = Flag::Divergent;
            }
        }
        Exit::Sum => {
            result = partition.sum(last);
            abserr = errsum;
        }
        Exit::Done => {}
    }

    Ok(finish(rule, result, abserr, flag, last))
}

/// Decides whether the extrapolated result can be trusted over the plain sum.
///
/// Returns `Exit::Check` to continue with the divergence test on the extrapolated result,
/// `Exit::Sum` to fall back to the sum over all subintervals, and `Exit::Done` when both
/// vanish.
fn check_extrapolation(
    flag: &mut Flag,
    abserr: &mut f64,
    result: f64,
    area: f64,
    errsum: f64,
    correc: f64,
    extrapolation_roundoff: bool,
) -> Exit {
    if *abserr == OVERFLOW {
        return Exit::Sum;
    }
    if *flag == Flag::None && !extrapolation_roundoff {
        return Exit::Check;
    }
    if extrapolation_roundoff {
        *abserr += correc;
    }
    if *flag == Flag::None {
        *flag = Flag::RoundoffDetected;
    }
    if result != 0.0 && area != 0.0 {
        if *abserr / result.abs() > errsum / area.abs() {
            return Exit::Sum;
        }
        return Exit::Check;
    }
    if *abserr > errsum {
        return Exit::Sum;
    }
    if area == 0.0 {
        return Exit::Done;
    }
    Exit::Check
}

fn finish<R: Rule>(
    rule: &R,
    value: f64,
    abs_error: f64,
    flag: Flag,
    last: usize,
) -> QuadratureResult {
    QuadratureResult {
        value,
        abs_error,
        evaluations: rule.evaluations() * (2 * last - 1),
        subintervals: last,
        warning: flag.into_warning(),
    }
}
