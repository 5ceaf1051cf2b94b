//! Wynn's epsilon algorithm for accelerating the sequence of adaptive partial sums.
//!
//! The adaptive driver feeds the table one new element per extrapolation step (the current
//! integral approximation). The table keeps the lower diagonal of the epsilon scheme and
//! returns the best limit estimate together with an error estimate derived from the last
//! three extrapolated results.

use crate::math::constants::{MACHINE_EPSILON, OVERFLOW};

/// Maximum number of elements the table holds before discarding the oldest ones.
const LIMEXP: usize = 50;

/// An epsilon-algorithm extrapolation table.
#[derive(Debug, Clone)]
pub(crate) struct EpsilonTable {
    /// Current diagonal of the table. Only the first `len` entries are meaningful.
    table: [f64; LIMEXP + 2],
    len: usize,
    /// The last three extrapolated results.
    last_results: [f64; 3],
    /// Number of calls to `extrapolate` so far.
    calls: usize,
}

impl EpsilonTable {
    /// Creates a table seeded with a first element.
    pub fn new(first: f64) -> Self {
        let mut table = [0.0; LIMEXP + 2];
        table[0] = first;
        Self {
            table,
            len: 1,
            last_results: [0.0; 3],
            calls: 0,
        }
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` in the table without extrapolating.
    ///
    /// Used for the second element, which is recorded before extrapolation starts.
    pub fn set(&mut self, index: usize, value: f64) {
        self.table[index] = value;
        self.len = self.len.max(index + 1);
    }

    /// Appends `value` and runs one step of the epsilon algorithm.
    ///
    /// Returns `(result, abs_error)`. The error estimate is the largest finite double until at
    /// least four extrapolations have been performed.
    pub fn extrapolate(&mut self, value: f64) -> (f64, f64) {
        if self.len >= LIMEXP {
            // Only reachable after an early convergence exit on a full table.
            let drop = self.len - (LIMEXP - 1);
            self.table.copy_within(drop..self.len, 0);
            self.len = LIMEXP - 1;
        }
        self.table[self.len] = value;
        self.len += 1;
        self.calls += 1;

        let n = self.len;
        let ep = &mut self.table;

        let mut abserr = OVERFLOW;
        let mut result = ep[n - 1];

        if n < 3 {
            return (result, abserr.max(5.0 * MACHINE_EPSILON * result.abs()));
        }

        ep[n + 1] = ep[n - 1];
        let newelm = (n - 1) / 2;
        ep[n - 1] = OVERFLOW;
        let num = n;
        let mut k1 = n - 1;
        let mut new_len = n;

        for i in 1..=newelm {
            let res = ep[k1 + 2];
            let e0 = ep[k1 - 2];
            let e1 = ep[k1 - 1];
            let e2 = res;
            let e1abs = e1.abs();
            let delta2 = e2 - e1;
            let err2 = delta2.abs();
            let tol2 = e2.abs().max(e1abs) * MACHINE_EPSILON;
            let delta3 = e1 - e0;
            let err3 = delta3.abs();
            let tol3 = e1abs.max(e0.abs()) * MACHINE_EPSILON;

            if err2 <= tol2 && err3 <= tol3 {
                // e0, e1 and e2 agree to machine accuracy; convergence is assumed.
                result = res;
                abserr = err2 + err3;
                return (result, abserr.max(5.0 * MACHINE_EPSILON * result.abs()));
            }

            let e3 = ep[k1];
            ep[k1] = e1;
            let delta1 = e1 - e3;
            let err1 = delta1.abs();
            let tol1 = e1abs.max(e3.abs()) * MACHINE_EPSILON;

            if err1 <= tol1 || err2 <= tol2 || err3 <= tol3 {
                new_len = i + i - 1;
                break;
            }

            let ss = 1.0 / delta1 + 1.0 / delta2 - 1.0 / delta3;
            let epsinf = (ss * e1).abs();
            if epsinf <= 1.0e-4 {
                new_len = i + i - 1;
                break;
            }

            let res = e1 + 1.0 / ss;
            ep[k1] = res;
            k1 -= 2;
            let error = err2 + (res - e2).abs() + err3;
            if error <= abserr {
                abserr = error;
                result = res;
            }
        }

        if new_len == LIMEXP {
            new_len = 2 * (LIMEXP / 2) - 1;
        }

        let mut ib = if num % 2 == 0 { 1 } else { 0 };
        for _ in 0..=newelm {
            ep[ib] = ep[ib + 2];
            ib += 2;
        }
        if num != new_len {
            let mut indx = num - new_len;
            for i in 0..new_len {
                ep[i] = ep[indx];
                indx += 1;
            }
        }
        self.len = new_len;

        if self.calls < 4 {
            self.last_results[self.calls - 1] = result;
            abserr = OVERFLOW;
        } else {
            abserr = (result - self.last_results[2]).abs()
                + (result - self.last_results[1]).abs()
                + (result - self.last_results[0]).abs();
            self.last_results[0] = self.last_results[1];
            self.last_results[1] = self.last_results[2];
            self.last_results[2] = result;
        }

        (result, abserr.max(5.0 * MACHINE_EPSILON * result.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn accelerates_alternating_series() {
        // Partial sums of 1 - 1/2 + 1/3 - ... converge slowly to ln 2.
        let mut partial = 1.0;
        let mut table = EpsilonTable::new(partial);
        let mut best = (partial, OVERFLOW);
        for k in 2..=12 {
            let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
            partial += sign / k as f64;
            best = table.extrapolate(partial);
        }
        assert_abs_diff_eq!(best.0, std::f64::consts::LN_2, epsilon = 1e-8);
        assert!(best.1 < 1e-6);
        assert!((partial - std::f64::consts::LN_2).abs() > 1e-2);
    }

    #[test]
    fn error_estimate_is_withheld_for_first_calls() {
        let mut table = EpsilonTable::new(1.0);
        table.set(1, 0.5);
        let (_, err) = table.extrapolate(0.75);
        assert_eq!(err, OVERFLOW);
    }

    #[test]
    fn table_length_stays_bounded() {
        let mut table = EpsilonTable::new(0.0);
        for k in 1..200 {
            table.extrapolate((k as f64).sqrt().sin());
            assert!(table.len() <= LIMEXP);
        }
    }
}
