/// Transposed direct-form FIR filter used by both zero-phase passes
///
/// Holds the tap coefficients and a transposed direct-form state vector of
/// `taps.len() - 1` partial sums. The state can be preset, which is how the
/// zero-phase filter starts each pass in steady state.
pub struct FirFilterCore {
    taps: Vec<f64>,
    state: Vec<f64>,
}

impl FirFilterCore {
    /// Create a new FIR filter core with the given tap coefficients
    pub fn new(taps: Vec<f64>) -> Self {
        Self {
            state: vec![0.0; taps.len().saturating_sub(1)],
            taps,
        }
    }

    /// Process a single sample through the filter
    pub fn process(&mut self, sample: f64) -> f64 {
        let Some(&b0) = self.taps.first() else {
            return 0.0;
        };
        let output = b0 * sample + self.state.first().copied().unwrap_or(0.0);

        let n = self.state.len();
        if n > 0 {
            for k in 0..n - 1 {
                self.state[k] = self.taps[k + 1] * sample + self.state[k + 1];
            }
            self.state[n - 1] = self.taps[n] * sample;
        }
        output
    }

    /// Process an entire buffer of samples in-place
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Load the steady-state response to a constant input of `level`
    ///
    /// After this call, feeding `level` repeatedly produces `level * sum(taps)`
    /// from the first sample on, with no start-up transient.
    pub fn prime(&mut self, level: f64) {
        for (state, zi) in self.state.iter_mut().zip(steady_state(&self.taps)) {
            *state = zi * level;
        }
    }
}

/// Unit-step steady-state of the transposed direct form: `zi[k] = sum(taps[k+1..])`
pub fn steady_state(taps: &[f64]) -> Vec<f64> {
    let mut zi = vec![0.0; taps.len().saturating_sub(1)];
    let mut acc = 0.0;
    for k in (0..zi.len()).rev() {
        acc += taps[k + 1];
        zi[k] = acc;
    }
    zi
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_impulse_reproduces_taps() {
        let taps = vec![0.1, 0.2, 0.4, 0.2, 0.1];
        let mut core = FirFilterCore::new(taps.clone());
        let mut buffer = vec![0.0; 8];
        buffer[0] = 1.0;
        core.process_buffer(&mut buffer);

        for (i, &tap) in taps.iter().enumerate() {
            assert_relative_eq!(buffer[i], tap, epsilon = 1e-15);
        }
        assert!(buffer[5..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_matches_direct_convolution() {
        let taps = vec![0.5, -0.25, 0.125];
        let input = [1.0, 2.0, -1.0, 0.5, 3.0];
        let mut core = FirFilterCore::new(taps.clone());

        for (n, &x) in input.iter().enumerate() {
            let expected: f64 = (0..taps.len())
                .filter(|&j| j <= n)
                .map(|j| taps[j] * input[n - j])
                .sum();
            assert_relative_eq!(core.process(x), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_steady_state_vector() {
        let zi = steady_state(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(zi, vec![9.0, 7.0, 4.0]);
        assert!(steady_state(&[1.0]).is_empty());
        assert!(steady_state(&[]).is_empty());
    }

    #[test]
    fn test_prime_removes_startup_transient() {
        let taps = vec![0.25, 0.5, 0.25];
        let mut core = FirFilterCore::new(taps.clone());
        core.prime(3.0);
        for _ in 0..5 {
            assert_relative_eq!(core.process(3.0), 3.0, epsilon = 1e-12);
        }

        let mut cold = FirFilterCore::new(taps);
        assert_relative_eq!(cold.process(3.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_single_tap_is_gain() {
        let mut core = FirFilterCore::new(vec![2.0]);
        assert_eq!(core.process(1.5), 3.0);
        core.prime(4.0);
        assert_eq!(core.process(4.0), 8.0);
    }
}
