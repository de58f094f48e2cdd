//! Reference ODE systems.
//!
//! The systems used throughout the labs and tests: a linear forced decay
//! with a closed-form solution, the undamped oscillator, the Lorenz
//! equations, and the Daisyworld family (two species with albedo feedback,
//! a single grey species, and two species at constant growth rates).

use serde::{Deserialize, Serialize};

use crate::system::Derivative;

/// Stefan-Boltzmann constant [W/m²/K⁴]
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Linear forced equation: dy/dt = c1 * y + c2 * t + c3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearForced {
    /// Coefficient on y
    pub c1: f64,
    /// Coefficient on t
    pub c2: f64,
    /// Constant forcing
    pub c3: f64,
}

impl LinearForced {
    /// dy/dt = -y + t + 1, whose solution through y(0) = 1 is t + e^(-t)
    pub fn relaxation() -> Self {
        Self {
            c1: -1.0,
            c2: 1.0,
            c3: 1.0,
        }
    }

    /// Closed-form solution of [`LinearForced::relaxation`] with y(0) = 1
    pub fn relaxation_exact(t: f64) -> f64 {
        t + (-t).exp()
    }
}

impl Derivative<1> for LinearForced {
    fn derivs(&self, y: &[f64; 1], t: f64) -> [f64; 1] {
        [self.c1 * y[0] + self.c2 * t + self.c3]
    }
}

/// Undamped oscillator m y'' = -gamma y, state [y, y']
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonicOscillator {
    /// Spring constant
    pub gamma: f64,
    /// Mass
    pub m: f64,
}

impl Default for HarmonicOscillator {
    fn default() -> Self {
        Self { gamma: 1.0, m: 1.0 }
    }
}

impl Derivative<2> for HarmonicOscillator {
    fn derivs(&self, y: &[f64; 2], _t: f64) -> [f64; 2] {
        [y[1], -self.gamma / self.m * y[0]]
    }
}

/// Lorenz (1963) convection model, state [x, y, z]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lorenz {
    /// Prandtl number
    pub sigma: f64,
    /// Rayleigh number ratio
    pub r: f64,
    /// Aspect-ratio parameter
    pub b: f64,
}

impl Default for Lorenz {
    /// The chaotic regime: sigma = 10, r = 28, b = 8/3
    fn default() -> Self {
        Self {
            sigma: 10.0,
            r: 28.0,
            b: 8.0 / 3.0,
        }
    }
}

impl Derivative<3> for Lorenz {
    fn derivs(&self, y: &[f64; 3], _t: f64) -> [f64; 3] {
        [
            self.sigma * (y[1] - y[0]),
            self.r * y[0] - y[1] - y[0] * y[2],
            y[0] * y[1] - self.b * y[2],
        ]
    }
}

/// Daisyworld with albedo feedback.
///
/// State is `[white, black]`: the fractional area covered by each daisy
/// species. Bare ground covers the rest. The planetary albedo is the
/// area-weighted mix of the three surfaces, and each species grows at a rate
/// set by its local temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Daisyworld {
    /// Albedo of white daisies
    pub albedo_white: f64,
    /// Albedo of black daisies
    pub albedo_black: f64,
    /// Albedo of bare ground
    pub albedo_ground: f64,
    /// Death rate
    pub chi: f64,
    /// Solar constant [W/m²]
    pub s0: f64,
    /// Luminosity relative to the present sun
    pub l: f64,
    /// Heat-conduction parameter: 0 for perfect conduction, 1 for none
    pub r: f64,
}

impl Default for Daisyworld {
    fn default() -> Self {
        Self {
            albedo_white: 0.75,
            albedo_black: 0.25,
            albedo_ground: 0.5,
            chi: 0.3,
            s0: 3668.0,
            l: 1.0,
            r: 0.2,
        }
    }
}

impl Daisyworld {
    /// Growth-rate window in kelvin: beta is zero outside it
    const GROWTH_RANGE: (f64, f64) = (277.5, 312.5);
    /// Optimum growth temperature [K]
    const T_OPTIMUM: f64 = 295.0;

    /// Temperatures over white daisies, black daisies, and the planet's
    /// effective emission temperature, in kelvin.
    pub fn temperatures(&self, y: &[f64; 2]) -> (f64, f64, f64) {
        let bare = 1.0 - y[0] - y[1];
        let albedo_p =
            bare * self.albedo_ground + y[0] * self.albedo_white + y[1] * self.albedo_black;
        let te_4 = self.s0 / 4.0 * self.l * (1.0 - albedo_p) / STEFAN_BOLTZMANN;
        let eta = self.r * self.l * self.s0 / (4.0 * STEFAN_BOLTZMANN);
        let temp_w = (eta * (albedo_p - self.albedo_white) + te_4).powf(0.25);
        let temp_b = (eta * (albedo_p - self.albedo_black) + te_4).powf(0.25);
        (temp_w, temp_b, te_4.powf(0.25))
    }

    /// Parabolic growth rate, zero outside [`Self::GROWTH_RANGE`]
    pub fn growth_rate(temp: f64) -> f64 {
        let (lo, hi) = Self::GROWTH_RANGE;
        if (lo..=hi).contains(&temp) {
            1.0 - 0.003265 * (Self::T_OPTIMUM - temp).powi(2)
        } else {
            0.0
        }
    }
}

impl Derivative<2> for Daisyworld {
    fn derivs(&self, y: &[f64; 2], _t: f64) -> [f64; 2] {
        let (temp_w, temp_b, _) = self.temperatures(y);
        let beta_w = Self::growth_rate(temp_w);
        let beta_b = Self::growth_rate(temp_b);
        let bare = 1.0 - y[0] - y[1];
        [
            y[0] * (beta_w * bare - self.chi),
            y[1] * (beta_b * bare - self.chi),
        ]
    }
}

/// Single grey-daisy Daisyworld, state `[grey]`.
///
/// The coupling between coverage and the daisies' own temperature, without
/// the competition between two species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreyDaisy {
    /// Albedo of grey daisies
    pub albedo_grey: f64,
    /// Albedo of bare ground
    pub albedo_ground: f64,
    /// Death rate
    pub chi: f64,
    /// Solar constant [W/m²]
    pub s0: f64,
    /// Luminosity relative to the present sun
    pub l: f64,
    /// Heat-conduction parameter: 0 for perfect conduction, 1 for none
    pub r: f64,
}

impl Default for GreyDaisy {
    fn default() -> Self {
        Self {
            albedo_grey: 0.5,
            albedo_ground: 0.5,
            chi: 0.3,
            s0: 3668.0,
            l: 1.0,
            r: 0.2,
        }
    }
}

impl GreyDaisy {
    /// Temperature over the daisies and the emission temperature, in kelvin
    pub fn temperatures(&self, y: &[f64; 1]) -> (f64, f64) {
        let albedo_p = (1.0 - y[0]) * self.albedo_ground + y[0] * self.albedo_grey;
        let te_4 = self.s0 / 4.0 * self.l * (1.0 - albedo_p) / STEFAN_BOLTZMANN;
        let eta = self.r * self.l * self.s0 / (4.0 * STEFAN_BOLTZMANN);
        let temp_grey = (eta * (albedo_p - self.albedo_grey) + te_4).powf(0.25);
        (temp_grey, te_4.powf(0.25))
    }
}

impl Derivative<1> for GreyDaisy {
    fn derivs(&self, y: &[f64; 1], _t: f64) -> [f64; 1] {
        let (temp_grey, _) = self.temperatures(y);
        let beta = Daisyworld::growth_rate(temp_grey);
        [y[0] * (beta * (1.0 - y[0]) - self.chi)]
    }
}

/// Two daisy species growing at fixed rates, with no temperature feedback.
/// State is `[white, black]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantGrowthDaisies {
    /// Growth rate of white daisies
    pub beta_white: f64,
    /// Growth rate of black daisies
    pub beta_black: f64,
    /// Death rate
    pub chi: f64,
}

impl Default for ConstantGrowthDaisies {
    fn default() -> Self {
        Self {
            beta_white: 0.7,
            beta_black: 0.7,
            chi: 0.3,
        }
    }
}

impl Derivative<2> for ConstantGrowthDaisies {
    fn derivs(&self, y: &[f64; 2], _t: f64) -> [f64; 2] {
        let bare = 1.0 - y[0] - y[1];
        [
            y[0] * (self.beta_white * bare - self.chi),
            y[1] * (self.beta_black * bare - self.chi),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxation_exact_satisfies_ode() {
        let sys = LinearForced::relaxation();
        let t = 0.7;
        let y = LinearForced::relaxation_exact(t);
        let dt = 1e-6;
        let slope =
            (LinearForced::relaxation_exact(t + dt) - LinearForced::relaxation_exact(t - dt)) / (2.0 * dt);
        assert!((sys.derivs(&[y], t)[0] - slope).abs() < 1e-8);
    }

    #[test]
    fn test_oscillator_frequency() {
        let sys = HarmonicOscillator { gamma: 4.0, m: 1.0 };
        assert_eq!(sys.derivs(&[1.0, 3.0], 0.0), [3.0, -4.0]);
    }

    #[test]
    fn test_lorenz_fixed_point() {
        let sys = Lorenz::default();
        let c = (sys.b * (sys.r - 1.0)).sqrt();
        let d = sys.derivs(&[c, c, sys.r - 1.0], 0.0);
        for v in d {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn test_daisyworld_temperatures() {
        let sys = Daisyworld::default();
        let (tw, tb, te) = sys.temperatures(&[0.3, 0.3]);
        // White daisies are cooler than the planet, black ones warmer
        assert!(tw < te && te < tb);
        // Equal coverage leaves the albedo at 0.5: Te^4 = S0/4 * 0.5 / sigma
        let expected = (3668.0 / 4.0 * 0.5 / STEFAN_BOLTZMANN).powf(0.25);
        assert!((te - expected).abs() < 1e-9);
    }

    #[test]
    fn test_daisyworld_growth_window() {
        assert_eq!(Daisyworld::growth_rate(295.0), 1.0);
        assert_eq!(Daisyworld::growth_rate(270.0), 0.0);
        assert_eq!(Daisyworld::growth_rate(320.0), 0.0);
        assert!(Daisyworld::growth_rate(277.5) > 0.0);
    }

    #[test]
    fn test_daisyworld_partial_parameters() {
        let sys: Daisyworld = serde_json::from_str(r#"{"l": 1.2, "chi": 0.25}"#).unwrap();
        assert_eq!(sys.l, 1.2);
        assert_eq!(sys.chi, 0.25);
        assert_eq!(sys.s0, 3668.0);
    }

    #[test]
    fn test_grey_daisy_matches_bare_planet_when_albedos_agree() {
        // Grey and ground albedo equal: coverage cannot change the climate
        let sys = GreyDaisy::default();
        let (tg_low, te_low) = sys.temperatures(&[0.1]);
        let (tg_high, te_high) = sys.temperatures(&[0.9]);
        assert!((te_low - te_high).abs() < 1e-9);
        assert!((tg_low - te_low).abs() < 1e-9);
        assert!((tg_high - tg_low).abs() < 1e-9);
    }

    #[test]
    fn test_grey_daisy_steady_state() {
        // At y = 1 - chi / beta the growth balances the death rate
        let sys = GreyDaisy::default();
        let (temp, _) = sys.temperatures(&[0.5]);
        let beta = Daisyworld::growth_rate(temp);
        let y_eq = 1.0 - sys.chi / beta;
        assert!(sys.derivs(&[y_eq], 0.0)[0].abs() < 1e-12);
        assert!(sys.derivs(&[0.5 * y_eq], 0.0)[0] > 0.0);
    }

    #[test]
    fn test_constant_growth_equilibrium() {
        let sys = ConstantGrowthDaisies::default();
        // Total coverage settles where beta * bare = chi
        let y_eq = 1.0 - sys.chi / sys.beta_white;
        let d = sys.derivs(&[0.25 * y_eq, 0.75 * y_eq], 0.0);
        assert!(d[0].abs() < 1e-15 && d[1].abs() < 1e-15);
        assert!(sys.derivs(&[0.1, 0.1], 0.0)[0] > 0.0);
    }

    #[test]
    fn test_daisyworld_no_daisies_stays_barren() {
        let sys = Daisyworld::default();
        assert_eq!(sys.derivs(&[0.0, 0.0], 0.0), [0.0, 0.0]);
    }
}
