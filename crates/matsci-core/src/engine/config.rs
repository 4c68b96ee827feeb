use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ITERATIONS: usize = 20;
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        parameter,
        reason: reason.into(),
    }
}

/// Timing of the mock calculation: how many rows it produces and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub iterations: usize,
    pub tick_period: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }
}

#[derive(Default)]
pub struct WorkflowConfigBuilder {
    iterations: Option<usize>,
    tick_period: Option<Duration>,
}

impl WorkflowConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.tick_period = Some(period);
        self
    }

    pub fn build(self) -> Result<WorkflowConfig, ConfigError> {
        let iterations = self
            .iterations
            .ok_or(ConfigError::MissingParameter("iterations"))?;
        let tick_period = self
            .tick_period
            .ok_or(ConfigError::MissingParameter("tick_period"))?;
        if iterations == 0 {
            return Err(invalid("iterations", "must be at least 1"));
        }
        if tick_period.is_zero() {
            return Err(invalid("tick_period", "must be longer than zero"));
        }
        Ok(WorkflowConfig {
            iterations,
            tick_period,
        })
    }
}

/// Parameters shown in the computation summary panel. They label the mock run
/// and are never fed to a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Kelvin.
    pub temperature: f64,
    /// Atmospheres.
    pub pressure: f64,
    pub time_steps: u32,
    /// Rydberg.
    pub cutoff_energy: f64,
    pub k_points: [u32; 3],
    pub convergence_tolerance: f64,
    pub max_iterations: u32,
    pub exchange_correlation: String,
    pub pseudopotentials: String,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            temperature: 300.0,
            pressure: 1.0,
            time_steps: 1000,
            cutoff_energy: 40.0,
            k_points: [4, 4, 4],
            convergence_tolerance: 1e-8,
            max_iterations: 100,
            exchange_correlation: "PBE".to_string(),
            pseudopotentials: "Si.pz-vbc.UPF".to_string(),
        }
    }
}

#[derive(Default)]
pub struct SimulationParamsBuilder {
    temperature: Option<f64>,
    pressure: Option<f64>,
    time_steps: Option<u32>,
    cutoff_energy: Option<f64>,
    k_points: Option<[u32; 3]>,
    convergence_tolerance: Option<f64>,
    max_iterations: Option<u32>,
    exchange_correlation: Option<String>,
    pseudopotentials: Option<String>,
}

impl SimulationParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from [`SimulationParams::default`] so only overrides need setting.
    pub fn from_defaults() -> Self {
        let d = SimulationParams::default();
        Self {
            temperature: Some(d.temperature),
            pressure: Some(d.pressure),
            time_steps: Some(d.time_steps),
            cutoff_energy: Some(d.cutoff_energy),
            k_points: Some(d.k_points),
            convergence_tolerance: Some(d.convergence_tolerance),
            max_iterations: Some(d.max_iterations),
            exchange_correlation: Some(d.exchange_correlation),
            pseudopotentials: Some(d.pseudopotentials),
        }
    }

    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn pressure(mut self, atm: f64) -> Self {
        self.pressure = Some(atm);
        self
    }
    pub fn time_steps(mut self, steps: u32) -> Self {
        self.time_steps = Some(steps);
        self
    }
    pub fn cutoff_energy(mut self, ry: f64) -> Self {
        self.cutoff_energy = Some(ry);
        self
    }
    pub fn k_points(mut self, grid: [u32; 3]) -> Self {
        self.k_points = Some(grid);
        self
    }
    pub fn convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = Some(tolerance);
        self
    }
    pub fn max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }
    pub fn exchange_correlation(mut self, functional: impl Into<String>) -> Self {
        self.exchange_correlation = Some(functional.into());
        self
    }
    pub fn pseudopotentials(mut self, files: impl Into<String>) -> Self {
        self.pseudopotentials = Some(files.into());
        self
    }

    pub fn build(self) -> Result<SimulationParams, ConfigError> {
        let params = SimulationParams {
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            pressure: self
                .pressure
                .ok_or(ConfigError::MissingParameter("pressure"))?,
            time_steps: self
                .time_steps
                .ok_or(ConfigError::MissingParameter("time_steps"))?,
            cutoff_energy: self
                .cutoff_energy
                .ok_or(ConfigError::MissingParameter("cutoff_energy"))?,
            k_points: self
                .k_points
                .ok_or(ConfigError::MissingParameter("k_points"))?,
            convergence_tolerance: self
                .convergence_tolerance
                .ok_or(ConfigError::MissingParameter("convergence_tolerance"))?,
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
            exchange_correlation: self
                .exchange_correlation
                .ok_or(ConfigError::MissingParameter("exchange_correlation"))?,
            pseudopotentials: self
                .pseudopotentials
                .ok_or(ConfigError::MissingParameter("pseudopotentials"))?,
        };

        if !(params.temperature > 0.0) {
            return Err(invalid("temperature", "must be above 0 K"));
        }
        if !(params.pressure >= 0.0) {
            return Err(invalid("pressure", "must not be negative"));
        }
        if params.time_steps == 0 {
            return Err(invalid("time_steps", "must be at least 1"));
        }
        if !(params.cutoff_energy > 0.0) {
            return Err(invalid("cutoff_energy", "must be positive"));
        }
        if params.k_points.contains(&0) {
            return Err(invalid("k_points", "every grid dimension must be at least 1"));
        }
        if !(params.convergence_tolerance > 0.0) {
            return Err(invalid("convergence_tolerance", "must be positive"));
        }
        if params.max_iterations == 0 {
            return Err(invalid("max_iterations", "must be at least 1"));
        }
        if params.exchange_correlation.trim().is_empty() {
            return Err(invalid("exchange_correlation", "must not be blank"));
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_builder_requires_both_fields() {
        assert_eq!(
            WorkflowConfigBuilder::new().iterations(5).build(),
            Err(ConfigError::MissingParameter("tick_period"))
        );
        assert_eq!(
            WorkflowConfigBuilder::new()
                .tick_period(Duration::from_millis(10))
                .build(),
            Err(ConfigError::MissingParameter("iterations"))
        );
    }

    #[test]
    fn workflow_builder_rejects_zero_iterations() {
        let err = WorkflowConfigBuilder::new()
            .iterations(0)
            .tick_period(DEFAULT_TICK_PERIOD)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { parameter: "iterations", .. }));
    }

    #[test]
    fn workflow_default_is_twenty_one_second_ticks() {
        let config = WorkflowConfig::default();
        assert_eq!(config.iterations, 20);
        assert_eq!(config.tick_period, Duration::from_secs(1));
    }

    #[test]
    fn simulation_defaults_round_trip_through_builder() {
        let built = SimulationParamsBuilder::from_defaults().build().unwrap();
        assert_eq!(built, SimulationParams::default());
        assert_eq!(built.k_points, [4, 4, 4]);
        assert_eq!(built.exchange_correlation, "PBE");
    }

    #[test]
    fn empty_simulation_builder_reports_first_missing_parameter() {
        assert_eq!(
            SimulationParamsBuilder::new().build(),
            Err(ConfigError::MissingParameter("temperature"))
        );
    }

    #[test]
    fn simulation_builder_validates_ranges() {
        let err = SimulationParamsBuilder::from_defaults()
            .k_points([4, 0, 4])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { parameter: "k_points", .. }));

        let err = SimulationParamsBuilder::from_defaults()
            .temperature(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { parameter: "temperature", .. }));
    }
}
