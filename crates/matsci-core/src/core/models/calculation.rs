use serde::Serialize;

/// One row of the mock SCF series. `step` is one-based.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub step: usize,
    pub total_energy: f64,
    pub kinetic_energy: f64,
    pub convergence: f64,
    pub forces: [f64; 3],
}

impl CalculationResult {
    pub fn max_force(&self) -> f64 {
        self.forces.iter().fold(0.0_f64, |acc, f| acc.max(f.abs()))
    }
}

/// One row of the mock structural-relaxation series. `step` is one-based.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationStep {
    pub step: usize,
    pub energy: f64,
    pub max_force: f64,
    pub avg_force: f64,
}

/// Flat record used when exporting both series side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub step: usize,
    pub total_energy: f64,
    pub kinetic_energy: f64,
    pub convergence: f64,
    pub force_x: f64,
    pub force_y: f64,
    pub force_z: f64,
    pub relax_energy: f64,
    pub relax_max_force: f64,
    pub relax_avg_force: f64,
}

impl ExportRow {
    pub fn new(result: &CalculationResult, relaxation: &RelaxationStep) -> Self {
        let [force_x, force_y, force_z] = result.forces;
        Self {
            step: result.step,
            total_energy: result.total_energy,
            kinetic_energy: result.kinetic_energy,
            convergence: result.convergence,
            force_x,
            force_y,
            force_z,
            relax_energy: relaxation.energy,
            relax_max_force: relaxation.max_force,
            relax_avg_force: relaxation.avg_force,
        }
    }
}
