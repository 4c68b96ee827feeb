//! Environmental conditions and the property response they drive.
//!
//! The response model is a display toy, not physics: every derived value scales with
//! `r = T / 298` only. Pressure and humidity are carried and shown but do not enter
//! any formula.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::models::material::{Material, PropertyKind};

pub const ROOM_TEMPERATURE: f64 = 298.0;
pub const TEMPERATURE_RANGE: (f64, f64) = (77.0, 2000.0);
pub const PRESSURE_RANGE: (f64, f64) = (0.1, 1000.0);
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Relative change (in percent) beyond which a derived value is flagged as moved.
pub const CHANGE_THRESHOLD: f64 = 1.0;

pub const LIQUID_WARNING: &str = "Material is in liquid state at current temperature";
pub const GAS_WARNING: &str = "Material is in gaseous state at current temperature";

/// Temperature in K, pressure in kPa, relative humidity in %.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentParams {
    temperature: f64,
    pressure: f64,
    humidity: f64,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Preset::Room.params()
    }
}

fn clamp(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

impl EnvironmentParams {
    /// Builds clamped parameters; out-of-range values are pulled to the nearest bound.
    pub fn new(temperature: f64, pressure: f64, humidity: f64) -> Self {
        Self {
            temperature: clamp(temperature, TEMPERATURE_RANGE),
            pressure: clamp(pressure, PRESSURE_RANGE),
            humidity: clamp(humidity, HUMIDITY_RANGE),
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn temperature_ratio(&self) -> f64 {
        self.temperature / ROOM_TEMPERATURE
    }

    pub fn apply(self, event: EnvironmentEvent) -> Self {
        match event {
            EnvironmentEvent::SetTemperature(t) => Self::new(t, self.pressure, self.humidity),
            EnvironmentEvent::SetPressure(p) => Self::new(self.temperature, p, self.humidity),
            EnvironmentEvent::SetHumidity(h) => Self::new(self.temperature, self.pressure, h),
            EnvironmentEvent::ApplyPreset(preset) => preset.params(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvironmentEvent {
    SetTemperature(f64),
    SetPressure(f64),
    SetHumidity(f64),
    ApplyPreset(Preset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Room,
    LiquidNitrogen,
    HighTemperature,
    Vacuum,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Room,
        Preset::LiquidNitrogen,
        Preset::HighTemperature,
        Preset::Vacuum,
    ];

    pub fn params(&self) -> EnvironmentParams {
        match self {
            Preset::Room => EnvironmentParams::new(298.0, 101.0, 50.0),
            Preset::LiquidNitrogen => EnvironmentParams::new(77.0, 101.0, 0.0),
            Preset::HighTemperature => EnvironmentParams::new(1273.0, 101.0, 0.0),
            Preset::Vacuum => EnvironmentParams::new(298.0, 0.1, 0.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Room => "Room Temperature (298K)",
            Preset::LiquidNitrogen => "Liquid Nitrogen (77K)",
            Preset::HighTemperature => "High Temperature (1273K)",
            Preset::Vacuum => "Vacuum Conditions",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Room => "room",
            Preset::LiquidNitrogen => "liquid-nitrogen",
            Preset::HighTemperature => "high-temperature",
            Preset::Vacuum => "vacuum",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown preset '{0}' (expected room, liquid-nitrogen, high-temperature or vacuum)")]
pub struct ParsePresetError(String);

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "room" | "roomtemperature" => Ok(Preset::Room),
            "liquidnitrogen" | "ln2" => Ok(Preset::LiquidNitrogen),
            "hightemperature" | "high" => Ok(Preset::HighTemperature),
            "vacuum" => Ok(Preset::Vacuum),
            _ => Err(ParsePresetError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Increase,
    Decrease,
    Unchanged,
}

impl Change {
    /// Classifies `current` against `base`; more than 1% either way counts as a move.
    pub fn between(current: f64, base: f64) -> Self {
        let percent = (current - base) / base * 100.0;
        if percent > CHANGE_THRESHOLD {
            Change::Increase
        } else if percent < -CHANGE_THRESHOLD {
            Change::Decrease
        } else {
            Change::Unchanged
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    pub base: f64,
    pub current: f64,
}

impl Derived {
    pub fn change(&self) -> Change {
        Change::between(self.current, self.base)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateWarning {
    Liquid,
    Gas,
}

impl StateWarning {
    pub fn message(&self) -> &'static str {
        match self {
            StateWarning::Liquid => LIQUID_WARNING,
            StateWarning::Gas => GAS_WARNING,
        }
    }
}

/// Properties of a material re-evaluated under the current conditions.
///
/// A field is `None` when the material has no base value for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedProperties {
    pub density: Option<Derived>,
    pub thermal_conductivity: Option<Derived>,
    pub tensile_strength: Option<Derived>,
    pub state_warning: Option<StateWarning>,
}

pub fn simulate(material: &Material, env: &EnvironmentParams) -> SimulatedProperties {
    let r = env.temperature_ratio();
    let derive = |base: Option<f64>, f: &dyn Fn(f64) -> f64| {
        base.map(|base| Derived {
            base,
            current: f(base),
        })
    };

    let t = env.temperature();
    let mut state_warning = None;
    if material.property(PropertyKind::MeltingPoint).is_some_and(|m| t >= m) {
        state_warning = Some(StateWarning::Liquid);
    }
    if material.property(PropertyKind::BoilingPoint).is_some_and(|b| t >= b) {
        state_warning = Some(StateWarning::Gas);
    }

    SimulatedProperties {
        density: derive(material.property(PropertyKind::Density), &|d| {
            d * (1.0 - 0.01 * (r - 1.0))
        }),
        thermal_conductivity: derive(material.property(PropertyKind::ThermalConductivity), &|k| {
            k * r * 0.9
        }),
        tensile_strength: derive(material.property(PropertyKind::TensileStrength), &|s| {
            s * (1.0 - 0.05 * (r - 1.0).max(0.0))
        }),
        state_warning,
    }
}

/// Screen state of the simulation controls: conditions plus whether the live
/// simulation overlay is on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationState {
    pub params: EnvironmentParams,
    pub active: bool,
}

impl SimulationState {
    pub fn apply(mut self, event: EnvironmentEvent) -> Self {
        self.params = self.params.apply(event);
        self
    }

    pub fn toggle(mut self) -> Self {
        self.active = !self.active;
        self
    }

    pub fn simulate(&self, material: &Material) -> Option<SimulatedProperties> {
        self.active.then(|| simulate(material, &self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::materials::find_material;

    #[test]
    fn sliders_clamp_to_their_ranges() {
        let env = EnvironmentParams::new(10.0, 5000.0, -3.0);
        assert_eq!(env.temperature(), 77.0);
        assert_eq!(env.pressure(), 1000.0);
        assert_eq!(env.humidity(), 0.0);
        let env = env.apply(EnvironmentEvent::SetTemperature(9999.0));
        assert_eq!(env.temperature(), 2000.0);
        assert_eq!(env.pressure(), 1000.0);
    }

    #[test]
    fn default_is_room_conditions() {
        let env = EnvironmentParams::default();
        assert_eq!(
            (env.temperature(), env.pressure(), env.humidity()),
            (298.0, 101.0, 50.0)
        );
    }

    #[test]
    fn presets_replace_all_three_values() {
        let env = EnvironmentParams::default().apply(EnvironmentEvent::ApplyPreset(Preset::Vacuum));
        assert_eq!(
            (env.temperature(), env.pressure(), env.humidity()),
            (298.0, 0.1, 0.0)
        );
        assert_eq!("Liquid Nitrogen".parse(), Ok(Preset::LiquidNitrogen));
        assert_eq!("high-temperature".parse(), Ok(Preset::HighTemperature));
        assert!("mars".parse::<Preset>().is_err());
    }

    #[test]
    fn room_temperature_leaves_density_and_strength_unchanged() {
        let aluminum = find_material("4").unwrap();
        let sim = simulate(aluminum, &EnvironmentParams::default());
        let density = sim.density.unwrap();
        assert!((density.current - 2.7).abs() < 1e-12);
        assert_eq!(density.change(), Change::Unchanged);
        assert_eq!(sim.tensile_strength.unwrap().change(), Change::Unchanged);
        // r = 1 still applies the 0.9 factor
        assert_eq!(sim.thermal_conductivity.unwrap().change(), Change::Decrease);
        assert_eq!(sim.state_warning, None);
    }

    #[test]
    fn heating_lowers_strength_and_raises_conductivity() {
        let steel = find_material("5").unwrap();
        let env = Preset::HighTemperature.params();
        let sim = simulate(steel, &env);
        let r = 1273.0 / 298.0;
        let strength = sim.tensile_strength.unwrap();
        assert!((strength.current - strength.base * (1.0 - 0.05 * (r - 1.0))).abs() < 1e-9);
        assert_eq!(strength.change(), Change::Decrease);
        assert_eq!(sim.thermal_conductivity.unwrap().change(), Change::Increase);
    }

    #[test]
    fn cooling_does_not_raise_strength() {
        let ti = find_material("2").unwrap();
        let sim = simulate(ti, &Preset::LiquidNitrogen.params());
        let strength = sim.tensile_strength.unwrap();
        assert_eq!(strength.current, strength.base);
        assert_eq!(sim.density.unwrap().change(), Change::Unchanged);
    }

    #[test]
    fn melting_and_boiling_warnings() {
        let aluminum = find_material("4").unwrap();
        let sim = simulate(aluminum, &EnvironmentParams::new(1000.0, 101.0, 0.0));
        assert_eq!(sim.state_warning, Some(StateWarning::Liquid));
        assert_eq!(sim.state_warning.unwrap().message(), LIQUID_WARNING);

        let mut hot = aluminum.clone();
        hot.properties.as_mut().unwrap().boiling_point = Some(1500.0);
        let sim = simulate(&hot, &EnvironmentParams::new(1600.0, 101.0, 0.0));
        assert_eq!(sim.state_warning, Some(StateWarning::Gas));
    }

    #[test]
    fn missing_base_values_stay_missing() {
        let mut bare = find_material("1").unwrap().clone();
        bare.properties = None;
        let sim = simulate(&bare, &Preset::HighTemperature.params());
        assert_eq!(sim.density, None);
        assert_eq!(sim.state_warning, None);
    }

    #[test]
    fn change_indicator_uses_one_percent_band() {
        assert_eq!(Change::between(101.5, 100.0), Change::Increase);
        assert_eq!(Change::between(98.5, 100.0), Change::Decrease);
        assert_eq!(Change::between(100.9, 100.0), Change::Unchanged);
    }

    #[test]
    fn inactive_simulation_shows_nothing() {
        let aluminum = find_material("4").unwrap();
        let state = SimulationState::default();
        assert!(state.simulate(aluminum).is_none());
        let state = state
            .toggle()
            .apply(EnvironmentEvent::SetTemperature(500.0));
        assert!(state.simulate(aluminum).is_some());
    }
}
