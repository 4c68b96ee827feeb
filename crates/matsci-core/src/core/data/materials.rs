use super::LookupError;
use crate::core::models::material::{Composition, Material, MaterialCategory, MaterialProperties};
use once_cell::sync::Lazy;

static MATERIALS: Lazy<Vec<Material>> = Lazy::new(seed_materials);

/// The immutable seed catalogue, in display order.
pub fn materials() -> &'static [Material] {
    &MATERIALS
}

pub fn find_material(id: &str) -> Result<&'static Material, LookupError> {
    let id = id.trim();
    MATERIALS
        .iter()
        .find(|m| m.id == id || m.name.eq_ignore_ascii_case(id))
        .ok_or_else(|| LookupError::MaterialNotFound(id.to_string()))
}

fn applications(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

fn seed_materials() -> Vec<Material> {
    vec![
        Material {
            id: "1".into(),
            name: "Silicon".into(),
            category: MaterialCategory::Semiconductor,
            description: "Pure silicon crystal used in semiconductor applications".into(),
            color: "#4A5568".into(),
            properties: Some(MaterialProperties {
                density: Some(2.33),
                melting_point: Some(1687.0),
                boiling_point: Some(3538.0),
                thermal_conductivity: Some(149.0),
                thermal_expansion: Some(2.6),
                tensile_strength: Some(7000.0),
                youngs_modulus: Some(130.0),
            }),
            composition: Some(Composition::new().with("Si", 100.0)),
            applications: applications(&[
                "Computer processors",
                "Solar cells",
                "Electronic devices",
                "Integrated circuits",
            ]),
        },
        Material {
            id: "2".into(),
            name: "Titanium Alloy (Ti-6Al-4V)".into(),
            category: MaterialCategory::Metal,
            description:
                "Titanium alloy with aluminum and vanadium, known for high strength-to-weight ratio"
                    .into(),
            color: "#718096".into(),
            properties: Some(MaterialProperties {
                density: Some(4.43),
                melting_point: Some(1933.0),
                boiling_point: Some(3560.0),
                thermal_conductivity: Some(6.7),
                thermal_expansion: Some(8.6),
                tensile_strength: Some(1000.0),
                youngs_modulus: Some(114.0),
            }),
            composition: Some(
                Composition::new()
                    .with("Ti", 90.0)
                    .with("Al", 6.0)
                    .with("V", 4.0),
            ),
            applications: applications(&[
                "Aerospace components",
                "Medical implants",
                "Marine equipment",
                "High-performance automotive parts",
            ]),
        },
        Material {
            id: "3".into(),
            name: "Carbon Fiber".into(),
            category: MaterialCategory::Composite,
            description: "High-strength carbon fiber composite material".into(),
            color: "#2D3748".into(),
            properties: Some(MaterialProperties {
                density: Some(1.6),
                melting_point: Some(3800.0),
                thermal_conductivity: Some(7.0),
                tensile_strength: Some(3500.0),
                youngs_modulus: Some(230.0),
                ..Default::default()
            }),
            composition: Some(Composition::new().with("C", 95.0).with("Other", 5.0)),
            applications: applications(&[
                "Aircraft structures",
                "Automotive body panels",
                "Sports equipment",
                "Wind turbine blades",
            ]),
        },
        Material {
            id: "4".into(),
            name: "Aluminum 6061".into(),
            category: MaterialCategory::Metal,
            description:
                "Aluminum alloy with magnesium and silicon, widely used structural material".into(),
            color: "#A0AEC0".into(),
            properties: Some(MaterialProperties {
                density: Some(2.7),
                melting_point: Some(925.0),
                boiling_point: Some(2792.0),
                thermal_conductivity: Some(167.0),
                thermal_expansion: Some(23.1),
                tensile_strength: Some(310.0),
                youngs_modulus: Some(69.0),
            }),
            composition: Some(
                Composition::new()
                    .with("Al", 97.9)
                    .with("Mg", 1.0)
                    .with("Si", 0.6)
                    .with("Other", 0.5),
            ),
            applications: applications(&[
                "Structural components",
                "Automotive parts",
                "Marine fittings",
                "Bicycle frames",
            ]),
        },
        Material {
            id: "5".into(),
            name: "Stainless Steel 316L".into(),
            category: MaterialCategory::Metal,
            description:
                "Low-carbon austenitic stainless steel with excellent corrosion resistance".into(),
            color: "#E2E8F0".into(),
            properties: Some(MaterialProperties {
                density: Some(8.0),
                melting_point: Some(1700.0),
                boiling_point: Some(3000.0),
                thermal_conductivity: Some(16.3),
                thermal_expansion: Some(16.0),
                tensile_strength: Some(580.0),
                youngs_modulus: Some(200.0),
            }),
            composition: Some(
                Composition::new()
                    .with("Fe", 65.0)
                    .with("Cr", 18.0)
                    .with("Ni", 12.0)
                    .with("Mo", 3.0)
                    .with("Other", 2.0),
            ),
            applications: applications(&[
                "Medical devices",
                "Chemical processing equipment",
                "Marine applications",
                "Food processing equipment",
            ]),
        },
    ]
}
