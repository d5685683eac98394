use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the positive charge of the target atom is distributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NucleusModel {
    /// Rutherford: point-like charge at the centre.
    #[default]
    Concentrated,
    /// Thomson "plum pudding": charge spread out, no deflecting force.
    Diffuse,
}

impl NucleusModel {
    pub const ALL: [NucleusModel; 2] = [NucleusModel::Concentrated, NucleusModel::Diffuse];

    pub fn label(self) -> &'static str {
        match self {
            NucleusModel::Concentrated => "Rutherford (concentrated)",
            NucleusModel::Diffuse => "Plum pudding (diffuse)",
        }
    }
}

impl fmt::Display for NucleusModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NucleusModel::Concentrated => f.write_str("concentrated"),
            NucleusModel::Diffuse => f.write_str("diffuse"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModelError(String);

impl fmt::Display for ParseModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown nucleus model `{}`", self.0)
    }
}

impl std::error::Error for ParseModelError {}

impl FromStr for NucleusModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concentrated" | "rutherford" => Ok(NucleusModel::Concentrated),
            "diffuse" | "thomson" | "plum-pudding" | "plum_pudding" => Ok(NucleusModel::Diffuse),
            other => Err(ParseModelError(other.to_owned())),
        }
    }
}

/// Scattering centre as seen by the force model for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nucleus {
    pub position: Vec2,
    /// Net charge in elementary charges (the proton count).
    pub charge: f32,
    pub model: NucleusModel,
}

impl Nucleus {
    pub fn new(position: Vec2, charge: f32, model: NucleusModel) -> Self {
        Self {
            position,
            charge,
            model,
        }
    }
}

/// Nucleon offsets (relative to the nucleus centre) used to draw a clustered nucleus.
#[derive(Clone, Debug, Default)]
pub struct NucleonLayout {
    pub protons: Vec<Vec2>,
    pub neutrons: Vec<Vec2>,
}

pub struct NucleonLayoutBuilder {
    proton_count: usize,
    neutron_count: usize,
    radius: f32,
}

impl NucleonLayoutBuilder {
    pub fn new(proton_count: usize, neutron_count: usize, radius: f32) -> Self {
        Self {
            proton_count,
            neutron_count,
            radius,
        }
    }

    /// Interleaves protons and neutrons on one golden-angle disc so both
    /// species fill the whole nucleus instead of forming rings.
    pub fn build(&self) -> NucleonLayout {
        let total = self.proton_count + self.neutron_count;
        let points = golden_disc(total, self.radius);

        let mut layout = NucleonLayout {
            protons: Vec::with_capacity(self.proton_count),
            neutrons: Vec::with_capacity(self.neutron_count),
        };

        // Bresenham-style split keeps the proton/neutron ratio even across radii.
        let mut proton_acc = 0usize;
        for point in points {
            proton_acc += self.proton_count;
            let proton_due = proton_acc >= total && layout.protons.len() < self.proton_count;
            if proton_due || layout.neutrons.len() >= self.neutron_count {
                proton_acc = proton_acc.saturating_sub(total);
                layout.protons.push(point);
            } else {
                layout.neutrons.push(point);
            }
        }

        layout
    }
}

fn golden_disc(count: usize, radius: f32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Vec2::ZERO];
    }

    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..count)
        .map(|i| {
            let r = radius * ((i as f32 + 0.5) / count as f32).sqrt();
            let theta = golden_angle * i as f32;
            Vec2::new(theta.cos(), theta.sin()) * r
        })
        .collect()
}
