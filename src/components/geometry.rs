//! Component geometry (inches, degrees)

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};

fn require_positive(what: &str, value: f64) -> LaminateResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LaminateError::InvalidInput(format!(
            "{what} must be positive, got {value}"
        )))
    }
}

/// Nose cone profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoseConeShape {
    Ogive,
    Conical,
    Elliptical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoseConeGeometry {
    pub shape: NoseConeShape,
    pub length: f64,
    pub base_diameter: f64,
}

impl NoseConeGeometry {
    pub fn new(shape: NoseConeShape, length: f64, base_diameter: f64) -> LaminateResult<Self> {
        let geometry = Self {
            shape,
            length,
            base_diameter,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> LaminateResult<()> {
        require_positive("nose cone length", self.length)?;
        require_positive("nose cone base diameter", self.base_diameter)
    }
}

/// Cylindrical airframe section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirframeGeometry {
    pub length: f64,
    pub diameter: f64,
}

impl AirframeGeometry {
    pub fn new(length: f64, diameter: f64) -> LaminateResult<Self> {
        let geometry = Self { length, diameter };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn validate(&self) -> LaminateResult<()> {
        require_positive("airframe length", self.length)?;
        require_positive("airframe diameter", self.diameter)
    }
}

/// Trapezoidal fin planform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinGeometry {
    pub root_chord: f64,
    pub tip_chord: f64,
    pub span: f64,
    /// Leading-edge sweep in degrees
    pub sweep: f64,
}

impl FinGeometry {
    pub fn new(root_chord: f64, tip_chord: f64, span: f64, sweep: f64) -> LaminateResult<Self> {
        let geometry = Self {
            root_chord,
            tip_chord,
            span,
            sweep,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Planform area
    pub fn area(&self) -> f64 {
        0.5 * (self.root_chord + self.tip_chord) * self.span
    }

    pub fn validate(&self) -> LaminateResult<()> {
        require_positive("fin root chord", self.root_chord)?;
        require_positive("fin tip chord", self.tip_chord)?;
        require_positive("fin span", self.span)?;
        if !self.sweep.is_finite() {
            return Err(LaminateError::InvalidInput(format!(
                "fin sweep must be finite, got {}",
                self.sweep
            )));
        }
        Ok(())
    }
}
