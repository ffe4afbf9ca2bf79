use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ParamError;

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[default]
    Double,
    Int,
    Bool,
    Enum,
}

/// Mapping between the native range and `[0, 1]`.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamShape {
    #[default]
    Linear,
    /// `normalized = linear ^ (1 / exponent)`
    Power(f64),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ParamKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    #[serde(default)]
    pub step: f64,
    #[serde(default)]
    pub shape: ParamShape,
    #[serde(default)]
    pub display_texts: Vec<String>,
}

impl Param {
    pub fn double(name: &str, min: f64, max: f64, default: f64) -> Self {
        Param {
            name: name.to_owned(),
            label: String::new(),
            kind: ParamKind::Double,
            min,
            max,
            default,
            step: 0.0,
            shape: ParamShape::Linear,
            display_texts: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape: ParamShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn to_normalized(&self, value: f64) -> f64 {
        let linear = (value.clamp(self.min, self.max) - self.min) / (self.max - self.min);
        match self.shape {
            ParamShape::Linear => linear,
            ParamShape::Power(exponent) => linear.powf(1.0 / exponent),
        }
    }

    pub fn from_normalized(&self, normalized: f64) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        let curved = match self.shape {
            ParamShape::Linear => normalized,
            ParamShape::Power(exponent) => normalized.powf(exponent),
        };
        self.snap(self.min + curved * (self.max - self.min))
    }

    fn snap(&self, value: f64) -> f64 {
        let value = match self.kind {
            ParamKind::Double if self.step > 0.0 => {
                self.min + ((value - self.min) / self.step).round() * self.step
            }
            ParamKind::Double => value,
            ParamKind::Int | ParamKind::Bool | ParamKind::Enum => value.round(),
        };
        value.clamp(self.min, self.max)
    }

    /// Description of the parameter sent to the UI once content has loaded.
    pub fn to_json(&self, index: usize) -> Value {
        let mut desc = json!({
            "id": index,
            "name": self.name,
            "type": self.kind,
            "min": self.min,
            "max": self.max,
            "default": self.default,
            "step": self.step,
            "label": self.label,
        });
        if !self.display_texts.is_empty() {
            desc["displayTexts"] = json!(self.display_texts);
        }
        if let ParamShape::Power(exponent) = self.shape {
            desc["shape"] = json!("powercurve");
            desc["shapeValue"] = json!(exponent);
        }
        desc
    }

    fn validate(&self) -> Result<(), ParamError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.max > self.min) {
            return Err(ParamError::InvalidRange {
                name: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        if !(self.min..=self.max).contains(&self.default) {
            return Err(ParamError::DefaultOutOfRange {
                name: self.name.clone(),
                default: self.default,
            });
        }
        if let ParamShape::Power(exponent) = self.shape {
            if !(exponent.is_finite() && exponent > 0.0) {
                return Err(ParamError::InvalidShape {
                    name: self.name.clone(),
                    exponent,
                });
            }
        }
        Ok(())
    }
}

/// Read access to the plugin's parameters.
pub trait ParameterStore {
    fn param_count(&self) -> usize;
    fn param(&self, index: usize) -> Option<&Param>;
}

#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    pub fn new(params: Vec<Param>) -> Result<Self, ParamError> {
        for p in &params {
            p.validate()?;
        }
        Ok(ParamList { params })
    }

    pub fn from_json(json_str: &str) -> Result<Self, ParamError> {
        let params = serde_json::from_str::<Vec<Param>>(json_str)?;
        let list = ParamList::new(params)?;
        info!("...Loaded {} parameters OK", list.param_count());
        Ok(list)
    }

    pub fn from_file(path: &Path) -> Result<Self, ParamError> {
        debug!("Loading parameters from {}", path.display());
        let json_str = std::fs::read_to_string(path)?;
        ParamList::from_json(&json_str)
    }

    pub fn builtin() -> Result<Self, ParamError> {
        ParamList::from_json(include_str!("../params/default.json"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }
}

impl ParameterStore for ParamList {
    fn param_count(&self) -> usize {
        self.params.len()
    }

    fn param(&self, index: usize) -> Option<&Param> {
        self.params.get(index)
    }
}
