//! Shipping weight classes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Value;

/// Delivery class derived from a product's weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    /// Under 2 kg.
    Light,
    /// 2 kg up to 40 kg.
    #[serde(rename = "Mid_Sized")]
    MidSized,
    /// 40 kg up to 140 kg.
    Heavy,
    /// 140 kg and over.
    #[serde(rename = "Truck_Required")]
    TruckRequired,
    /// Weight missing or not a number.
    Unknown,
}

impl WeightClass {
    /// Bucket a weight. Lower bounds are inclusive.
    pub fn from_kg(kg: Option<f64>) -> Self {
        match kg {
            Some(w) if w < 2.0 => WeightClass::Light,
            Some(w) if w < 40.0 => WeightClass::MidSized,
            Some(w) if w < 140.0 => WeightClass::Heavy,
            Some(w) if w >= 140.0 => WeightClass::TruckRequired,
            _ => WeightClass::Unknown,
        }
    }

    /// Label stored in the warehouse.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightClass::Light => "Light",
            WeightClass::MidSized => "Mid_Sized",
            WeightClass::Heavy => "Heavy",
            WeightClass::TruckRequired => "Truck_Required",
            WeightClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight class label for a `weight_kg` cell.
pub fn weight_class_of(weight_kg: &Value) -> Value {
    Value::text(WeightClass::from_kg(weight_kg.as_f64()).as_str())
}
