use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::Keyed;

/// A rental vehicle. Serialized in camelCase (`plateId`, `dailyRate`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub plate_id: String,
    pub brand: String,
    pub daily_rate: f64,
}

impl Car {
    pub fn new(plate_id: impl Into<String>, brand: impl Into<String>, daily_rate: f64) -> Self {
        Self { plate_id: plate_id.into(), brand: brand.into(), daily_rate }
    }
}

impl Keyed for Car {
    fn key(&self) -> &str { &self.plate_id }

    fn validate(&self) -> Result<(), ModelError> {
        if self.plate_id.trim().is_empty() { return Err(ModelError::Validation("plate id required".into())); }
        if !self.daily_rate.is_finite() { return Err(ModelError::Validation("daily rate must be a finite number".into())); }
        Ok(())
    }
}

pub fn seed() -> Vec<Car> {
    vec![
        Car::new("AA-123-BB", "Renault", 45.0),
        Car::new("CC-456-DD", "Peugeot", 50.0),
        Car::new("EE-789-FF", "Citroën", 42.0),
        Car::new("GG-012-HH", "BMW", 85.0),
        Car::new("II-345-JJ", "Mercedes", 95.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_order_and_first_vehicle() {
        let cars = seed();
        assert_eq!(cars.len(), 5);
        assert_eq!(cars[0], Car::new("AA-123-BB", "Renault", 45.0));
        assert_eq!(cars[4].key(), "II-345-JJ");
    }

    #[test]
    fn camel_case_on_the_wire() {
        let json = serde_json::to_value(Car::new("AA-123-BB", "Renault", 45.0)).unwrap();
        assert_eq!(json, serde_json::json!({"plateId": "AA-123-BB", "brand": "Renault", "dailyRate": 45.0}));
    }

    #[test]
    fn rejects_missing_plate_and_nan_rate() {
        assert!(Car::new("", "BMW", 1.0).validate().is_err());
        assert!(Car::new("X", "BMW", f64::NAN).validate().is_err());
    }
}
