//! Car price estimate from make and performance figures

use vecform_core::{categorical, FieldSpec, ReconcilePolicy, Schema};

use crate::deployment::Deployment;
use crate::outcome::Severity;
use crate::result_format::ResultFormat;

categorical! {
    pub enum Make {
        Toyota => ("Toyota", 0),
        Honda => ("Honda", 1),
        Bmw => ("BMW", 2),
        Audi => ("Audi", 3),
        Ford => ("Ford", 4),
    }
}

categorical! {
    pub enum Transmission {
        Manual => ("Manual", 0),
        Automatic => ("Automatic", 1),
    }
}

categorical! {
    pub enum FuelType {
        Petrol => ("Petrol", 0),
        Diesel => ("Diesel", 1),
        Electric => ("Electric", 2),
        Hybrid => ("Hybrid", 3),
    }
}

pub struct CarPrice {
    schema: Schema,
}

impl CarPrice {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(vec![
                FieldSpec::categorical::<Make>("make", "Car Make"),
                FieldSpec::numeric("year", "Manufacturing Year")
                    .range(1990.0, 2025.0)
                    .default_value(2020.0)
                    .integer(),
                FieldSpec::numeric("engine_size", "Engine Size (L)")
                    .range(0.8, 8.0)
                    .default_value(2.0),
                FieldSpec::numeric("horsepower", "Horsepower")
                    .range(50.0, 1500.0)
                    .default_value(150.0)
                    .integer(),
                FieldSpec::numeric("torque", "Torque (lb-ft)")
                    .range(50.0, 1500.0)
                    .default_value(200.0)
                    .integer(),
                FieldSpec::numeric("zero_to_sixty", "0-60 MPH Time (seconds)")
                    .range(2.0, 20.0)
                    .default_value(8.0),
                FieldSpec::categorical::<Transmission>("transmission", "Transmission"),
                FieldSpec::categorical::<FuelType>("fuel_type", "Fuel Type"),
            ]),
        }
    }
}

impl Default for CarPrice {
    fn default() -> Self {
        Self::new()
    }
}

impl Deployment for CarPrice {
    fn id(&self) -> &'static str {
        "car-price"
    }

    fn title(&self) -> &'static str {
        "Car Price Prediction System"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy::PadOnly
    }

    fn result_format(&self) -> ResultFormat {
        ResultFormat::Amount {
            prefix: "Estimated Car Price: $".into(),
            suffix: " USD".into(),
            severity: Severity::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vecform_core::{FieldValue, InputError};

    #[test]
    fn encodes_make_and_fuel() {
        let c = CarPrice::new();
        let values: Vec<FieldValue> = vec![
            "BMW".into(),
            FieldValue::Number(2018.0),
            FieldValue::Number(3.0),
            FieldValue::Number(382.0),
            FieldValue::Number(365.0),
            FieldValue::Number(4.2),
            "Automatic".into(),
            "Hybrid".into(),
        ];
        let row = c.assemble(&values, None).unwrap();
        assert_eq!(
            row.as_slice(),
            &[2.0, 2018.0, 3.0, 382.0, 365.0, 4.2, 1.0, 3.0]
        );
    }

    #[test]
    fn year_and_power_are_whole_numbers() {
        let c = CarPrice::new();
        for (name, text) in [("year", "2020.5"), ("horsepower", "150.25"), ("torque", "199.9")] {
            let raw = BTreeMap::from([(name.to_string(), text.to_string())]);
            let err = c.schema().resolve(&raw).unwrap_err();
            assert!(matches!(err, InputError::NotAnInteger { ref field, .. } if field == name));
        }
        // engine size keeps its decimals
        let raw = BTreeMap::from([("engine_size".to_string(), "2.5".to_string())]);
        let values = c.schema().resolve(&raw).unwrap();
        assert_eq!(values[2], FieldValue::Number(2.5));
    }
}
