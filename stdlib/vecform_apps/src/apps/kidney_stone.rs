//! Kidney stone risk from lab results, lifestyle and CKD history

use vecform_core::{categorical, FieldSpec, Level, ReconcilePolicy, Schema, YesNo};

use crate::deployment::Deployment;
use crate::outcome::Severity;
use crate::result_format::{ClassLabel, LabelText, ResultFormat};

categorical! {
    pub enum Diet {
        Normal => ("Normal", 0),
        HighProtein => ("High Protein", 1),
        HighSalt => ("High Salt", 2),
    }
}

categorical! {
    pub enum WaterIntake {
        Low => ("Low", 0),
        Adequate => ("Adequate", 1),
        High => ("High", 2),
    }
}

pub struct KidneyStone {
    schema: Schema,
}

impl KidneyStone {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(vec![
                FieldSpec::numeric("serum_calcium", "Serum Calcium (mg/dL)")
                    .range(6.0, 12.0)
                    .default_value(9.0),
                FieldSpec::categorical::<YesNo>("ana", "ANA"),
                FieldSpec::categorical::<YesNo>("c3_c4", "C3 / C4 Abnormal"),
                FieldSpec::categorical::<YesNo>("hematuria", "Hematuria"),
                FieldSpec::numeric("oxalate_levels", "Oxalate Levels")
                    .range(0.0, 100.0)
                    .default_value(20.0),
                FieldSpec::numeric("urine_ph", "Urine pH")
                    .range(4.0, 9.0)
                    .default_value(6.0),
                FieldSpec::numeric("blood_pressure", "Blood Pressure")
                    .range(80.0, 200.0)
                    .default_value(120.0)
                    .integer(),
                FieldSpec::categorical::<Level>("physical_activity", "Physical Activity"),
                FieldSpec::categorical::<Diet>("diet", "Diet Type"),
                FieldSpec::categorical::<WaterIntake>("water_intake", "Water Intake"),
                FieldSpec::categorical::<YesNo>("smoking", "Smoking"),
                FieldSpec::categorical::<YesNo>("alcohol", "Alcohol"),
                FieldSpec::categorical::<YesNo>("painkiller_usage", "Painkiller Usage"),
                FieldSpec::categorical::<YesNo>("family_history", "Family History"),
                FieldSpec::categorical::<YesNo>("weight_changes", "Weight Changes"),
                FieldSpec::categorical::<Level>("stress_level", "Stress Level"),
                FieldSpec::numeric("months", "Duration (Months)")
                    .range(1.0, 120.0)
                    .default_value(6.0)
                    .integer(),
                FieldSpec::numeric("cluster", "Cluster")
                    .range(0.0, 10.0)
                    .integer(),
                FieldSpec::categorical::<YesNo>("ckd_prediction", "CKD Prediction"),
                FieldSpec::numeric("ckd_stage", "CKD Stage")
                    .range(0.0, 5.0)
                    .integer(),
            ]),
        }
    }
}

impl Default for KidneyStone {
    fn default() -> Self {
        Self::new()
    }
}

impl Deployment for KidneyStone {
    fn id(&self) -> &'static str {
        "kidney-stone"
    }

    fn title(&self) -> &'static str {
        "Kidney Stone Risk Prediction System"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy::PadOnly
    }

    fn result_format(&self) -> ResultFormat {
        ResultFormat::Discrete {
            classes: vec![ClassLabel {
                code: 1,
                message: "High Risk of Kidney Stones".into(),
                severity: Severity::Alert,
            }],
            otherwise: LabelText {
                message: "Low Risk of Kidney Stones".into(),
                severity: Severity::Success,
            },
        }
    }
}
