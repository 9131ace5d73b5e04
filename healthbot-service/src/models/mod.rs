pub mod intake;
pub mod report;

pub use intake::{ClinicalInput, PatientInfo, PatientIntake};
pub use report::{
    AnalysisPayload, DayMeals, ErrorReport, HealthReport, Interpretation, RenderedReport,
    RiskLevel,
};
