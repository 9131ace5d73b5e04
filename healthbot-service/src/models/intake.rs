//! Patient intake submitted through the web form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// One form submission. Lives for a single request and is never stored.
///
/// Every field defaults to empty so that a missing form field and a field
/// submitted blank are indistinguishable. JSON clients may send `null`,
/// numbers or booleans; those are read as text.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientIntake {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub age: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_string")]
    pub contact: String,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub symptoms: String,
    #[serde(deserialize_with = "lenient_string")]
    pub medical_history: String,
    #[serde(deserialize_with = "lenient_string")]
    pub temperature: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pulse: String,
    #[serde(deserialize_with = "lenient_string")]
    pub bp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
}

/// Who the report is about, as shown on the report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub contact: String,
    pub language: String,
}

/// What the patient reported, echoed back next to the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInput {
    pub symptoms: String,
    pub medical_history: String,
    pub temperature: String,
    pub pulse: String,
    pub bp: String,
    pub weight: String,
}

impl PatientIntake {
    pub fn patient(&self) -> PatientInfo {
        PatientInfo {
            name: self.name.clone(),
            age: self.age.clone(),
            gender: self.gender.clone(),
            contact: self.contact.clone(),
            language: self.language.clone(),
        }
    }

    pub fn clinical_input(&self) -> ClinicalInput {
        ClinicalInput {
            symptoms: self.symptoms.clone(),
            medical_history: self.medical_history.clone(),
            temperature: self.temperature.clone(),
            pulse: self.pulse.clone(),
            bp: self.bp.clone(),
            weight: self.weight.clone(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}
