//! Prompt construction for the health report request.
//!
//! The system instruction is fixed for the lifetime of the process; only the
//! user message varies with the intake.

use crate::models::PatientIntake;

/// Instruction sent with every request. Describes the report schema, tone,
/// drug safety rule, language selection and the JSON-only output format.
pub const SYSTEM_INSTRUCTION: &str = r#"You are HealthBot, an AI medical assistant. Generate a JSON response with this exact structure:

{
  "summary": "Brief 2-3 sentence health overview.",
  "possibleCauses": ["cause 1", "cause 2", "cause 3"],
  "riskLevel": "Low" | "Moderate" | "High",
  "precautions": ["precaution 1", "precaution 2"],
  "safeMedications": ["generic name 1", "generic name 2"],
  "dietPlan": {
    "day1": { "breakfast": "...", "lunch": "...", "dinner": "..." },
    "day2": { "breakfast": "...", "lunch": "...", "dinner": "..." },
    ...
    "day7": { "breakfast": "...", "lunch": "...", "dinner": "..." }
  },
  "nextSteps": ["Consult GP", "Monitor symptoms", "Hydrate well"]
}

"safeMedications" lists only common, safe, non-prescription medicines by generic name.
Respond in the requested language (English, Hindi, Marathi).
Use simple, empathetic tone. NEVER prescribe strong or prescription drugs.
Return ONLY valid JSON. No extra text."#;

const UNKNOWN: &str = "?";
const NO_HISTORY: &str = "None";
const DEFAULT_LANGUAGE: &str = "English";

/// The two halves of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_message: String,
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_instruction: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Summarise the intake for the model.
    ///
    /// Blank optional fields are replaced with placeholders so the model never
    /// sees a dangling `Temp=,`. Contact details stay out of the prompt.
    pub fn user_message(&self, intake: &PatientIntake) -> String {
        format!(
            "Patient: {name}, {age}, {gender}\n\
             Symptoms: {symptoms}\n\
             History: {history}\n\
             Vitals: Temp={temp}, Pulse={pulse}, BP={bp}, Weight={weight}\n\
             Language: {language}\n",
            name = intake.name,
            age = or_placeholder(&intake.age, UNKNOWN),
            gender = or_placeholder(&intake.gender, UNKNOWN),
            symptoms = intake.symptoms,
            history = or_placeholder(&intake.medical_history, NO_HISTORY),
            temp = or_placeholder(&intake.temperature, UNKNOWN),
            pulse = or_placeholder(&intake.pulse, UNKNOWN),
            bp = or_placeholder(&intake.bp, UNKNOWN),
            weight = or_placeholder(&intake.weight, UNKNOWN),
            language = or_placeholder(&intake.language, DEFAULT_LANGUAGE),
        )
    }

    pub fn build(&self, intake: &PatientIntake) -> Prompt {
        Prompt {
            system_instruction: self.system_instruction.clone(),
            user_message: self.user_message(intake),
        }
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha() -> PatientIntake {
        PatientIntake {
            name: "Asha".to_string(),
            symptoms: "fever, cough".to_string(),
            age: "30".to_string(),
            gender: "F".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn user_message_contains_provided_fields_verbatim() {
        let message = PromptBuilder::new().user_message(&asha());

        assert!(message.contains("Patient: Asha, 30, F"));
        assert!(message.contains("Symptoms: fever, cough"));
    }

    #[test]
    fn user_message_uses_placeholders_for_missing_fields() {
        let message = PromptBuilder::new().user_message(&asha());

        assert!(message.contains("History: None"));
        assert!(message.contains("Vitals: Temp=?, Pulse=?, BP=?, Weight=?"));
        assert!(message.contains("Language: English"));
        assert!(!message.contains("Temp=,"));
    }

    #[test]
    fn blank_optional_fields_count_as_missing() {
        let intake = PatientIntake {
            temperature: "   ".to_string(),
            ..asha()
        };

        let message = PromptBuilder::new().user_message(&intake);
        assert!(message.contains("Temp=?"));
    }

    #[test]
    fn vitals_and_language_pass_through() {
        let intake = PatientIntake {
            medical_history: "asthma".to_string(),
            temperature: "101F".to_string(),
            pulse: "96".to_string(),
            bp: "130/85".to_string(),
            weight: "62kg".to_string(),
            language: "Marathi".to_string(),
            ..asha()
        };

        let message = PromptBuilder::new().user_message(&intake);
        assert!(message.contains("History: asthma"));
        assert!(message.contains("Vitals: Temp=101F, Pulse=96, BP=130/85, Weight=62kg"));
        assert!(message.contains("Language: Marathi"));
    }

    #[test]
    fn language_is_not_checked_against_supported_set() {
        let intake = PatientIntake {
            language: "Klingon".to_string(),
            ..asha()
        };

        let message = PromptBuilder::new().user_message(&intake);
        assert!(message.contains("Language: Klingon"));
    }

    #[test]
    fn contact_is_not_sent_to_the_model() {
        let intake = PatientIntake {
            contact: "asha@example.com".to_string(),
            ..asha()
        };

        let prompt = PromptBuilder::new().build(&intake);
        assert!(!prompt.user_message.contains("asha@example.com"));
    }

    #[test]
    fn system_instruction_is_the_same_for_every_intake() {
        let builder = PromptBuilder::new();
        let other = PatientIntake {
            name: "Ravi".to_string(),
            symptoms: "headache".to_string(),
            language: "Hindi".to_string(),
            ..Default::default()
        };

        let first = builder.build(&asha());
        let second = builder.build(&other);
        assert_eq!(first.system_instruction, second.system_instruction);
        assert_eq!(first.system_instruction, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn system_instruction_describes_schema_and_constraints() {
        let instruction = PromptBuilder::new().system_instruction().to_string();

        for field in [
            "summary",
            "possibleCauses",
            "riskLevel",
            "precautions",
            "safeMedications",
            "dietPlan",
            "nextSteps",
            "day1",
            "day7",
            "breakfast",
        ] {
            assert!(instruction.contains(field), "missing {field}");
        }
        assert!(instruction.contains(r#""Low" | "Moderate" | "High""#));
        assert!(instruction.contains("empathetic"));
        assert!(instruction.contains("NEVER prescribe"));
        assert!(instruction.contains("Return ONLY valid JSON"));
    }
}
