use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tally_fields::{confidence_product, DateField, TextField};

use super::{field, field_list, warn_if_not_object};
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::model::Checklist;
use crate::mrz::{surname_from_line1, MrzCheck};

pub const MRZ_VALID: &str = "mrz_valid";
pub const MRZ_VALID_SURNAME: &str = "mrz_valid_surname";

#[derive(Debug, Clone, Serialize)]
pub struct Passport {
    pub country: TextField,
    pub id_number: TextField,
    pub personal_number: TextField,
    pub birth_date: DateField,
    pub expiry_date: DateField,
    pub issuance_date: DateField,
    pub birth_place: TextField,
    pub gender: TextField,
    pub surname: TextField,
    pub given_names: Vec<TextField>,
    pub mrz1: TextField,
    pub mrz2: TextField,
    /// First given name and surname.
    pub full_name: TextField,
    /// Both MRZ lines, concatenated.
    pub mrz: TextField,
    pub checklist: Checklist,
}

impl Passport {
    pub fn from_prediction(prediction: &Value) -> Self {
        Self::from_prediction_with(prediction, &ReconConfig::default())
    }

    pub fn from_prediction_with(prediction: &Value, config: &ReconConfig) -> Self {
        warn_if_not_object("passport", prediction);
        let mut passport = Self {
            country: field(prediction, "country"),
            id_number: field(prediction, "id_number"),
            personal_number: field(prediction, "personal_number"),
            birth_date: field(prediction, "birth_date"),
            expiry_date: field(prediction, "expiry_date"),
            issuance_date: field(prediction, "issuance_date"),
            birth_place: field(prediction, "birth_place"),
            gender: field(prediction, "gender"),
            surname: field(prediction, "surname"),
            given_names: field_list(prediction, "given_names"),
            mrz1: field(prediction, "mrz1"),
            mrz2: field(prediction, "mrz2"),
            full_name: field(prediction, "full_name"),
            mrz: field(prediction, "mrz"),
            checklist: Checklist::default(),
        };
        passport.checklist = passport.run_checks(config);
        passport.reconstruct();
        passport
    }

    pub fn from_json_str(input: &str) -> Result<Self, ReconError> {
        let prediction: Value = serde_json::from_str(input)?;
        Ok(Self::from_prediction(&prediction))
    }

    /// `None` when the expiry date could not be read.
    pub fn is_expired(&self, today: NaiveDate) -> Option<bool> {
        self.expiry_date.value.map(|expiry| expiry < today)
    }

    // -----------------------------------------------------------------------
    // Checks
    // -----------------------------------------------------------------------

    fn run_checks(&mut self, config: &ReconConfig) -> Checklist {
        let mut checklist = Checklist::default();
        let enabled = config.mrz.enabled;

        for check in MrzCheck::ALL {
            let passed = enabled
                && self
                    .mrz2
                    .value
                    .as_deref()
                    .is_some_and(|line2| check.validate(line2));
            log::debug!("{check}: {}", if passed { "pass" } else { "fail" });
            if passed {
                self.corroborate(check);
            }
            checklist.record(check.name(), passed);
        }

        let surname_ok = enabled && self.surname_matches_mrz();
        if surname_ok {
            self.surname.corroborate();
        }
        checklist.record(MRZ_VALID_SURNAME, surname_ok);

        let all_ok = checklist.all_passed();
        checklist.record(MRZ_VALID, all_ok);
        checklist
    }

    fn corroborate(&mut self, check: MrzCheck) {
        match check {
            MrzCheck::IdNumber => self.id_number.corroborate(),
            MrzCheck::BirthDate => self.birth_date.corroborate(),
            MrzCheck::ExpiryDate => self.expiry_date.corroborate(),
            MrzCheck::PersonalNumber => self.personal_number.corroborate(),
            MrzCheck::Composite => {
                self.surname.corroborate();
                for name in &mut self.given_names {
                    name.corroborate();
                }
            }
        }
    }

    fn surname_matches_mrz(&self) -> bool {
        let Some(encoded) = self.mrz1.value.as_deref().and_then(surname_from_line1) else {
            return false;
        };
        TextField::new(Some(encoded), 0.0) == self.surname
    }

    // -----------------------------------------------------------------------
    // Reconstruction
    // -----------------------------------------------------------------------

    fn reconstruct(&mut self) {
        if self.full_name.is_empty() {
            if let Some(first) = self.given_names.first() {
                if let (Some(given), Some(surname)) = (&first.value, &self.surname.value) {
                    self.full_name = TextField::reconstructed(
                        format!("{given} {surname}"),
                        confidence_product([first, &self.surname]),
                    );
                }
            }
        }

        if self.mrz.is_empty() {
            if let (Some(line1), Some(line2)) = (&self.mrz1.value, &self.mrz2.value) {
                self.mrz = TextField::reconstructed(
                    format!("{line1}{line2}"),
                    confidence_product([&self.mrz1, &self.mrz2]),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LINE1: &str = "P<GBRPUDARSAN<<HENERT<<<<<<<<<<<<<<<<<<<<<<<";
    const LINE2: &str = "7077979792GBR9505209M1704224<<<<<<<<<<<<<<00";

    fn prediction(line2: &str) -> Value {
        json!({
            "country": {"value": "GBR", "confidence": 0.9},
            "id_number": {"value": "707797979", "confidence": 0.6},
            "birth_date": {"value": "1995-05-20", "confidence": 0.7},
            "expiry_date": {"value": "2017-04-22", "confidence": 0.8},
            "surname": {"value": "Pudarsan", "confidence": 0.5},
            "given_names": [{"value": "Henert", "confidence": 0.5}],
            "mrz1": {"value": LINE1, "confidence": 0.9},
            "mrz2": {"value": line2, "confidence": 0.8},
        })
    }

    #[test]
    fn valid_zone_corroborates_everything() {
        let passport = Passport::from_prediction(&prediction(LINE2));
        assert_eq!(passport.checklist.get(MRZ_VALID), Some(true));
        assert_eq!(passport.id_number.confidence, 1.0);
        assert_eq!(passport.birth_date.confidence, 1.0);
        assert_eq!(passport.expiry_date.confidence, 1.0);
        assert_eq!(passport.surname.confidence, 1.0);
        assert_eq!(passport.given_names[0].confidence, 1.0);
        // Not extracted, so nothing to corroborate.
        assert!(passport.personal_number.is_empty());
        assert_eq!(passport.personal_number.confidence, 0.0);
        assert_eq!(passport.checklist.get("mrz_valid_personal_number"), Some(true));
    }

    #[test]
    fn corrupted_id_number_fails_its_checks() {
        let corrupted = LINE2.replacen("70779", "70778", 1);
        let passport = Passport::from_prediction(&prediction(&corrupted));
        assert_eq!(passport.checklist.get("mrz_valid_id_number"), Some(false));
        assert_eq!(passport.checklist.get("mrz_valid_composite"), Some(false));
        assert_eq!(passport.checklist.get("mrz_valid_birth_date"), Some(true));
        assert_eq!(passport.checklist.get(MRZ_VALID), Some(false));
        assert_eq!(passport.id_number.confidence, 0.6);
        assert_eq!(passport.birth_date.confidence, 1.0);
    }

    #[test]
    fn reconstructs_full_name_and_mrz() {
        let passport = Passport::from_prediction(&prediction(LINE2));
        assert_eq!(passport.full_name.value.as_deref(), Some("Henert Pudarsan"));
        assert!(passport.full_name.reconstructed);
        // Built after the checks raised both names.
        assert_eq!(passport.full_name.confidence, 1.0);

        assert_eq!(passport.mrz.value.as_deref(), Some(format!("{LINE1}{LINE2}").as_str()));
        assert!((passport.mrz.confidence - 0.72).abs() < 1e-9);
    }

    #[test]
    fn disabled_mrz_checks_all_fail() {
        let config = ReconConfig::from_toml("[mrz]\nenabled = false\n").unwrap();
        let passport = Passport::from_prediction_with(&prediction(LINE2), &config);
        assert!(passport.checklist.iter().all(|(_, passed)| !passed));
        assert_eq!(passport.id_number.confidence, 0.6);
    }

    #[test]
    fn surname_mismatch() {
        let mut raw = prediction(LINE2);
        raw["surname"] = json!({"value": "Smith", "confidence": 0.5});
        let passport = Passport::from_prediction(&raw);
        assert_eq!(passport.checklist.get(MRZ_VALID_SURNAME), Some(false));
        assert_eq!(passport.checklist.get(MRZ_VALID), Some(false));
    }

    #[test]
    fn missing_mrz_lines() {
        let passport = Passport::from_prediction(&json!({}));
        assert_eq!(passport.checklist.len(), MrzCheck::ALL.len() + 2);
        assert!(!passport.checklist.all_passed());
        assert!(passport.mrz.is_empty());
        assert!(passport.full_name.is_empty());
        assert_eq!(passport.is_expired(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), None);
    }

    #[test]
    fn expiry() {
        let passport = Passport::from_prediction(&prediction(LINE2));
        assert_eq!(passport.is_expired(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), Some(true));
        assert_eq!(passport.is_expired(NaiveDate::from_ymd_opt(2017, 4, 22).unwrap()), Some(false));
    }
}
