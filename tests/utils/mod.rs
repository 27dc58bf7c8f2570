use chrono::NaiveDate;
use kin_rules::{Family, Individual, Outcome, RecordSet, Report, RuleId, Sex, Validator, ValidatorConfig};

/// Processing date used by every test run
#[must_use]
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Initialise test logging once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Default configuration pinned to [`as_of`]
#[must_use]
pub fn test_config() -> ValidatorConfig {
    ValidatorConfig::new(as_of())
}

/// Create a test individual with a `/Test/` surname
#[must_use]
pub fn person(id: &str, sex: Sex) -> Individual {
    Individual::new(id, format!("{id} /Test/"), sex)
}

/// Create a married couple family
#[must_use]
pub fn couple(id: &str, husband: &str, wife: &str) -> Family {
    Family::new(id).with_husband(husband).with_wife(wife)
}

/// Validate a record set with the full catalog and the test configuration
pub fn validate(records: &RecordSet) -> anyhow::Result<Report> {
    init_logging();
    let validator = Validator::new(test_config())?;
    Ok(validator.run(records)?)
}

/// Outcome of one rule for one subject
pub fn outcome(report: &Report, rule: RuleId, subject: &str) -> anyhow::Result<Outcome> {
    report
        .find(rule, subject)
        .map(|result| result.outcome)
        .ok_or_else(|| anyhow::anyhow!("no {rule} result for {subject}"))
}
