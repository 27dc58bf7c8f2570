#[cfg(test)]
mod tests {
    use crate::utils::{outcome, validate};
    use kin_rules::{Individual, Outcome, RecordSet, RuleId, Sex};

    #[test]
    fn test_duplicate_name_and_birth_fails_both() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![
                Individual::new("I1", "John /Smith/", Sex::Male).with_birth("1 JAN 1980"),
                Individual::new("I2", "John /Smith/", Sex::Male).with_birth("1 JAN 1980"),
                Individual::new("I3", "Jane /Smith/", Sex::Female).with_birth("1 JAN 1980"),
            ],
            vec![],
        );
        let report = validate(&records)?;
        assert_eq!(outcome(&report, RuleId::UniqueNameAndBirthDate, "I1")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::UniqueNameAndBirthDate, "I2")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::UniqueNameAndBirthDate, "I3")?, Outcome::Passed);
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_reported_once() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![
                Individual::new("I1", "John /Smith/", Sex::Male),
                Individual::new("I1", "John /Smythe/", Sex::Male),
            ],
            vec![],
        );
        let report = validate(&records)?;
        let results = report.for_rule(RuleId::UniqueIds);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_failure());
        assert!(results[0].concerns("I1"));
        Ok(())
    }
}
