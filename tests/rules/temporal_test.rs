#[cfg(test)]
mod tests {
    use crate::utils::{couple, outcome, person, validate};
    use kin_rules::{Individual, Outcome, RecordSet, RuleId, Sex};

    /// A couple married on 2000-06-15 whose wife was born on `wife_birth`
    fn marriage_at(wife_birth: &str) -> RecordSet {
        RecordSet::new(
            vec![
                person("I1", Sex::Male).with_birth("1975-01-01"),
                person("I2", Sex::Female).with_birth(wife_birth),
            ],
            vec![couple("F1", "I1", "I2").with_marriage("15 JUN 2000")],
        )
    }

    /// A father who died 2000-01-01 and a child born on `child_birth`
    fn posthumous(child_birth: &str) -> RecordSet {
        RecordSet::new(
            vec![
                person("I1", Sex::Male).with_birth("1950-01-01").with_death("1 JAN 2000"),
                person("I2", Sex::Female).with_birth("1955-01-01"),
                person("I3", Sex::Male).with_birth(child_birth),
            ],
            vec![couple("F1", "I1", "I2").with_child("I3")],
        )
    }

    #[test]
    fn test_marriage_at_exactly_fourteen() -> anyhow::Result<()> {
        let report = validate(&marriage_at("15 JUN 1986"))?;
        assert_eq!(outcome(&report, RuleId::MarriageAfter14, "F1")?, Outcome::Passed);

        let report = validate(&marriage_at("16 JUN 1986"))?;
        assert_eq!(outcome(&report, RuleId::MarriageAfter14, "F1")?, Outcome::Failed);
        Ok(())
    }

    #[test]
    fn test_posthumous_birth_boundary() -> anyhow::Result<()> {
        // 270 days after 2000-01-01 is 2000-09-27
        let report = validate(&posthumous("27 SEP 2000"))?;
        assert_eq!(outcome(&report, RuleId::BirthBeforeParentsDeath, "F1")?, Outcome::Passed);

        let report = validate(&posthumous("28 SEP 2000"))?;
        assert_eq!(outcome(&report, RuleId::BirthBeforeParentsDeath, "F1")?, Outcome::Failed);
        Ok(())
    }

    #[test]
    fn test_divorce_before_marriage_fails() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![person("I1", Sex::Male), person("I2", Sex::Female)],
            vec![couple("F1", "I1", "I2").with_marriage("1990-01-01").with_divorce("1989-01-01")],
        );
        let report = validate(&records)?;
        assert_eq!(outcome(&report, RuleId::DivorceBeforeDeath, "F1")?, Outcome::Failed);
        Ok(())
    }

    #[test]
    fn test_missing_marriage_is_not_applicable() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![person("I1", Sex::Male), person("I2", Sex::Female)],
            vec![couple("F1", "I1", "I2")],
        );
        let report = validate(&records)?;
        for rule in [
            RuleId::MarriageBeforeDeath,
            RuleId::MarriageAfter14,
            RuleId::BirthBeforeMarriage,
            RuleId::DivorceBeforeDeath,
        ] {
            assert_eq!(outcome(&report, rule, "F1")?, Outcome::NotApplicable, "{rule}");
        }
        Ok(())
    }

    #[test]
    fn test_malformed_date_only_affects_its_record() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![
                Individual::new("I1", "Bad /Date/", Sex::Male).with_birth("the spring of 1900"),
                Individual::new("I2", "Good /Date/", Sex::Male)
                    .with_birth("1900-01-01")
                    .with_death("1800-01-01"),
            ],
            vec![],
        );
        let report = validate(&records)?;

        let result = report
            .find(RuleId::BirthBeforeDeath, "I1")
            .ok_or_else(|| anyhow::anyhow!("missing result"))?;
        assert_eq!(result.outcome, Outcome::Inconclusive);
        assert!(result.message.contains("I1.birth"));
        assert_eq!(outcome(&report, RuleId::BirthBeforeDeath, "I2")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::LessThan150YearsOld, "I1")?, Outcome::Inconclusive);
        Ok(())
    }
}
