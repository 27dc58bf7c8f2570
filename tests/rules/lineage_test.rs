#[cfg(test)]
mod tests {
    use crate::utils::{couple, outcome, person, validate};
    use kin_rules::{Outcome, RecordSet, RuleId, Sex};

    /// I1 + I2 -> I3 (M), I4 (F); I3 + I5 -> I6 (M); I7 + I4 -> I8 (F)
    fn cousins(extra: &[(&str, &str, &str)]) -> RecordSet {
        let mut families = vec![
            couple("F1", "I1", "I2").with_child("I3").with_child("I4"),
            couple("F2", "I3", "I5").with_child("I6"),
            couple("F3", "I7", "I4").with_child("I8"),
        ];
        families.extend(extra.iter().map(|(id, husband, wife)| couple(id, husband, wife)));
        RecordSet::new(
            vec![
                person("I1", Sex::Male),
                person("I2", Sex::Female),
                person("I3", Sex::Male),
                person("I4", Sex::Female),
                person("I5", Sex::Female),
                person("I6", Sex::Male),
                person("I7", Sex::Male),
                person("I8", Sex::Female),
            ],
            families,
        )
    }

    #[test]
    fn test_sibling_marriage_fails() -> anyhow::Result<()> {
        let report = validate(&cousins(&[("F9", "I3", "I4")]))?;
        assert_eq!(outcome(&report, RuleId::NoSiblingMarriage, "F9")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::NoSiblingMarriage, "F2")?, Outcome::Passed);
        Ok(())
    }

    #[test]
    fn test_marriage_to_descendant_fails() -> anyhow::Result<()> {
        // Grandfather I1 and granddaughter I8
        let report = validate(&cousins(&[("F9", "I1", "I8")]))?;
        assert_eq!(outcome(&report, RuleId::NoMarriageToDescendant, "F9")?, Outcome::Failed);

        // Father I7 and daughter I8
        let report = validate(&cousins(&[("F9", "I7", "I8")]))?;
        assert_eq!(outcome(&report, RuleId::NoMarriageToDescendant, "F9")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::NoMarriageToDescendant, "F3")?, Outcome::Passed);
        Ok(())
    }

    #[test]
    fn test_cousin_and_aunt_uncle_marriages() -> anyhow::Result<()> {
        let report = validate(&cousins(&[("F8", "I6", "I8"), ("F9", "I6", "I4")]))?;
        assert_eq!(outcome(&report, RuleId::NoFirstCousinMarriage, "F8")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::NoAuntUncleMarriage, "F8")?, Outcome::Passed);
        assert_eq!(outcome(&report, RuleId::NoAuntUncleMarriage, "F9")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::NoFirstCousinMarriage, "F9")?, Outcome::Passed);
        Ok(())
    }

    #[test]
    fn test_bigamy_requires_an_ended_marriage() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![
                person("I1", Sex::Male),
                person("I2", Sex::Female),
                person("I3", Sex::Female),
                person("I4", Sex::Female).with_death("1995-01-01"),
            ],
            vec![
                couple("F1", "I1", "I2").with_marriage("1980-01-01"),
                couple("F2", "I1", "I3").with_marriage("1985-01-01"),
                couple("F3", "I3", "I4").with_marriage("1970-01-01"),
            ],
        );
        let report = validate(&records)?;
        assert_eq!(outcome(&report, RuleId::NoBigamy, "I1")?, Outcome::Failed);
        // I3 married F2 while I4 of F3 was still alive
        assert_eq!(outcome(&report, RuleId::NoBigamy, "I3")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::NoBigamy, "I2")?, Outcome::Passed);
        Ok(())
    }

    #[test]
    fn test_undated_concurrent_marriages_fail() -> anyhow::Result<()> {
        let people = || vec![person("I1", Sex::Male), person("I2", Sex::Female), person("I3", Sex::Female)];

        let report = validate(&RecordSet::new(people(), vec![couple("F1", "I1", "I2"), couple("F2", "I1", "I3")]))?;
        assert_eq!(outcome(&report, RuleId::NoBigamy, "I1")?, Outcome::Failed);

        let report = validate(&RecordSet::new(
            people(),
            vec![couple("F1", "I1", "I2").with_marriage("1990-01-01"), couple("F2", "I1", "I3")],
        ))?;
        assert_eq!(outcome(&report, RuleId::NoBigamy, "I1")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::NoBigamy, "I3")?, Outcome::Passed);
        Ok(())
    }
}
