#[cfg(test)]
mod tests {
    use crate::utils::{couple, outcome, person, validate};
    use kin_rules::{Outcome, RecordSet, RuleId, Sex};

    fn family_with(children: usize) -> RecordSet {
        let mut individuals = vec![person("H", Sex::Male), person("W", Sex::Female)];
        let mut family = couple("F1", "H", "W");
        for n in 0..children {
            let id = format!("C{n:02}");
            individuals.push(person(&id, Sex::Female));
            family = family.with_child(id);
        }
        RecordSet::new(individuals, vec![family])
    }

    #[test]
    fn test_sibling_count_limit() -> anyhow::Result<()> {
        let report = validate(&family_with(14))?;
        assert_eq!(outcome(&report, RuleId::FewerThan15Siblings, "F1")?, Outcome::Passed);

        let report = validate(&family_with(16))?;
        assert_eq!(outcome(&report, RuleId::FewerThan15Siblings, "F1")?, Outcome::Failed);
        Ok(())
    }

    #[test]
    fn test_twins_and_close_siblings() -> anyhow::Result<()> {
        let records = RecordSet::new(
            vec![
                person("H", Sex::Male),
                person("W", Sex::Female),
                person("C1", Sex::Male).with_birth("2000-03-01"),
                person("C2", Sex::Male).with_birth("2000-03-02"),
                person("C3", Sex::Female).with_birth("2000-10-01"),
            ],
            vec![couple("F1", "H", "W").with_child("C1").with_child("C2").with_child("C3")],
        );
        let report = validate(&records)?;
        assert_eq!(outcome(&report, RuleId::SiblingSpacing, "F1")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::MultipleBirthsAtMost5, "F1")?, Outcome::Passed);
        Ok(())
    }

    fn siblings_born(births: &[&str]) -> RecordSet {
        let mut individuals = vec![person("H", Sex::Male), person("W", Sex::Female)];
        let mut family = couple("F1", "H", "W");
        for (n, birth) in births.iter().enumerate() {
            let id = format!("C{n}");
            individuals.push(person(&id, Sex::Male).with_birth(*birth));
            family = family.with_child(id);
        }
        RecordSet::new(individuals, vec![family])
    }

    #[test]
    fn test_sibling_spacing_range_edges() -> anyhow::Result<()> {
        // 2, 279 and 280 days after 2000-01-01
        for (second, expected) in [
            ("2000-01-03", Outcome::Failed),
            ("2000-10-06", Outcome::Failed),
            ("2000-10-07", Outcome::Passed),
        ] {
            let report = validate(&siblings_born(&["2000-01-01", second]))?;
            assert_eq!(outcome(&report, RuleId::SiblingSpacing, "F1")?, expected, "second birth {second}");
        }
        Ok(())
    }

    #[test]
    fn test_births_two_days_apart_are_separate_events() -> anyhow::Result<()> {
        let births = ["2000-01-01", "2000-01-01", "2000-01-01", "2000-01-03", "2000-01-03", "2000-01-03"];
        let report = validate(&siblings_born(&births))?;
        assert_eq!(outcome(&report, RuleId::MultipleBirthsAtMost5, "F1")?, Outcome::Passed);

        let births = ["2000-01-01", "2000-01-01", "2000-01-01", "2000-01-02", "2000-01-02", "2000-01-02"];
        let report = validate(&siblings_born(&births))?;
        assert_eq!(outcome(&report, RuleId::MultipleBirthsAtMost5, "F1")?, Outcome::Failed);
        Ok(())
    }
}
