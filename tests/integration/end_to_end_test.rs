#[cfg(test)]
mod tests {
    use crate::utils::{outcome, validate};
    use kin_rules::{Family, Individual, Outcome, RecordSet, RuleCategory, RuleId, Sex};

    /// Siblings I1 and I2 of family F0 married to each other in F1
    fn sibling_couple() -> RecordSet {
        RecordSet::new(
            vec![
                Individual::new("I1", "Adam /Stone/", Sex::Male)
                    .with_birth("1 JAN 1950")
                    .with_child_family("F0")
                    .with_spouse_family("F1"),
                Individual::new("I2", "Eve /Stone/", Sex::Female)
                    .with_birth("1 JAN 1950")
                    .with_child_family("F0")
                    .with_spouse_family("F1"),
            ],
            vec![
                Family::new("F0").with_child("I1").with_child("I2"),
                Family::new("F1")
                    .with_husband("I1")
                    .with_wife("I2")
                    .with_marriage("1 JAN 1970"),
            ],
        )
    }

    #[test]
    fn test_sibling_couple_scenario() -> anyhow::Result<()> {
        let report = validate(&sibling_couple())?;

        assert_eq!(outcome(&report, RuleId::NoSiblingMarriage, "F1")?, Outcome::Failed);
        assert_eq!(outcome(&report, RuleId::MarriageAfter14, "F1")?, Outcome::Passed);
        assert_eq!(outcome(&report, RuleId::CorrespondingRecords, "F1")?, Outcome::Passed);
        assert_eq!(outcome(&report, RuleId::RecordsResolve, "I1")?, Outcome::Passed);
        assert_eq!(outcome(&report, RuleId::NoSiblingMarriage, "F0")?, Outcome::NotApplicable);
        assert!(!report.is_clean());
        Ok(())
    }

    #[test]
    fn test_every_rule_reports() -> anyhow::Result<()> {
        let report = validate(&sibling_couple())?;

        let summaries = report.summaries();
        assert_eq!(summaries.len(), RuleId::ALL.len());
        let counted: usize = summaries
            .iter()
            .map(|s| s.passed + s.failed + s.not_applicable + s.inconclusive)
            .sum();
        assert_eq!(counted, report.total());
        assert_eq!(report.by_rule().len(), RuleId::ALL.len());
        assert!(report.inconclusive().is_empty());
        assert_eq!(report.failures_by_category().get(&RuleCategory::Lineage), Some(&1));
        Ok(())
    }

    #[test]
    fn test_text_report() -> anyhow::Result<()> {
        let report = validate(&sibling_couple())?;
        let rendered = report.to_string();

        assert!(rendered.starts_with("Validation Report (as of 2020-01-01):"));
        assert!(rendered.lines().any(|line| {
            line.starts_with("FAIL") && line.contains("no-sibling-marriage") && line.contains("F1")
        }));
        Ok(())
    }
}
