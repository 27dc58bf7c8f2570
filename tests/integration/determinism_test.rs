#[cfg(test)]
mod tests {
    use crate::utils::{as_of, couple, init_logging, person, test_config};
    use kin_rules::{RecordSet, Sex, Validator};

    fn records() -> RecordSet {
        RecordSet::new(
            vec![
                person("I4", Sex::Female).with_birth("1990-05-05"),
                person("I1", Sex::Male).with_birth("1950-01-01").with_death("1940-01-01"),
                person("I3", Sex::Male).with_birth("1990-05-06"),
                person("I2", Sex::Female).with_birth("not a date"),
            ],
            vec![
                couple("F2", "I3", "I4").with_marriage("2010-01-01"),
                couple("F1", "I1", "I2").with_child("I3").with_child("I4").with_child("I9"),
            ],
        )
    }

    #[test]
    fn test_runs_are_idempotent() -> anyhow::Result<()> {
        init_logging();
        let validator = Validator::new(test_config())?;
        let first = validator.run(&records())?;
        let second = validator.run(&records())?;
        assert_eq!(first, second);
        assert_eq!(first.as_of(), as_of());
        Ok(())
    }

    #[test]
    fn test_parallel_run_matches_sequential() -> anyhow::Result<()> {
        init_logging();
        let sequential = Validator::new(test_config())?.run(&records())?;
        let parallel = Validator::new(test_config().with_parallel(true).with_worker_threads(4))?
            .run(&records())?;
        assert_eq!(sequential, parallel);
        Ok(())
    }

    #[test]
    fn test_results_are_ordered() -> anyhow::Result<()> {
        init_logging();
        let report = Validator::new(test_config())?.run(&records())?;
        let keys: Vec<_> = report
            .results()
            .iter()
            .map(|result| (result.rule_id, result.subject_ids.to_vec()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(!report.inconclusive().is_empty());
        Ok(())
    }
}
