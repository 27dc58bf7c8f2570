#[cfg(test)]
mod tests {
    use crate::utils::{couple, person};
    use kin_rules::{RecordSet, RelationshipIndex, Sex, ValidationError};

    #[test]
    fn test_relationships_from_record_set() {
        let records = RecordSet::new(
            vec![
                person("I1", Sex::Male),
                person("I2", Sex::Female),
                person("I3", Sex::Male),
                person("I4", Sex::Female),
                person("I5", Sex::Female),
            ],
            vec![
                couple("F1", "I1", "I2").with_child("I3").with_child("I4"),
                couple("F2", "I3", "I5"),
            ],
        );
        let index = RelationshipIndex::new(&records);

        assert_eq!(index.siblings_of("I4"), vec!["I3"]);
        assert_eq!(index.parents_of("I3").as_slice(), &["I1", "I2"]);
        assert_eq!(index.spouses_of("I3"), vec!["I5"]);
        assert!(index.is_ancestor_of("I2", "I4", 8).unwrap());
        assert!(!index.is_ancestor_of("I5", "I4", 8).unwrap());
    }

    #[test]
    fn test_child_listed_twice_is_one_sibling() {
        let records = RecordSet::new(
            vec![person("I1", Sex::Male), person("I2", Sex::Female)],
            vec![couple("F1", "I9", "I8").with_child("I1").with_child("I2").with_child("I2")],
        );
        let index = RelationshipIndex::new(&records);
        assert_eq!(index.siblings_of("I1"), vec!["I2"]);
    }

    #[test]
    fn test_json_errors_are_typed() {
        let err = RecordSet::from_json("{\"individuals\": 3}").unwrap_err();
        assert!(matches!(err, ValidationError::Json(_)));
    }

    #[test]
    fn test_malformed_date_names_record_and_field() {
        let individual = person("I7", Sex::Male).with_death("31 FEB 1990");
        let err = individual.death_date().unwrap_err();
        assert_eq!(err.to_string(), "Malformed date in I7.death: '31 FEB 1990'");
    }
}
