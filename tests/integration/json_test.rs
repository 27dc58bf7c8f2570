#[cfg(test)]
mod tests {
    use crate::utils::validate;
    use kin_rules::RecordSet;
    use serde_json::Value;

    const DOCUMENT: &str = r#"{
        "individuals": [
            {"id": "I1", "name": "John /Smith/", "sex": "M", "birth": "1 JAN 1950",
             "spouse_families": ["F1"]},
            {"id": "I2", "name": "Mary /Jones/", "sex": "F", "birth": "1 JAN 1960",
             "spouse_families": ["F1"]},
            {"id": "I3", "name": "Tom /Smith/", "sex": "M", "birth": "1 JAN 1970",
             "child_families": ["F1"]}
        ],
        "families": [
            {"id": "F1", "husband_id": "I1", "wife_id": "I2", "children": ["I3"],
             "marriage": "1 JAN 1975"}
        ]
    }"#;

    #[test]
    fn test_json_in_json_out() -> anyhow::Result<()> {
        let records = RecordSet::from_json(DOCUMENT)?;
        let report = validate(&records)?;
        let json: Value = serde_json::from_str(&report.to_json()?)?;

        assert_eq!(json["as_of"], "2020-01-01");
        let results = json["results"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("results is not an array"))?;
        assert_eq!(results.len(), report.total());

        let child_born_before_marriage = results
            .iter()
            .find(|r| r["rule_id"] == "birth-after-parents-marriage")
            .ok_or_else(|| anyhow::anyhow!("missing birth-after-parents-marriage"))?;
        assert_eq!(child_born_before_marriage["subject_ids"][0], "F1");
        assert_eq!(child_born_before_marriage["passed"], false);
        assert_eq!(child_born_before_marriage["outcome"], "failed");
        Ok(())
    }
}
