//! Integrity rules
//!
//! Cross-reference checks between individual and family records. Unresolved
//! ids are findings here rather than data errors.

use super::{Rule, RuleContext, RuleId};
use crate::models::{Family, FamilyRole, Individual, Sex};
use crate::report::RuleResult;
use itertools::Itertools;

/// Subject used by record-set wide results
pub const ALL_RECORDS: &str = "*";

/// Family members exist and every individual belongs to a family
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordsResolve;

impl RecordsResolve {
    fn check_family(&self, ctx: &RuleContext<'_>, family: &Family) -> RuleResult {
        let missing: Vec<_> = family
            .member_ids()
            .filter(|(_, id)| ctx.records.individual(id).is_none())
            .map(|(role, id)| format!("{role} {id} does not exist"))
            .collect();

        RuleResult::check(
            self.id(),
            &family.id,
            missing.is_empty(),
            format!("all {} members exist", family.member_ids().count()),
            missing.join("; "),
        )
    }

    fn check_individual(&self, ctx: &RuleContext<'_>, person: &Individual) -> RuleResult {
        let as_child = ctx.index.parent_family_of(&person.id).is_some();
        let as_spouse = !ctx.index.spouse_families_of(&person.id).is_empty();
        RuleResult::check(
            self.id(),
            &person.id,
            as_child || as_spouse,
            "belongs to a family",
            "not listed in any family as husband, wife or child",
        )
    }
}

impl Rule for RecordsResolve {
    fn id(&self) -> RuleId {
        RuleId::RecordsResolve
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let mut results = ctx.each_family(self.id(), |family| Ok(self.check_family(ctx, family)));
        results.extend(ctx.each_individual(self.id(), |person| Ok(self.check_individual(ctx, person))));
        results
    }
}

/// Individual and family records reference each other consistently
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrespondingRecords;

impl CorrespondingRecords {
    fn check_individual(&self, ctx: &RuleContext<'_>, person: &Individual) -> RuleResult {
        let mut problems = Vec::new();
        for family_id in &person.spouse_families {
            match ctx.records.family(family_id) {
                None => problems.push(format!("spouse family {family_id} does not exist")),
                Some(family) if !family.is_spouse(&person.id) => {
                    problems.push(format!("spouse family {family_id} does not list them as a spouse"));
                }
                Some(_) => {}
            }
        }
        for family_id in &person.child_families {
            match ctx.records.family(family_id) {
                None => problems.push(format!("child family {family_id} does not exist")),
                Some(family) if !family.has_child(&person.id) => {
                    problems.push(format!("child family {family_id} does not list them as a child"));
                }
                Some(_) => {}
            }
        }

        RuleResult::check(
            self.id(),
            &person.id,
            problems.is_empty(),
            "family links confirmed by the families",
            problems.join("; "),
        )
    }

    fn check_family(&self, ctx: &RuleContext<'_>, family: &Family) -> RuleResult {
        let mut problems = Vec::new();
        for (role, id) in family.member_ids() {
            // Unresolved members belong to records-resolve
            let Some(person) = ctx.records.individual(id) else {
                continue;
            };
            let linked = match role {
                FamilyRole::Husband | FamilyRole::Wife => person.spouse_families.contains(&family.id),
                FamilyRole::Child => person.child_families.contains(&family.id),
            };
            if !linked {
                problems.push(format!("{role} {id} does not record this family"));
            }
        }

        RuleResult::check(
            self.id(),
            &family.id,
            problems.is_empty(),
            "member links confirmed by the individuals",
            problems.join("; "),
        )
    }
}

impl Rule for CorrespondingRecords {
    fn id(&self) -> RuleId {
        RuleId::CorrespondingRecords
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let mut results =
            ctx.each_individual(self.id(), |person| Ok(self.check_individual(ctx, person)));
        results.extend(ctx.each_family(self.id(), |family| Ok(self.check_family(ctx, family))));
        results
    }
}

/// Husbands are male and wives are female
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectGenderForRole;

impl Rule for CorrectGenderForRole {
    fn id(&self) -> RuleId {
        RuleId::CorrectGenderForRole
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let spouses = ctx.spouses(family)?;
            if spouses.is_empty() {
                return Ok(RuleResult::not_applicable(self.id(), &family.id, "no spouses recorded"));
            }

            let wrong: Vec<_> = spouses
                .iter()
                .filter(|(role, spouse)| match role {
                    FamilyRole::Husband => spouse.sex != Sex::Male,
                    FamilyRole::Wife => spouse.sex != Sex::Female,
                    FamilyRole::Child => false,
                })
                .map(|(role, spouse)| format!("{role} {} has sex {}", spouse.id, spouse.sex))
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                wrong.is_empty(),
                "spouse sexes match their roles",
                wrong.join("; "),
            ))
        })
    }
}

/// Individual ids are unique among individuals, family ids among families
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIds;

impl UniqueIds {
    fn duplicates<'a>(
        &self,
        kind: &str,
        ids: impl Iterator<Item = &'a str>,
    ) -> impl Iterator<Item = RuleResult> {
        let id = self.id();
        let kind = kind.to_string();
        ids.counts()
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .sorted()
            .map(move |(subject, count)| {
                RuleResult::fail(id, subject, format!("{kind} id {subject} is used by {count} records"))
            })
    }
}

impl Rule for UniqueIds {
    fn id(&self) -> RuleId {
        RuleId::UniqueIds
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let individuals = ctx.records.individuals().iter().map(|person| person.id.as_str());
        let families = ctx.records.families().iter().map(|family| family.id.as_str());

        let results: Vec<_> = self
            .duplicates("individual", individuals)
            .chain(self.duplicates("family", families))
            .collect();

        if results.is_empty() {
            return vec![RuleResult::pass(
                self.id(),
                ALL_RECORDS,
                format!(
                    "{} individual and {} family ids are unique",
                    ctx.records.individual_count(),
                    ctx.records.family_count()
                ),
            )];
        }
        results
    }
}
