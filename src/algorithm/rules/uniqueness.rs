//! Uniqueness rules
//!
//! Duplicate individuals, duplicate families, and name consistency within a
//! family.

use super::{Rule, RuleContext, RuleId};
use crate::models::{Family, Sex};
use crate::report::RuleResult;
use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::FxHashMap;

/// No two individuals share name and birth date
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueNameAndBirthDate;

impl Rule for UniqueNameAndBirthDate {
    fn id(&self) -> RuleId {
        RuleId::UniqueNameAndBirthDate
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        // Unparseable births are reported when their owner is checked
        let mut by_key: FxHashMap<(&str, NaiveDate), Vec<&str>> = FxHashMap::default();
        for person in ctx.records.individuals() {
            if let Ok(Some(birth)) = person.birth_date() {
                by_key
                    .entry((person.name.trim(), birth))
                    .or_default()
                    .push(&person.id);
            }
        }

        ctx.each_individual(self.id(), |person| {
            let Some(birth) = person.birth_date()? else {
                return Ok(RuleResult::not_applicable(self.id(), &person.id, "no birth date recorded"));
            };

            let others: Vec<_> = by_key
                .get(&(person.name.trim(), birth))
                .into_iter()
                .flatten()
                .filter(|id| **id != person.id)
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &person.id,
                others.is_empty(),
                format!("no other '{}' born {birth}", person.name),
                format!(
                    "'{}' born {birth} is also recorded as {}",
                    person.name,
                    others.iter().join(", ")
                ),
            ))
        })
    }
}

/// No two families share spouses and marriage date
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueFamiliesBySpouses;

impl UniqueFamiliesBySpouses {
    /// Spouse names (falling back to ids) used to compare families
    fn spouse_key<'a>(ctx: &RuleContext<'a>, family: &'a Family) -> (&'a str, &'a str) {
        let name = |id: Option<&'a str>| {
            id.map(|id| ctx.records.individual(id).map_or(id, |person| person.name.trim()))
                .unwrap_or("")
        };
        (name(family.husband_id.as_deref()), name(family.wife_id.as_deref()))
    }
}

impl Rule for UniqueFamiliesBySpouses {
    fn id(&self) -> RuleId {
        RuleId::UniqueFamiliesBySpouses
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let mut by_key: FxHashMap<((&str, &str), NaiveDate), Vec<&str>> = FxHashMap::default();
        for family in ctx.records.families() {
            if let Ok(Some(marriage)) = family.marriage_date() {
                by_key
                    .entry((Self::spouse_key(ctx, family), marriage))
                    .or_default()
                    .push(&family.id);
            }
        }

        ctx.each_family(self.id(), |family| {
            let Some(marriage) = family.marriage_date()? else {
                return Ok(RuleResult::not_applicable(
                    self.id(),
                    &family.id,
                    "no marriage date recorded",
                ));
            };

            let (husband, wife) = Self::spouse_key(ctx, family);
            let others: Vec<_> = by_key
                .get(&((husband, wife), marriage))
                .into_iter()
                .flatten()
                .filter(|id| **id != family.id)
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                others.is_empty(),
                "no other family with the same spouses and marriage date",
                format!(
                    "'{husband}' and '{wife}' married {marriage} also recorded as {}",
                    others.iter().join(", ")
                ),
            ))
        })
    }
}

/// No two children of a family share first name and birth date
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueFirstNamesInFamily;

impl Rule for UniqueFirstNamesInFamily {
    fn id(&self) -> RuleId {
        RuleId::UniqueFirstNamesInFamily
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let children = ctx.children(family)?;
            if children.len() < 2 {
                return Ok(RuleResult::not_applicable(self.id(), &family.id, "fewer than two children"));
            }

            let mut by_key: FxHashMap<(&str, NaiveDate), Vec<&str>> = FxHashMap::default();
            for child in &children {
                if let Some(birth) = child.birth_date()? {
                    by_key
                        .entry((child.first_name(), birth))
                        .or_default()
                        .push(&child.id);
                }
            }

            let duplicates: Vec<_> = by_key
                .into_iter()
                .filter(|(_, ids)| ids.len() > 1)
                .sorted()
                .map(|((first_name, birth), ids)| {
                    format!("{} share first name '{first_name}' and birth {birth}", ids.join(", "))
                })
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                duplicates.is_empty(),
                "children have distinct first names and birth dates",
                duplicates.join("; "),
            ))
        })
    }
}

/// Male members of a family share the same last name
#[derive(Debug, Clone, Copy, Default)]
pub struct MaleLastNames;

impl Rule for MaleLastNames {
    fn id(&self) -> RuleId {
        RuleId::MaleLastNames
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let husband = ctx.husband(family)?;
            let sons = ctx.children(family)?.into_iter().filter(|child| child.sex == Sex::Male);
            let surnames: Vec<_> = husband
                .into_iter()
                .chain(sons)
                .filter_map(|member| member.surname())
                .unique()
                .collect();

            match surnames.as_slice() {
                [] => Ok(RuleResult::not_applicable(
                    self.id(),
                    &family.id,
                    "no male member with a surname",
                )),
                [surname] => Ok(RuleResult::pass(
                    self.id(),
                    &family.id,
                    format!("male members share the surname {surname}"),
                )),
                _ => Ok(RuleResult::fail(
                    self.id(),
                    &family.id,
                    format!("male members carry surnames {}", surnames.join(", ")),
                )),
            }
        })
    }
}
