//! Lineage rules
//!
//! Marriages between close relatives and overlapping marriages. All queries
//! go through the relationship index built for the run.

use super::{Rule, RuleContext, RuleId, death_of};
use crate::error::Result;
use crate::models::{Family, Individual};
use crate::report::RuleResult;
use chrono::NaiveDate;
use itertools::Itertools;

/// Both spouses of a family, or `None` when either is missing
fn spouse_pair<'a>(
    ctx: &RuleContext<'a>,
    family: &Family,
) -> Result<Option<(&'a Individual, &'a Individual)>> {
    Ok(ctx.husband(family)?.zip(ctx.wife(family)?))
}

fn missing_spouse(id: RuleId, family: &Family) -> RuleResult {
    RuleResult::not_applicable(id, &family.id, "family does not record both spouses")
}

/// No one marries their ancestor or descendant
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarriageToDescendant;

impl Rule for NoMarriageToDescendant {
    fn id(&self) -> RuleId {
        RuleId::NoMarriageToDescendant
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let depth = ctx.config.max_ancestor_depth;
        ctx.each_family(self.id(), |family| {
            let Some((husband, wife)) = spouse_pair(ctx, family)? else {
                return Ok(missing_spouse(self.id(), family));
            };

            let finding = if ctx.index.is_ancestor_of(&husband.id, &wife.id, depth)? {
                Some(format!("husband {} is an ancestor of wife {}", husband.id, wife.id))
            } else if ctx.index.is_ancestor_of(&wife.id, &husband.id, depth)? {
                Some(format!("wife {} is an ancestor of husband {}", wife.id, husband.id))
            } else {
                None
            };

            Ok(match finding {
                Some(message) => RuleResult::fail(self.id(), &family.id, message),
                None => RuleResult::pass(self.id(), &family.id, "spouses are not in a direct line"),
            })
        })
    }
}

/// Siblings do not marry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSiblingMarriage;

impl Rule for NoSiblingMarriage {
    fn id(&self) -> RuleId {
        RuleId::NoSiblingMarriage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let Some((husband, wife)) = spouse_pair(ctx, family)? else {
                return Ok(missing_spouse(self.id(), family));
            };

            let siblings = ctx.index.is_sibling_pair(&husband.id, &wife.id);
            let shared = ctx
                .index
                .parent_family_of(&husband.id)
                .map_or("", |parents| parents.id.as_str());
            Ok(RuleResult::check(
                self.id(),
                &family.id,
                !siblings,
                "spouses are not siblings",
                format!(
                    "husband {} and wife {} are siblings in family {shared}",
                    husband.id, wife.id
                ),
            ))
        })
    }
}

/// First cousins do not marry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFirstCousinMarriage;

impl Rule for NoFirstCousinMarriage {
    fn id(&self) -> RuleId {
        RuleId::NoFirstCousinMarriage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let Some((husband, wife)) = spouse_pair(ctx, family)? else {
                return Ok(missing_spouse(self.id(), family));
            };

            let husband_parents = ctx.index.parents_of(&husband.id);
            let wife_parents = ctx.index.parents_of(&wife.id);
            let shared: Vec<_> = husband_parents
                .iter()
                .cartesian_product(wife_parents.iter())
                .filter(|(left, right)| ctx.index.is_sibling_pair(left, right))
                .map(|(left, right)| format!("parents {left} and {right} are siblings"))
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                shared.is_empty(),
                "spouses are not first cousins",
                shared.join("; "),
            ))
        })
    }
}

/// Aunts and uncles do not marry nieces and nephews
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuntUncleMarriage;

impl NoAuntUncleMarriage {
    /// Parents of `niece_or_nephew` who are siblings of `elder`
    fn shared_line(ctx: &RuleContext<'_>, niece_or_nephew: &str, elder: &str) -> Vec<String> {
        ctx.index
            .parents_of(niece_or_nephew)
            .iter()
            .filter(|parent| ctx.index.is_sibling_pair(parent, elder))
            .map(|parent| format!("{elder} is a sibling of {niece_or_nephew}'s parent {parent}"))
            .collect()
    }
}

impl Rule for NoAuntUncleMarriage {
    fn id(&self) -> RuleId {
        RuleId::NoAuntUncleMarriage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let Some((husband, wife)) = spouse_pair(ctx, family)? else {
                return Ok(missing_spouse(self.id(), family));
            };

            let mut findings = Self::shared_line(ctx, &husband.id, &wife.id);
            findings.extend(Self::shared_line(ctx, &wife.id, &husband.id));

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                findings.is_empty(),
                "spouses are not aunt or uncle and niece or nephew",
                findings.join("; "),
            ))
        })
    }
}

/// A marriage of one individual
#[derive(Debug, Clone, Copy)]
struct Marriage<'a> {
    family_id: &'a str,
    partner_id: Option<&'a str>,
    /// Absent when the marriage date is not recorded
    start: Option<NaiveDate>,
    /// Earlier of divorce and partner's death
    end: Option<NaiveDate>,
}

impl Marriage<'_> {
    /// Whether the marriage is known to be in force just before `moment`
    ///
    /// `None` stands for the present. An undated marriage is only known to be
    /// in force at the present, and only while it has not ended.
    fn in_force_at(&self, moment: Option<NaiveDate>) -> bool {
        match moment {
            None => self.end.is_none(),
            Some(moment) => {
                self.start.is_some_and(|start| start < moment)
                    && self.end.is_none_or(|end| end >= moment)
            }
        }
    }

    /// Whether both marriages were certainly in force at the same time
    fn overlaps(&self, other: &Self) -> bool {
        match (self.start, other.start) {
            (Some(start), Some(other_start)) => {
                self.end.is_none_or(|end| end > other_start)
                    && other.end.is_none_or(|end| end > start)
            }
            (None, _) => other.in_force_at(self.end),
            (_, None) => self.in_force_at(other.end),
        }
    }

    fn describe(&self) -> String {
        match self.start {
            Some(start) => format!("{} (married {start})", self.family_id),
            None => format!("{} (undated)", self.family_id),
        }
    }
}

/// No one is married to two living spouses at once
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBigamy;

impl NoBigamy {
    fn marriages<'a>(ctx: &RuleContext<'a>, person: &Individual) -> Result<Vec<Marriage<'a>>> {
        let mut marriages = Vec::new();
        for &family in ctx.index.spouse_families_of(&person.id) {
            let start = family.marriage_date()?;
            let partner_id = family.partner_of(&person.id);
            let partner = match partner_id {
                Some(id) => Some(ctx.records.resolve_individual(&family.id, "spouse", id)?),
                None => None,
            };
            let end = [family.divorce_date()?, death_of(partner)?]
                .into_iter()
                .flatten()
                .min();
            marriages.push(Marriage {
                family_id: &family.id,
                partner_id,
                start,
                end,
            });
        }
        marriages.sort_by_key(|marriage| (marriage.start.is_none(), marriage.start, marriage.family_id));
        Ok(marriages)
    }
}

impl Rule for NoBigamy {
    fn id(&self) -> RuleId {
        RuleId::NoBigamy
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_individual(self.id(), |person| {
            if ctx.index.spouse_families_of(&person.id).is_empty() {
                return Ok(RuleResult::not_applicable(self.id(), &person.id, "never married"));
            }

            let marriages = Self::marriages(ctx, person)?;
            let overlaps: Vec<_> = marriages
                .iter()
                .tuple_combinations()
                .filter(|(earlier, later)| earlier.partner_id != later.partner_id)
                .filter(|(earlier, later)| earlier.overlaps(later))
                .map(|(earlier, later)| {
                    format!("marriage {} while still married in {}", later.describe(), earlier.family_id)
                })
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &person.id,
                overlaps.is_empty(),
                format!("{} marriage(s) without overlap", marriages.len()),
                overlaps.join("; "),
            ))
        })
    }
}
