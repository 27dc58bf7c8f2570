//! Temporal rules
//!
//! Checks on the ordering of births, deaths, marriages and divorces.

use super::{Rule, RuleContext, RuleId, birth_of, death_of};
use crate::error::Result;
use crate::models::{Family, Individual};
use crate::report::RuleResult;
use crate::utils::date_utils::{age, days_between};
use chrono::NaiveDate;

/// Birth occurs on or before death
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthBeforeDeath;

impl Rule for BirthBeforeDeath {
    fn id(&self) -> RuleId {
        RuleId::BirthBeforeDeath
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_individual(self.id(), |person| {
            let id = self.id();
            let (Some(birth), Some(death)) = (person.birth_date()?, person.death_date()?) else {
                return Ok(RuleResult::not_applicable(
                    id,
                    &person.id,
                    "birth and death dates are not both recorded",
                ));
            };
            Ok(RuleResult::check(
                id,
                &person.id,
                birth <= death,
                format!("born {birth}, died {death}"),
                format!("death {death} precedes birth {birth}"),
            ))
        })
    }
}

/// Children are born before the mother's death and within the posthumous
/// window after the father's death
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthBeforeParentsDeath;

impl Rule for BirthBeforeParentsDeath {
    fn id(&self) -> RuleId {
        RuleId::BirthBeforeParentsDeath
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            if family.children.is_empty() {
                return Ok(RuleResult::not_applicable(id, &family.id, "family has no children"));
            }

            let father_death = death_of(ctx.husband(family)?)?;
            let mother_death = death_of(ctx.wife(family)?)?;
            if father_death.is_none() && mother_death.is_none() {
                return Ok(RuleResult::pass(id, &family.id, "no parent death recorded"));
            }

            let window = ctx.config.posthumous_birth_days;
            let mut problems = Vec::new();
            for child in ctx.children(family)? {
                let Some(birth) = child.birth_date()? else {
                    continue;
                };
                if let Some(death) = mother_death {
                    if birth > death {
                        problems.push(format!(
                            "child {} born {birth} after mother's death {death}",
                            child.id
                        ));
                    }
                }
                if let Some(death) = father_death {
                    let days = days_between(death, birth);
                    if days > window {
                        problems.push(format!(
                            "child {} born {days} days after father's death {death}",
                            child.id
                        ));
                    }
                }
            }

            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                format!(
                    "children born before mother's death and within {window} days of father's death"
                ),
                problems.join("; "),
            ))
        })
    }
}

/// Spouses are born before their marriage
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthBeforeMarriage;

impl Rule for BirthBeforeMarriage {
    fn id(&self) -> RuleId {
        RuleId::BirthBeforeMarriage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            let Some(marriage) = family.marriage_date()? else {
                return Ok(no_marriage(id, family));
            };

            let mut problems = Vec::new();
            for (role, spouse) in ctx.spouses(family)? {
                if let Some(birth) = spouse.birth_date()? {
                    if birth >= marriage {
                        problems.push(format!(
                            "{role} {} born {birth}, not before marriage {marriage}",
                            spouse.id
                        ));
                    }
                }
            }

            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                format!("spouses born before marriage {marriage}"),
                problems.join("; "),
            ))
        })
    }
}

/// Children are born after the parents' marriage and no later than the
/// posthumous window after their divorce
#[derive(Debug, Clone, Copy, Default)]
pub struct BirthAfterParentsMarriage;

impl Rule for BirthAfterParentsMarriage {
    fn id(&self) -> RuleId {
        RuleId::BirthAfterParentsMarriage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            if family.children.is_empty() {
                return Ok(RuleResult::not_applicable(id, &family.id, "family has no children"));
            }
            let Some(marriage) = family.marriage_date()? else {
                return Ok(no_marriage(id, family));
            };
            let divorce = family.divorce_date()?;
            let window = ctx.config.posthumous_birth_days;

            let mut problems = Vec::new();
            for child in ctx.children(family)? {
                let Some(birth) = child.birth_date()? else {
                    continue;
                };
                if birth < marriage {
                    problems.push(format!(
                        "child {} born {birth} before marriage {marriage}",
                        child.id
                    ));
                }
                if let Some(divorce) = divorce {
                    let days = days_between(divorce, birth);
                    if days > window {
                        problems.push(format!(
                            "child {} born {days} days after divorce {divorce}",
                            child.id
                        ));
                    }
                }
            }

            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                "children born during the marriage",
                problems.join("; "),
            ))
        })
    }
}

/// Marriage occurs on or before the death of either spouse
#[derive(Debug, Clone, Copy, Default)]
pub struct MarriageBeforeDeath;

impl Rule for MarriageBeforeDeath {
    fn id(&self) -> RuleId {
        RuleId::MarriageBeforeDeath
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            let Some(marriage) = family.marriage_date()? else {
                return Ok(no_marriage(id, family));
            };

            let mut problems = Vec::new();
            for (role, spouse) in ctx.spouses(family)? {
                if let Some(death) = spouse.death_date()? {
                    if marriage > death {
                        problems.push(format!(
                            "marriage {marriage} after death of {role} {} on {death}",
                            spouse.id
                        ));
                    }
                }
            }

            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                format!("marriage {marriage} before death of either spouse"),
                problems.join("; "),
            ))
        })
    }
}

/// Divorce occurs after marriage and on or before the death of either spouse
#[derive(Debug, Clone, Copy, Default)]
pub struct DivorceBeforeDeath;

impl Rule for DivorceBeforeDeath {
    fn id(&self) -> RuleId {
        RuleId::DivorceBeforeDeath
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            let Some(divorce) = family.divorce_date()? else {
                return Ok(RuleResult::not_applicable(id, &family.id, "no divorce recorded"));
            };

            let mut problems = Vec::new();
            match family.marriage_date()? {
                Some(marriage) if divorce < marriage => {
                    problems.push(format!("divorce {divorce} precedes marriage {marriage}"));
                }
                Some(_) => {}
                None => problems.push(format!("divorce {divorce} recorded without a marriage")),
            }
            for (role, spouse) in ctx.spouses(family)? {
                if let Some(death) = spouse.death_date()? {
                    if divorce > death {
                        problems.push(format!(
                            "divorce {divorce} after death of {role} {} on {death}",
                            spouse.id
                        ));
                    }
                }
            }

            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                format!("divorce {divorce} after marriage and before death of either spouse"),
                problems.join("; "),
            ))
        })
    }
}

/// Both spouses are old enough at the marriage date
#[derive(Debug, Clone, Copy, Default)]
pub struct MarriageAfter14;

impl Rule for MarriageAfter14 {
    fn id(&self) -> RuleId {
        RuleId::MarriageAfter14
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            let Some(marriage) = family.marriage_date()? else {
                return Ok(no_marriage(id, family));
            };
            let min_age = ctx.config.min_marriage_age;

            let mut evaluated = 0;
            let mut problems = Vec::new();
            for (role, spouse) in ctx.spouses(family)? {
                let Some(birth) = spouse.birth_date()? else {
                    continue;
                };
                evaluated += 1;
                match age(birth, marriage) {
                    Some(years) if years >= min_age => {}
                    Some(years) => problems.push(format!(
                        "{role} {} was {years} at marriage, younger than {min_age}",
                        spouse.id
                    )),
                    None => problems.push(format!(
                        "{role} {} born {birth}, after marriage {marriage}",
                        spouse.id
                    )),
                }
            }

            if evaluated == 0 {
                return Ok(RuleResult::not_applicable(
                    id,
                    &family.id,
                    "no spouse birth date recorded",
                ));
            }
            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                format!("spouses at least {min_age} at marriage {marriage}"),
                problems.join("; "),
            ))
        })
    }
}

/// Lifespans are shorter than the configured maximum
#[derive(Debug, Clone, Copy, Default)]
pub struct LessThan150YearsOld;

impl Rule for LessThan150YearsOld {
    fn id(&self) -> RuleId {
        RuleId::LessThan150YearsOld
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_individual(self.id(), |person| {
            let id = self.id();
            let Some(birth) = person.birth_date()? else {
                return Ok(RuleResult::not_applicable(id, &person.id, "no birth date recorded"));
            };
            let death = person.death_date()?;
            if let Some(death) = death.filter(|death| *death < birth) {
                return Ok(RuleResult::fail(
                    id,
                    &person.id,
                    format!("death {death} precedes birth {birth}"),
                ));
            }

            let end = death.unwrap_or_else(|| ctx.as_of());
            let Some(years) = age(birth, end) else {
                return Ok(RuleResult::not_applicable(
                    id,
                    &person.id,
                    format!("born {birth}, after the processing date {end}"),
                ));
            };

            let max = ctx.config.max_lifespan_years;
            let state = if death.is_some() { "died at" } else { "alive at" };
            Ok(RuleResult::check(
                id,
                &person.id,
                years < max,
                format!("{state} {years}"),
                format!("{state} {years}, at least {max} years"),
            ))
        })
    }
}

/// No event is dated after the processing date
#[derive(Debug, Clone, Copy, Default)]
pub struct DatesBeforeCurrentDate;

impl DatesBeforeCurrentDate {
    fn check_events(
        &self,
        subject: &str,
        events: &[(&str, Option<NaiveDate>)],
        as_of: NaiveDate,
    ) -> RuleResult {
        let id = self.id();
        if events.iter().all(|(_, date)| date.is_none()) {
            return RuleResult::not_applicable(id, subject, "no dated events recorded");
        }

        let future: Vec<_> = events
            .iter()
            .filter_map(|(event, date)| date.filter(|date| *date > as_of).map(|date| (event, date)))
            .map(|(event, date)| format!("{event} {date} is after {as_of}"))
            .collect();

        RuleResult::check(
            id,
            subject,
            future.is_empty(),
            format!("all events on or before {as_of}"),
            future.join("; "),
        )
    }

    fn check_individual(&self, person: &Individual, as_of: NaiveDate) -> Result<RuleResult> {
        let events = [("birth", person.birth_date()?), ("death", person.death_date()?)];
        Ok(self.check_events(&person.id, &events, as_of))
    }

    fn check_family(&self, family: &Family, as_of: NaiveDate) -> Result<RuleResult> {
        let events = [
            ("marriage", family.marriage_date()?),
            ("divorce", family.divorce_date()?),
        ];
        Ok(self.check_events(&family.id, &events, as_of))
    }
}

impl Rule for DatesBeforeCurrentDate {
    fn id(&self) -> RuleId {
        RuleId::DatesBeforeCurrentDate
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let as_of = ctx.as_of();
        let mut results = ctx.each_individual(self.id(), |person| self.check_individual(person, as_of));
        results.extend(ctx.each_family(self.id(), |family| self.check_family(family, as_of)));
        results
    }
}

/// Parents are not implausibly older than their children
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentsNotTooOld;

impl Rule for ParentsNotTooOld {
    fn id(&self) -> RuleId {
        RuleId::ParentsNotTooOld
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        ctx.each_family(self.id(), |family| {
            let id = self.id();
            if family.children.is_empty() {
                return Ok(RuleResult::not_applicable(id, &family.id, "family has no children"));
            }

            let father_birth = birth_of(ctx.husband(family)?)?;
            let mother_birth = birth_of(ctx.wife(family)?)?;
            let limits = [
                ("mother", mother_birth, ctx.config.max_mother_age_gap),
                ("father", father_birth, ctx.config.max_father_age_gap),
            ];

            let mut problems = Vec::new();
            for child in ctx.children(family)? {
                let Some(child_birth) = child.birth_date()? else {
                    continue;
                };
                for (parent, parent_birth, limit) in &limits {
                    let gap = parent_birth.and_then(|birth| age(birth, child_birth));
                    if let Some(gap) = gap.filter(|gap| gap > limit) {
                        problems.push(format!(
                            "{parent} is {gap} years older than child {}, more than {limit}",
                            child.id
                        ));
                    }
                }
            }

            Ok(RuleResult::check(
                id,
                &family.id,
                problems.is_empty(),
                "parents within plausible age of their children",
                problems.join("; "),
            ))
        })
    }
}

fn no_marriage(id: RuleId, family: &Family) -> RuleResult {
    RuleResult::not_applicable(id, &family.id, "no marriage date recorded")
}
