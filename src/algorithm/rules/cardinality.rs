//! Cardinality rules
//!
//! Plausible numbers and spacing of children within one family.

use super::{Rule, RuleContext, RuleId};
use crate::error::Result;
use crate::models::Family;
use crate::report::RuleResult;
use crate::utils::date_utils::days_between;
use chrono::NaiveDate;
use itertools::Itertools;

/// Births at most this many days after an event's first birth belong to it
pub const MULTIPLE_BIRTH_WINDOW_DAYS: i64 = 1;

/// Children born in one birth event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthEvent<'a> {
    /// Birth date of the first child of the event
    pub date: NaiveDate,
    /// Ids of every child born in the event
    pub children: Vec<&'a str>,
}

impl BirthEvent<'_> {
    /// Whether more than one child was born in the event
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.children.len() > 1
    }
}

/// Group dated births into birth events, earliest first
///
/// Events are anchored on their first birth, so a chain of births one day
/// apart does not merge into a single event.
#[must_use]
pub fn birth_events<'a>(births: impl IntoIterator<Item = (NaiveDate, &'a str)>) -> Vec<BirthEvent<'a>> {
    let mut events: Vec<BirthEvent<'a>> = Vec::new();
    for (date, child) in births.into_iter().sorted() {
        match events.last_mut() {
            Some(event) if days_between(event.date, date) <= MULTIPLE_BIRTH_WINDOW_DAYS => {
                event.children.push(child);
            }
            _ => events.push(BirthEvent {
                date,
                children: vec![child],
            }),
        }
    }
    events
}

/// Dated births of a family's children, in listed order
fn dated_births<'a>(ctx: &RuleContext<'a>, family: &Family) -> Result<Vec<(NaiveDate, &'a str)>> {
    let mut births = Vec::new();
    for child in ctx.children(family)? {
        if let Some(date) = child.birth_date()? {
            births.push((date, child.id.as_str()));
        }
    }
    Ok(births)
}

/// Families have fewer than 15 children
#[derive(Debug, Clone, Copy, Default)]
pub struct FewerThan15Siblings;

impl Rule for FewerThan15Siblings {
    fn id(&self) -> RuleId {
        RuleId::FewerThan15Siblings
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let max = ctx.config.max_children;
        ctx.each_family(self.id(), |family| {
            let count = family.family_size();
            Ok(RuleResult::check(
                self.id(),
                &family.id,
                count < max,
                format!("{count} children"),
                format!("{count} children, limit is fewer than {max}"),
            ))
        })
    }
}

/// No more than 5 siblings share a birth
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleBirthsAtMost5;

impl Rule for MultipleBirthsAtMost5 {
    fn id(&self) -> RuleId {
        RuleId::MultipleBirthsAtMost5
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let max = ctx.config.max_multiple_births;
        ctx.each_family(self.id(), |family| {
            let births = dated_births(ctx, family)?;
            if births.is_empty() {
                return Ok(RuleResult::not_applicable(
                    self.id(),
                    &family.id,
                    "no child birth dates recorded",
                ));
            }

            let oversized: Vec<_> = birth_events(births)
                .into_iter()
                .filter(|event| event.children.len() > max)
                .map(|event| format!("{} children born on {}", event.children.len(), event.date))
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                oversized.is_empty(),
                format!("no more than {max} children per birth"),
                oversized.join("; "),
            ))
        })
    }
}

/// Sibling births are a multiple birth or far enough apart
#[derive(Debug, Clone, Copy, Default)]
pub struct SiblingSpacing;

impl Rule for SiblingSpacing {
    fn id(&self) -> RuleId {
        RuleId::SiblingSpacing
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<RuleResult> {
        let spacing = ctx.config.sibling_spacing_days;
        ctx.each_family(self.id(), |family| {
            let births = dated_births(ctx, family)?;
            if births.len() < 2 {
                return Ok(RuleResult::not_applicable(
                    self.id(),
                    &family.id,
                    "fewer than two dated children",
                ));
            }

            let close: Vec<_> = births
                .iter()
                .tuple_combinations()
                .filter_map(|((left_date, left), (right_date, right))| {
                    let gap = days_between(*left_date, *right_date).abs();
                    (gap > MULTIPLE_BIRTH_WINDOW_DAYS && gap < spacing)
                        .then(|| format!("{left} and {right} born {gap} days apart"))
                })
                .collect();

            Ok(RuleResult::check(
                self.id(),
                &family.id,
                close.is_empty(),
                format!("siblings born together or at least {spacing} days apart"),
                close.join("; "),
            ))
        })
    }
}
