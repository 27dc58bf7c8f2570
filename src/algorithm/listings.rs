//! Record listings
//!
//! Read-only views over a record set used alongside the validation report.
//! Records whose dates do not parse are left out of date-based listings with
//! a warning.

use crate::algorithm::relationships::RelationshipIndex;
use crate::algorithm::rules::cardinality::{BirthEvent, birth_events};
use crate::collections::RecordSet;
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::models::Individual;
use crate::utils::date_utils::age;
use crate::utils::logging::log_warning;
use chrono::NaiveDate;
use itertools::Itertools;

/// Log and drop a data error
fn skip_on_error<T>(value: Result<T>) -> Option<T> {
    value
        .map_err(|err| log_warning("Skipping record in listing", Some(err.to_string().as_str())))
        .ok()
}

/// Age of every individual with a birth date
///
/// Age at death for the deceased, at `as_of` for everyone else. Individuals
/// born after the end date are left out.
#[must_use]
pub fn individual_ages(records: &RecordSet, as_of: NaiveDate) -> Vec<(&str, u32)> {
    records
        .individuals()
        .iter()
        .filter_map(|person| {
            let birth = skip_on_error(person.birth_date())??;
            let end = skip_on_error(person.death_date())?.unwrap_or(as_of);
            age(birth, end).map(|years| (person.id.as_str(), years))
        })
        .collect()
}

/// Children of a family, oldest first
///
/// Children without a usable birth date follow the dated ones in listed
/// order. Unresolved child ids are skipped.
#[must_use]
pub fn siblings_by_age<'a>(records: &'a RecordSet, family_id: &str) -> Vec<&'a Individual> {
    let Some(family) = records.family(family_id) else {
        return Vec::new();
    };

    family
        .children
        .iter()
        .filter_map(|id| records.individual(id))
        .unique_by(|child| child.id.as_str())
        .enumerate()
        .sorted_by_key(|(position, child)| {
            let birth = child.birth_date().ok().flatten();
            (birth.is_none(), birth, *position)
        })
        .map(|(_, child)| child)
        .collect()
}

/// Individuals with a recorded death
#[must_use]
pub fn deceased(records: &RecordSet) -> Vec<&Individual> {
    records
        .individuals()
        .iter()
        .filter(|person| !person.is_alive())
        .collect()
}

/// Living individuals in an undivorced marriage to a living partner
#[must_use]
pub fn living_married(records: &RecordSet) -> Vec<&Individual> {
    records
        .families()
        .iter()
        .filter(|family| family.divorce.is_none())
        .filter_map(|family| {
            let husband = records.individual(family.husband_id.as_deref()?)?;
            let wife = records.individual(family.wife_id.as_deref()?)?;
            (husband.is_alive() && wife.is_alive()).then_some([husband, wife])
        })
        .flatten()
        .unique_by(|person| person.id.as_str())
        .sorted_by(|a, b| a.id.cmp(&b.id))
        .collect()
}

/// Living individuals older than the configured single age who never married
///
/// Ages are taken at the configured processing date.
#[must_use]
pub fn living_single<'a>(records: &'a RecordSet, config: &ValidatorConfig) -> Vec<&'a Individual> {
    let index = RelationshipIndex::new(records);
    records
        .individuals()
        .iter()
        .filter(|person| person.is_alive())
        .filter(|person| index.spouse_families_of(&person.id).is_empty())
        .filter(|person| {
            skip_on_error(person.birth_date())
                .flatten()
                .and_then(|birth| age(birth, config.as_of))
                .is_some_and(|years| years > config.single_over_age)
        })
        .collect()
}

/// Birth events shared by more than one child, per family id
#[must_use]
pub fn multiple_births(records: &RecordSet) -> Vec<(&str, BirthEvent<'_>)> {
    records
        .families()
        .iter()
        .flat_map(|family| {
            let births = family
                .children
                .iter()
                .filter_map(|id| records.individual(id))
                .filter_map(|child| {
                    let birth = skip_on_error(child.birth_date())??;
                    Some((birth, child.id.as_str()))
                });
            birth_events(births)
                .into_iter()
                .filter(BirthEvent::is_multiple)
                .map(move |event| (family.id.as_str(), event))
        })
        .collect()
}
