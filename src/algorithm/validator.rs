//! Validation run orchestration
//!
//! The Validator applies every rule of its catalog to a record set and merges
//! the results into one ordered report. Rules are independent, so a parallel
//! run produces exactly the report a sequential run would.

use crate::algorithm::relationships::RelationshipIndex;
use crate::algorithm::rules::{Rule, RuleContext, catalog};
use crate::collections::RecordSet;
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::report::{Outcome, Report, RuleResult};
use crate::utils::logging::{create_rule_progress_bar, log_operation_complete, log_operation_start, log_warning};
use indicatif::ProgressBar;
use log::{debug, info};
use rayon::ThreadPool;
use rayon::prelude::*;
use std::time::Instant;

/// Runs a rule catalog over record sets
pub struct Validator {
    config: ValidatorConfig,
    rules: Vec<Box<dyn Rule>>,
    /// Dedicated worker pool, present only for parallel runs
    pool: Option<ThreadPool>,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field("rules", &self.rules.iter().map(|rule| rule.id()).collect::<Vec<_>>())
            .field("parallel", &self.pool.is_some())
            .finish()
    }
}

impl Validator {
    /// Create a validator running the full rule catalog
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        Self::with_rules(config, catalog())
    }

    /// Create a validator running the given rules
    pub fn with_rules(config: ValidatorConfig, rules: Vec<Box<dyn Rule>>) -> Result<Self> {
        config.validate()?;

        let pool = if config.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.worker_threads)
                .thread_name(|i| format!("kin-rules-{i}"))
                .build()?;
            Some(pool)
        } else {
            None
        };

        debug!("Created validator with {} rules\n{config}", rules.len());
        Ok(Self { config, rules, pool })
    }

    /// Configuration of this validator
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Rules this validator runs, in catalog order
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Apply every rule to the record set and collect a report
    ///
    /// Never stops at the first failure. Data errors inside a rule surface as
    /// inconclusive results rather than errors.
    pub fn run(&self, records: &RecordSet) -> Result<Report> {
        let start_time = Instant::now();
        log_operation_start(
            "Validating",
            &format!(
                "{} individuals and {} families as of {}",
                records.individual_count(),
                records.family_count(),
                self.config.as_of
            ),
        );

        let index = RelationshipIndex::new(records);
        let ctx = RuleContext::new(records, &index, &self.config);
        let pb = create_rule_progress_bar(self.rules.len(), self.config.show_progress);

        let results: Vec<RuleResult> = match &self.pool {
            Some(pool) => {
                info!("Using parallel validation with {} threads", pool.current_num_threads());
                pool.install(|| {
                    self.rules
                        .par_iter()
                        .flat_map_iter(|rule| Self::evaluate_rule(rule.as_ref(), &ctx, &pb))
                        .collect()
                })
            }
            None => self
                .rules
                .iter()
                .flat_map(|rule| Self::evaluate_rule(rule.as_ref(), &ctx, &pb))
                .collect(),
        };

        pb.finish_and_clear();

        let report = Report::new(self.config.as_of, results);
        let inconclusive = report.with_outcome(Outcome::Inconclusive).count();
        if inconclusive > 0 {
            log_warning(
                &format!("{inconclusive} checks could not be evaluated because of data errors"),
                None,
            );
        }
        info!(
            "{} of {} checks failed",
            report.with_outcome(Outcome::Failed).count(),
            report.total()
        );
        log_operation_complete("produced", report.total(), Some(start_time.elapsed()));

        Ok(report)
    }

    fn evaluate_rule(rule: &dyn Rule, ctx: &RuleContext<'_>, pb: &ProgressBar) -> Vec<RuleResult> {
        let results = rule.evaluate(ctx);
        debug!("Rule {} produced {} results", rule.id(), results.len());
        pb.inc(1);
        results
    }
}
