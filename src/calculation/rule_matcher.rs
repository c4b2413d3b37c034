//! Special rule matching.
//!
//! This module selects the special rules that apply to one employee on one
//! date and orders them by priority, highest first.

use chrono::NaiveDate;
use tracing::trace;

use crate::config::{EngineConfig, day_index};
use crate::models::{Employee, ScopeType, SpecialRule};

use super::effect_resolver::{RuleEffect, parse_effect};

/// The (employee, date) a set of rules is matched against.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The employee being evaluated.
    pub employee: &'a Employee,
    /// The calendar date being evaluated.
    pub date: NaiveDate,
    /// Day of the week, 0 = Sunday.
    pub day_of_week: u8,
}

impl<'a> RuleContext<'a> {
    /// Creates a context, deriving the day of the week from `date`.
    pub fn new(employee: &'a Employee, date: NaiveDate) -> Self {
        Self {
            employee,
            date,
            day_of_week: day_index(date),
        }
    }
}

/// A matched rule together with its parsed effect.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedRule<'a> {
    /// The matched rule.
    pub rule: &'a SpecialRule,
    /// The rule's effect.
    pub effect: RuleEffect,
}

/// Returns the rules applying to `ctx`, highest priority first.
///
/// A rule applies when it is enabled, its scope covers the employee, the
/// date lies inside its inclusive date range, and its day-of-week filter is
/// empty or contains the context's day. Rules with equal priority keep their
/// input order.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{RuleContext, get_applicable_rules};
/// use attendance_engine::config::EngineConfig;
/// use attendance_engine::models::{CustomShiftParams, Employee, RuleKind, SpecialRule};
/// use chrono::NaiveDate;
///
/// let employee = Employee::new("EMP001", "Ahmed");
/// let day = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
/// let rules = vec![
///     SpecialRule::new("low", "Low", day, day, RuleKind::CustomShift(CustomShiftParams::default())),
///     SpecialRule::new("high", "High", day, day, RuleKind::CustomShift(CustomShiftParams::default()))
///         .with_priority(10),
/// ];
///
/// let applied = get_applicable_rules(&rules, &RuleContext::new(&employee, day), &EngineConfig::default());
/// assert_eq!(applied[0].rule.id, "high");
/// assert_eq!(applied[1].rule.id, "low");
/// ```
pub fn get_applicable_rules<'a>(
    rules: &'a [SpecialRule],
    ctx: &RuleContext<'_>,
    config: &EngineConfig,
) -> Vec<AppliedRule<'a>> {
    let mut applicable: Vec<AppliedRule<'a>> = rules
        .iter()
        .filter(|rule| rule_applies(rule, ctx))
        .map(|rule| AppliedRule {
            rule,
            effect: parse_effect(rule, config),
        })
        .collect();

    // sort_by is stable
    applicable.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));
    applicable
}

fn rule_applies(rule: &SpecialRule, ctx: &RuleContext<'_>) -> bool {
    let excluded_by = if !rule.enabled {
        Some("disabled")
    } else if !matches_scope(rule, ctx.employee) {
        Some("scope")
    } else if !matches_date_range(rule, ctx.date) {
        Some("date range")
    } else if !matches_day_of_week(rule, ctx.day_of_week) {
        Some("day of week")
    } else {
        None
    };

    if let Some(reason) = excluded_by {
        trace!(
            rule_id = %rule.id,
            employee_code = %ctx.employee.code,
            date = %ctx.date,
            reason,
            "rule excluded"
        );
        return false;
    }
    true
}

fn matches_scope(rule: &SpecialRule, employee: &Employee) -> bool {
    let listed = |value: &str| rule.scope_values.iter().any(|v| v == value);

    match rule.scope_type {
        ScopeType::All => true,
        ScopeType::Employee => listed(&employee.code),
        ScopeType::Department => employee.department().is_some_and(listed),
        ScopeType::Branch => employee.branch().is_some_and(listed),
    }
}

fn matches_date_range(rule: &SpecialRule, date: NaiveDate) -> bool {
    match (rule.date_from, rule.date_to) {
        (Some(from), Some(to)) => from <= date && date <= to,
        _ => false,
    }
}

fn matches_day_of_week(rule: &SpecialRule, day_of_week: u8) -> bool {
    rule.days_of_week.is_empty() || rule.days_of_week.contains(&day_of_week)
}
