use chrono::NaiveDate;

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};
use crate::models::ContextItem;

/// Keep the items matching `filter`, preserving store order
///
/// Operators are applied left to right without precedence, so
/// `status:done OR tag:x project:web` reads as `(done OR x) AND web`.
pub fn apply_filters(items: Vec<ContextItem>, filter: &FilterExpr) -> Vec<ContextItem> {
    if filter.is_empty() {
        return items;
    }

    items.into_iter().filter(|item| evaluate_filter(item, filter)).collect()
}

/// Evaluate a whole expression against one item
pub fn evaluate_filter(item: &ContextItem, filter: &FilterExpr) -> bool {
    let Some((first, rest)) = filter.filters.split_first() else {
        return true;
    };

    filter.operators.iter().zip(rest).fold(evaluate_field_filter(item, first), |acc, (operator, next)| {
        match operator {
            FilterOperator::And => acc && evaluate_field_filter(item, next),
            FilterOperator::Or => acc || evaluate_field_filter(item, next),
        }
    })
}

fn evaluate_field_filter(item: &ContextItem, filter: &FieldFilter) -> bool {
    match filter.field {
        FilterField::Project => match_project(item, &filter.value),
        FilterField::Tag => item.has_tag(&filter.value),
        FilterField::Status => match_status(item, &filter.value),
        FilterField::Since => match_since(item, &filter.value),
    }
}

fn match_project(item: &ContextItem, value: &str) -> bool {
    !item.project.is_empty() && item.project.to_lowercase().contains(&value.to_lowercase())
}

fn match_status(item: &ContextItem, value: &str) -> bool {
    match value.to_lowercase().as_str() {
        "active" => !item.is_completed() && !item.is_archived(),
        "done" => item.is_completed(),
        "archived" => item.is_archived(),
        _ => false,
    }
}

/// Created at or after midnight UTC of the given day
fn match_since(item: &ContextItem, value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .is_some_and(|start| item.created_at >= start.and_utc())
}
