/// Item fields a filter can test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    /// Case-insensitive substring of the project name
    Project,
    /// Exact tag, ignoring ASCII case
    Tag,
    /// `active`, `done` or `archived`
    Status,
    /// Created on or after a date (YYYY-MM-DD)
    Since,
}

/// Logical operators for combining filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOperator {
    /// Both conditions must match (default between different fields)
    And,
    /// Either condition matches (default within same field)
    Or,
}

/// Single field:value filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: FilterField,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }
}

/// Field filters joined by operators, evaluated left to right
///
/// No parentheses:
/// - Same-field filters are OR'd together: tag:bug tag:ui → (bug OR ui)
/// - Cross-field filters are AND'd together: project:web tag:bug → (web AND bug)
/// - Explicit operators override defaults
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpr {
    pub filters: Vec<FieldFilter>,
    pub operators: Vec<FilterOperator>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: FieldFilter) {
        self.filters.push(filter);
    }

    pub fn add_operator(&mut self, operator: FilterOperator) {
        self.operators.push(operator);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether any filter tests `field`
    pub fn mentions(&self, field: &FilterField) -> bool {
        self.filters.iter().any(|f| &f.field == field)
    }
}
