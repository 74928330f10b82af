use crate::error::CoreError;
use crate::structs::FinancialEntry;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The closed set of fields an entry listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Type,
    Amount,
    Date,
    Category,
    CreatedAt,
    Id,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Type,
        SortField::Amount,
        SortField::Date,
        SortField::Category,
        SortField::CreatedAt,
        SortField::Id,
    ];

    /// The request-facing name, which is also the storage column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Type => "type",
            SortField::Amount => "amount",
            SortField::Date => "date",
            SortField::Category => "category",
            SortField::CreatedAt => "created_at",
            SortField::Id => "id",
        }
    }

    /// The SQL ordering expression for this field. Text columns sort by byte
    /// order (`COLLATE "C"`) so the database agrees with [`SortField::compare`].
    pub fn sql_expr(&self) -> &'static str {
        match self {
            SortField::Category => r#"category COLLATE "C""#,
            other => other.as_str(),
        }
    }

    /// Ascending comparison of two entries on this field alone.
    pub fn compare(&self, a: &FinancialEntry, b: &FinancialEntry) -> Ordering {
        match self {
            SortField::Type => a.kind.as_str().cmp(b.kind.as_str()),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Category => a.category.cmp(&b.category),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Id => a.id.cmp(&b.id),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::InvalidSortField(s.to_string()))
    }
}

/// A validated, ordered list of sort keys. The first key is the primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortDirective {
    fields: Vec<SortField>,
}

impl SortDirective {
    /// Resolves caller-supplied names against the whitelist.
    ///
    /// The first unknown name fails the whole request. A repeated field is
    /// dropped after its first occurrence, since it can no longer change the order.
    pub fn resolve<S: AsRef<str>>(requested: &[S]) -> Result<Self, CoreError> {
        let mut fields = Vec::with_capacity(requested.len());
        for name in requested {
            let field: SortField = name.as_ref().parse()?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn compare(&self, a: &FinancialEntry, b: &FinancialEntry) -> Ordering {
        self.fields
            .iter()
            .map(|field| field.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable sort; an empty directive leaves the input order untouched.
    pub fn apply(&self, entries: &mut [FinancialEntry]) {
        if self.is_empty() {
            return;
        }
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Renders ` ORDER BY a, b` from the fixed column expressions, or an empty
    /// string when no ordering was requested.
    pub fn order_by_clause(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let columns: Vec<&str> = self.fields.iter().map(SortField::sql_expr).collect();
        format!(" ORDER BY {}", columns.join(", "))
    }
}
