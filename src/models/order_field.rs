use std::fmt;
use std::str::FromStr;

/// Sortable position columns.
///
/// `orderBy` cannot be a bound SQL parameter, so this closed set is the only
/// thing standing between request input and the `ORDER BY` clause. Never add
/// a variant whose column name is not a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    Volume,
    Results,
    Updated,
    Cpc,
    Url,
    Position,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field '{0}' in order")]
pub struct UnknownOrderField(pub String);

impl OrderField {
    pub const ALL: [OrderField; 7] = [
        OrderField::Volume,
        OrderField::Results,
        OrderField::Updated,
        OrderField::Cpc,
        OrderField::Url,
        OrderField::Position,
        OrderField::Keyword,
    ];

    /// Parse a request value. Empty means the default ordering (volume).
    pub fn parse(s: &str) -> Result<Self, UnknownOrderField> {
        match s {
            "" | "volume" => Ok(OrderField::Volume),
            "results" => Ok(OrderField::Results),
            "updated" => Ok(OrderField::Updated),
            "cpc" => Ok(OrderField::Cpc),
            "url" => Ok(OrderField::Url),
            "position" => Ok(OrderField::Position),
            "keyword" => Ok(OrderField::Keyword),
            other => Err(UnknownOrderField(other.to_string())),
        }
    }

    /// Column name as it appears in the `positions` table.
    pub fn column(self) -> &'static str {
        match self {
            OrderField::Volume => "volume",
            OrderField::Results => "results",
            OrderField::Updated => "updated",
            OrderField::Cpc => "cpc",
            OrderField::Url => "url",
            OrderField::Position => "position",
            OrderField::Keyword => "keyword",
        }
    }
}

impl FromStr for OrderField {
    type Err = UnknownOrderField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderField::parse(s)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
