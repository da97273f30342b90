//! Command line value parsers for sort and filter options

use tabula_core::{FilterConfig, SortDirection};

/// `--sort COL[:asc|:desc]`
#[derive(Debug, Clone, PartialEq)]
pub struct SortArg {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortArg {
    /// Header clicks needed to reach this direction from unsorted
    pub fn clicks(&self) -> usize {
        match self.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => 2,
        }
    }
}

pub fn parse_sort(input: &str) -> Result<SortArg, String> {
    let (column, direction) = match input.rsplit_once(':') {
        Some((column, "asc")) => (column, SortDirection::Ascending),
        Some((column, "desc")) => (column, SortDirection::Descending),
        Some((_, other)) => return Err(format!("unknown sort direction '{other}', use asc or desc")),
        None => (input, SortDirection::Ascending),
    };
    Ok(SortArg {
        column_id: column_name(column)?,
        direction,
    })
}

/// `--text COL=VALUE`
pub fn parse_text(input: &str) -> Result<FilterConfig, String> {
    let (column, value) = split_assignment(input)?;
    let value = value.trim();
    if value.is_empty() {
        return Err("text filter value must not be blank".to_string());
    }
    Ok(FilterConfig::text(column, value))
}

/// `--range COL=MIN..MAX`, either bound may be omitted
pub fn parse_range(input: &str) -> Result<FilterConfig, String> {
    let (column, bounds) = split_assignment(input)?;
    let (min, max) = bounds
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX, got '{bounds}'"))?;

    let min = parse_bound(min)?;
    let max = parse_bound(max)?;
    if min.is_none() && max.is_none() {
        return Err("range filter needs at least one bound".to_string());
    }
    Ok(FilterConfig::range(column, min, max))
}

/// `--select COL=A,B,C`
pub fn parse_select(input: &str) -> Result<FilterConfig, String> {
    let (column, values) = split_assignment(input)?;
    let values: Vec<&str> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        return Err("select filter needs at least one value".to_string());
    }
    Ok(FilterConfig::select(column, values))
}

fn split_assignment(input: &str) -> Result<(String, &str), String> {
    let (column, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{input}'"))?;
    Ok((column_name(column)?, value))
}

fn column_name(column: &str) -> Result<String, String> {
    let column = column.trim();
    if column.is_empty() {
        return Err("column id must not be blank".to_string());
    }
    Ok(column.to_string())
}

fn parse_bound(input: &str) -> Result<Option<f64>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(format!("'{input}' is not a number")),
    }
}
