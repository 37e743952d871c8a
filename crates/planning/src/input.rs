//! Parsing of numeric text typed into the planning grids.

use vulcplan_core::{DomainError, DomainResult};

/// Parse a non-negative quantity (cell value, odd/even demand).
pub fn parse_quantity(text: &str) -> DomainResult<i64> {
    let trimmed = text.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| DomainError::validation(format!("'{trimmed}' is not a number")))?;
    if value < 0 {
        return Err(DomainError::validation(format!(
            "quantity cannot be negative (got {value})"
        )));
    }
    Ok(value)
}

/// Parse a non-negative count (cycles, minimum cycles required).
pub fn parse_count(text: &str) -> DomainResult<u32> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| DomainError::validation(format!("'{trimmed}' is not a non-negative whole number")))
}
