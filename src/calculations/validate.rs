use crate::error::AppError;

/// Parse `value` as a number greater than zero.
///
/// `name` is used in the error message, e.g. `"Area must be a positive number"`.
pub fn validate_positive_number(value: &str, name: &str) -> Result<f64, AppError> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| AppError::invalid(format!("{name} must be a number (got '{value}')")))?;
    if !number.is_finite() || number <= 0.0 {
        return Err(AppError::invalid(format!("{name} must be a positive number")));
    }
    Ok(number)
}
