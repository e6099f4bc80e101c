//! Assertion helpers that fail a case instead of panicking

use std::fmt::Debug;

use crate::error::{SuiteError, SuiteResult};

/// Check that a field has the expected value
pub fn expect_eq<T>(field: &str, expected: T, actual: T) -> SuiteResult<()>
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(SuiteError::assertion(format!(
            "{}: expected {:?}, got {:?}",
            field, expected, actual
        )))
    }
}

/// Check that an optional field is set
pub fn expect_present<'a, T>(field: &str, value: Option<&'a T>) -> SuiteResult<&'a T>
where
    T: ?Sized,
{
    value.ok_or_else(|| SuiteError::assertion(format!("{}: expected a value, got none", field)))
}

/// Check that an optional field is unset
pub fn expect_absent<T: Debug>(field: &str, value: Option<&T>) -> SuiteResult<()> {
    match value {
        None => Ok(()),
        Some(value) => Err(SuiteError::assertion(format!(
            "{}: expected no value, got {:?}",
            field, value
        ))),
    }
}

/// Check an arbitrary condition
pub fn expect_that(condition: bool, message: impl FnOnce() -> String) -> SuiteResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SuiteError::assertion(message()))
    }
}
