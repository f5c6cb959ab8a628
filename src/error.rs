//! Error types for maskly operations.
//!
//! Kernels trust their numeric inputs, but shape violations (short output
//! buffers, mismatched operand lengths, a sum over a partial chunk) are
//! reported through [`MasklyError`] by the `try_*` entry points.

use thiserror::Error;

/// Errors that can occur when calling a vector kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MasklyError {
    /// The output slice cannot hold one result per input element.
    #[error("Output too short: need {required} elements, got {actual}")]
    OutputTooShort {
        /// Number of input elements.
        required: usize,
        /// Length of the output slice.
        actual: usize,
    },
    /// A parallel operand slice is shorter than the primary input.
    #[error("Length mismatch: expected at least {expected} elements, got {actual}")]
    LengthMismatch {
        /// Number of elements in the primary input.
        expected: usize,
        /// Length of the offending operand.
        actual: usize,
    },
    /// The sum kernel only accepts lengths that are a multiple of the width.
    #[error("Length {len} is not a multiple of the vector width {width}")]
    NotMultipleOfWidth {
        /// Input length.
        len: usize,
        /// Vector width of the unit.
        width: usize,
    },
}

/// Result type alias for maskly operations.
pub type Result<T> = std::result::Result<T, MasklyError>;

/// Checks that `output` can receive `required` results.
pub fn check_output(required: usize, output: &[f32]) -> Result<()> {
    if output.len() < required {
        return Err(MasklyError::OutputTooShort {
            required,
            actual: output.len(),
        });
    }
    Ok(())
}

/// Checks that an operand slice covers every input index.
pub fn check_operand<T>(expected: usize, operand: &[T]) -> Result<()> {
    if operand.len() < expected {
        return Err(MasklyError::LengthMismatch {
            expected,
            actual: operand.len(),
        });
    }
    Ok(())
}

/// Checks the sum kernel precondition.
pub fn check_multiple_of_width(len: usize, width: usize) -> Result<()> {
    if len % width != 0 {
        return Err(MasklyError::NotMultipleOfWidth { len, width });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_too_short_display() {
        let error = check_output(8, &[0.0; 5]).unwrap_err();
        let display = format!("{}", error);
        assert!(display.contains("Output too short"));
        assert!(display.contains("need 8"));
        assert!(display.contains("got 5"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let error = check_operand(4, &[1i32, 2]).unwrap_err();
        let display = format!("{}", error);
        assert!(display.contains("Length mismatch"));
        assert!(display.contains("at least 4"));
        assert!(display.contains("got 2"));
    }

    #[test]
    fn test_not_multiple_of_width_display() {
        let error = check_multiple_of_width(10, 4).unwrap_err();
        let display = format!("{}", error);
        assert!(display.contains("Length 10"));
        assert!(display.contains("vector width 4"));
    }

    #[test]
    fn test_checks_accept_valid_shapes() {
        assert!(check_output(3, &[0.0; 3]).is_ok());
        assert!(check_output(0, &[]).is_ok());
        assert!(check_operand(2, &[1i32, 2, 3]).is_ok());
        assert!(check_multiple_of_width(0, 4).is_ok());
        assert!(check_multiple_of_width(12, 4).is_ok());
    }

    #[test]
    fn test_error_equality() {
        let error1 = MasklyError::NotMultipleOfWidth { len: 3, width: 4 };
        let error2 = MasklyError::NotMultipleOfWidth { len: 3, width: 4 };
        let error3 = MasklyError::NotMultipleOfWidth { len: 5, width: 4 };

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = MasklyError::OutputTooShort {
            required: 1,
            actual: 0,
        };

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
