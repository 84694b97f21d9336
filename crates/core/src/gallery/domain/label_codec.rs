//! Gallery filename convention: `<label>-<anything>.<ext>` where `<label>`
//! is an unsigned integer string.
//!
//! The convention is the gallery directory's wire contract. It is isolated
//! here so a manifest-based scheme could replace it without touching the
//! rest of the pipeline.

use thiserror::Error;

use crate::gallery::domain::training_set::Label;

#[derive(Error, Debug)]
pub enum LabelFormatError {
    #[error("no '-' separator in gallery filename '{filename}'")]
    MissingSeparator { filename: String },
    #[error("non-numeric label prefix '{prefix}' in gallery filename '{filename}'")]
    NonNumericPrefix { filename: String, prefix: String },
}

/// Decode the integer label encoded before the first `-` of a gallery
/// filename. A malformed name is a hard rejection of that file; whether it
/// aborts the run is the caller's policy.
pub fn decode(filename: &str) -> Result<Label, LabelFormatError> {
    let (prefix, _) = filename
        .split_once('-')
        .ok_or_else(|| LabelFormatError::MissingSeparator {
            filename: filename.to_string(),
        })?;
    prefix
        .parse::<Label>()
        .map_err(|_| LabelFormatError::NonNumericPrefix {
            filename: filename.to_string(),
            prefix: prefix.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1-jon_doe_1.png", 1)]
    #[case("2-jane_doe_2.jpg", 2)]
    #[case("42-x.pgm", 42)]
    #[case("0-zero.png", 0)]
    #[case("7-multi-dash-name.png", 7)]
    fn test_decode_valid(#[case] filename: &str, #[case] expected: Label) {
        assert_eq!(decode(filename).unwrap(), expected);
    }

    #[rstest]
    #[case("noseparator.png")]
    #[case("1.png")]
    fn test_decode_missing_separator(#[case] filename: &str) {
        assert!(matches!(
            decode(filename),
            Err(LabelFormatError::MissingSeparator { .. })
        ));
    }

    #[rstest]
    #[case("abc-x.png")]
    #[case("-x.png")]
    #[case("1a-x.png")]
    #[case("-1-x.png")]
    fn test_decode_non_numeric_prefix(#[case] filename: &str) {
        assert!(matches!(
            decode(filename),
            Err(LabelFormatError::NonNumericPrefix { .. })
        ));
    }

    #[test]
    fn test_error_carries_filename() {
        let err = decode("bad.png").unwrap_err();
        assert!(err.to_string().contains("bad.png"));
    }
}
