use bedrock_model::{Channel, TrackerError};

/// Require both platform links of a channel to carry the same raw version.
///
/// The comparison runs on the raw strings before normalization, so `1.2.3.0`
/// and `1.2.3` are reported as a mismatch.
///
/// # Errors
/// Returns [`TrackerError::VersionMismatch`] when the strings differ.
pub fn check_consistency(channel: Channel, windows: &str, linux: &str) -> Result<(), TrackerError> {
    if windows == linux {
        return Ok(());
    }

    Err(TrackerError::VersionMismatch {
        channel,
        windows: windows.to_string(),
        linux: linux.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_versions_pass() {
        assert!(check_consistency(Channel::Regular, "1.21.50.3", "1.21.50.3").is_ok());
    }

    #[test]
    fn differing_versions_fail() {
        let err = check_consistency(Channel::Regular, "1.21.0", "1.21.1").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::VersionMismatch { channel: Channel::Regular, ref windows, ref linux }
            if windows == "1.21.0" && linux == "1.21.1"
        ));
    }

    #[test]
    fn mismatch_is_detected_before_normalization() {
        let err = check_consistency(Channel::Preview, "1.2.3.0", "1.2.3").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::VersionMismatch {
                channel: Channel::Preview,
                ..
            }
        ));
    }
}
