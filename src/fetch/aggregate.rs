use tracing::warn;

use crate::error::{OrgError, OrgResult};

/// Reduce per-task error slots to a single outcome.
///
/// Empty slots are dropped. One failure is forwarded as is; several become
/// one [`OrgError::Aggregate`] that keeps their order.
pub fn aggregate<I>(slots: I) -> OrgResult<()>
where
    I: IntoIterator<Item = Option<OrgError>>,
{
    let mut errors: Vec<OrgError> = slots.into_iter().flatten().collect();

    match errors.len() {
        0 => Ok(()),
        1 => {
            let error = errors.remove(0);
            warn!(error = %error, "fetch failed");
            Err(error)
        }
        n => {
            warn!(failures = n, "multiple fetches failed");
            Err(OrgError::Aggregate(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_no_errors_is_success() {
        assert!(aggregate(vec![None, None, None]).is_ok());
        assert!(aggregate(Vec::new()).is_ok());
    }

    #[test]
    fn test_single_error_is_forwarded_unchanged() {
        let err = aggregate(vec![
            None,
            Some(OrgError::Conflict("Team already exists".to_string())),
            None,
        ])
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "Team already exists");
    }

    #[test]
    fn test_several_errors_keep_order_and_skip_empty_slots() {
        let err = aggregate(vec![
            Some(OrgError::NotFound("Org not found.".to_string())),
            None,
            Some(OrgError::NotFound("User not found.".to_string())),
            Some(OrgError::Consistency("team t9".to_string())),
        ])
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Aggregate);
        assert_eq!(
            err.messages(),
            vec![
                "Org not found.".to_string(),
                "User not found.".to_string(),
                "Inconsistent data from server: team t9".to_string(),
            ]
        );
    }
}
