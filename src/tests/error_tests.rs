use crate::error::{ErrorContext, ErrorKind, OrgError};
use crate::org_error;

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found",
    ));

    let org_result = result.context("Failed to read config file");
    match org_result {
        Err(OrgError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read config file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected OrgError::Unknown"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    match option.context("API key not found") {
        Err(OrgError::Unknown(msg)) => assert_eq!(msg, "API key not found"),
        _ => panic!("Expected OrgError::Unknown"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied",
    ));

    let org_result =
        result.with_context(|| format!("Failed to access file at path: {}", "/tmp/test.txt"));
    match org_result {
        Err(OrgError::Unknown(msg)) => {
            assert!(msg.contains("/tmp/test.txt"));
            assert!(msg.contains("access denied"));
        }
        _ => panic!("Expected OrgError::Unknown"),
    }
}

#[test]
fn test_error_macro() {
    let error = org_error!(NotFound, "Team not found.");
    assert_eq!(error.to_string(), "Team not found.");

    let error = org_error!(InvalidInput, "bad name: {}", "a b");
    assert_eq!(error.to_string(), "Invalid input: bad name: a b");
}

#[test]
fn test_error_kinds() {
    assert_eq!(OrgError::NotFound("x".into()).kind(), ErrorKind::NotFound);
    assert_eq!(OrgError::Conflict("x".into()).kind(), ErrorKind::Conflict);
    assert_eq!(
        OrgError::PermissionDenied("x".into()).kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(OrgError::Consistency("x".into()).kind(), ErrorKind::Consistency);
    assert_eq!(OrgError::Aggregate(vec![]).kind(), ErrorKind::Aggregate);
    assert_eq!(OrgError::Aborted.kind(), ErrorKind::Other);
    assert!(OrgError::NotFound("x".into()).is_not_found());
    assert!(!OrgError::ApiError("x".into()).is_not_found());
}

#[test]
fn test_aggregate_messages_are_flattened_in_order() {
    let error = OrgError::Aggregate(vec![
        OrgError::NotFound("Org not found.".into()),
        OrgError::Aggregate(vec![OrgError::NotFound("User not found.".into())]),
        OrgError::NotFound("Team not found.".into()),
    ]);

    assert_eq!(
        error.messages(),
        vec!["Org not found.", "User not found.", "Team not found."]
    );
}

#[test]
fn test_aggregate_display_lists_every_error() {
    let error = OrgError::Aggregate(vec![
        OrgError::ApiError("teams down".into()),
        OrgError::ApiError("session down".into()),
    ]);
    let text = error.to_string();
    assert!(text.starts_with("2 errors occurred"));
    assert!(text.contains("teams down"));
    assert!(text.contains("session down"));
}
