use crate::{CoreError, NewUser};

fn valid() -> NewUser {
    NewUser {
        full_name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
        password: "Secr3t!".to_string(),
        avatar_url: None,
        cover_image_url: None,
    }
}

#[test]
fn given_complete_input_when_validated_then_ok() {
    assert!(valid().validate().is_ok());
}

#[test]
fn given_blank_field_when_validated_then_error_names_field() {
    let mut input = valid();
    input.username = "   ".to_string();

    let err = input.validate().unwrap_err();

    assert!(matches!(err, CoreError::Validation { .. }));
    assert_eq!(err.field(), Some("username"));
}

#[test]
fn given_malformed_email_when_validated_then_error() {
    for email in ["alice", "@example.com", "alice@", "a@b@c"] {
        let mut input = valid();
        input.email = email.to_string();

        let err = input.validate().unwrap_err();
        assert_eq!(err.field(), Some("email"), "email {:?} should be rejected", email);
    }
}

#[test]
fn given_username_with_inner_space_when_validated_then_error() {
    let mut input = valid();
    input.username = "alice smith".to_string();

    assert!(input.validate().is_err());
}

#[test]
fn given_username_shaped_like_email_when_validated_then_error_names_username() {
    let mut input = valid();
    input.username = "carol@x.io".to_string();

    let err = input.validate().unwrap_err();

    assert_eq!(err.field(), Some("username"));
}
