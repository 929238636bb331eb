use crate::{NewUser, PublicUser, User, UserChanges};

fn new_user() -> NewUser {
    NewUser {
        full_name: "  Alice Liddell ".to_string(),
        email: " Alice@Example.COM".to_string(),
        username: "Alice ".to_string(),
        password: "Secr3t!".to_string(),
        avatar_url: Some("https://media.example.com/a.png".to_string()),
        cover_image_url: None,
    }
}

#[test]
fn given_mixed_case_input_when_user_created_then_identifiers_are_lowercased() {
    let user = User::new(new_user(), "$argon2id$hash".to_string());

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.full_name, "Alice Liddell");
    assert!(!user.has_active_session());
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn given_new_user_when_created_then_timestamps_have_no_subsecond_part() {
    let user = User::new(new_user(), "$argon2id$hash".to_string());

    assert_eq!(user.created_at.timestamp_subsec_nanos(), 0);
    assert_eq!(user.updated_at.timestamp_subsec_nanos(), 0);
}

#[test]
fn given_user_when_converted_to_public_then_secret_fields_are_absent() {
    let mut user = User::new(new_user(), "$argon2id$hash".to_string());
    user.refresh_token = Some("refresh".to_string());

    let public = PublicUser::from(&user);
    let json = serde_json::to_value(&public).unwrap();

    assert_eq!(public.id, user.id);
    assert!(json.get("password_hash").is_none());
    assert!(json.get("refresh_token").is_none());
}

#[test]
fn given_user_with_session_when_debug_formatted_then_secrets_are_redacted() {
    let mut user = User::new(new_user(), "$argon2id$supersecret".to_string());
    user.refresh_token = Some("eyJ.refresh.token".to_string());

    let debug = format!("{:?}", user);

    assert!(!debug.contains("supersecret"));
    assert!(!debug.contains("eyJ.refresh.token"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_user_changes_secret_detection() {
    assert!(UserChanges::default().is_empty());

    let rename = UserChanges {
        full_name: Some("Bob".to_string()),
        ..Default::default()
    };
    assert!(!rename.is_empty());
    assert!(!rename.changes_secret());

    let rekey = UserChanges {
        password_hash: Some("$argon2id$new".to_string()),
        ..Default::default()
    };
    assert!(rekey.changes_secret());
}
