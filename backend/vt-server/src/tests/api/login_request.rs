use crate::LoginRequest;

fn request(identifier: Option<&str>, username: Option<&str>, email: Option<&str>) -> LoginRequest {
    LoginRequest {
        identifier: identifier.map(str::to_string),
        username: username.map(str::to_string),
        email: email.map(str::to_string),
        password: "Secr3t!".to_string(),
    }
}

#[test]
fn test_identifier_takes_precedence() {
    let req = request(Some("alice"), Some("bob"), Some("carol@example.com"));
    assert_eq!(req.identifier(), "alice");
}

#[test]
fn test_blank_identifier_falls_back_to_username_then_email() {
    assert_eq!(request(Some("  "), Some("bob"), None).identifier(), "bob");
    assert_eq!(
        request(None, None, Some("carol@example.com")).identifier(),
        "carol@example.com"
    );
}

#[test]
fn test_no_identifier_yields_empty() {
    assert_eq!(request(None, None, None).identifier(), "");
}

#[test]
fn test_debug_never_prints_password() {
    let rendered = format!("{:?}", request(Some("alice"), None, None));
    assert!(rendered.contains("alice"));
    assert!(!rendered.contains("Secr3t!"));
}
