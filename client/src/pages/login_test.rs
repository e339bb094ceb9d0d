use super::*;

#[test]
fn validate_login_input_trims_email_only() {
    assert_eq!(
        validate_login_input("  admin@billun.fr ", " p4ss "),
        Ok(("admin@billun.fr".to_owned(), " p4ss ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err(MISSING_FIELDS));
    assert_eq!(validate_login_input("admin@billun.fr", ""), Err(MISSING_FIELDS));
}
