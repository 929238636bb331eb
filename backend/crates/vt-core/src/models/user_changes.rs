/// Changes applied to a stored identity in a single update.
///
/// A secret change is explicit: `password_hash` is `Some` only when the caller
/// supplied a new password, so an update that leaves the password alone never
/// rehashes. When it is `Some` the store also clears the refresh token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }

    pub fn changes_secret(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl std::fmt::Debug for UserChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserChanges")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
