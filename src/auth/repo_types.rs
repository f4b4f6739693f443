use time::OffsetDateTime;

/// Registered user. Only ever constructed by a `UserStore`.
#[derive(Clone)]
pub struct User {
    pub id: u64,                    // time-derived, unique per process
    pub name: String,               // display name
    pub email: String,              // exact-match login key
    pub password_hash: String,      // Argon2 PHC string, never exposed
    pub created_at: OffsetDateTime, // insertion timestamp
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields supplied by signup; the store assigns id and timestamp.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
