/// Shared-secret check guarding the upload endpoint.
///
/// The comparison is plain string equality and is not constant-time.
#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn authorize(&self, supplied: &str) -> bool {
        !self.secret.is_empty() && supplied == self.secret
    }
}
