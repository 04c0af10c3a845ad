/// Single optional shared secret compared against the `Authorization` header.
///
/// Without a secret every request is let through.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuth {
    secret: Option<String>,
}

const BEARER_PREFIX: &str = "Bearer ";

impl StaticTokenAuth {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret: secret.filter(|s| !s.is_empty()) }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Accepts `Bearer <secret>` or the bare secret; a missing header fails
    /// whenever a secret is configured.
    pub fn authorize(&self, header: Option<&str>) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            return true;
        };
        match header {
            Some(value) if !value.is_empty() => {
                let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
                token == secret
            }
            _ => false,
        }
    }
}
