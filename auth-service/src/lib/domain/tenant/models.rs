use std::fmt;

use crate::domain::tenant::errors::TenantIdError;

/// A consumer application of the authentication service.
///
/// Tokens issued for a tenant are signed with its `secret`, which is redacted
/// from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub secret: Vec<u8>,
}

impl Tenant {
    /// A tenant without a secret can neither sign nor verify tokens.
    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

impl fmt::Debug for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tenant")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Tenant unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(i32);

impl TenantId {
    /// # Errors
    /// * `NotPositive` - Zero or negative identifier
    pub fn new(id: i32) -> Result<Self, TenantIdError> {
        if id <= 0 {
            return Err(TenantIdError::NotPositive(id));
        }
        Ok(Self(id))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_validation() {
        assert_eq!(TenantId::new(1).map(|id| id.value()), Ok(1));
        assert_eq!(TenantId::new(0), Err(TenantIdError::NotPositive(0)));
        assert_eq!(TenantId::new(-4), Err(TenantIdError::NotPositive(-4)));
    }

    #[test]
    fn test_tenant_debug_redacts_secret() {
        let tenant = Tenant {
            id: TenantId::new(1).unwrap(),
            name: "billing".to_string(),
            secret: b"very-secret".to_vec(),
        };
        assert!(!format!("{tenant:?}").contains("very-secret"));
        assert!(tenant.has_secret());
    }
}
