use crate::enums::UserRole;
use serde::{Deserialize, Serialize};

/// Клеймы JWT, выпущенного внешней системой аутентификации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    #[serde(default)]
    pub username: String,
    pub role: UserRole,
    /// ID сотрудника склада (только для Fulfillment-Staff)
    #[serde(default, rename = "employeeId", alias = "employee_id")]
    pub employee_id: Option<String>,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

impl TokenClaims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
