use serde::{Deserialize, Serialize};

/// Роли пользователей дашборда, участвующие в исполнении заказов
///
/// Роль приходит из внешней аутентификации строкой ("Fulfillment-Staff" и т.п.).
/// Нераспознанные роли получают режим только для чтения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    FulfillmentAdmin,
    FulfillmentStaff,
    ReadOnly,
}

/// Набор правил статусов, которым пользуется экран
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewRole {
    Admin,
    Staff,
}

impl UserRole {
    /// Получить код роли
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super-admin",
            UserRole::Admin => "Admin",
            UserRole::FulfillmentAdmin => "Fulfillment-Admin",
            UserRole::FulfillmentStaff => "Fulfillment-Staff",
            UserRole::ReadOnly => "Read-only",
        }
    }

    /// Парсинг из строки (регистр не учитывается)
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "super-admin" | "superadmin" => UserRole::SuperAdmin,
            "admin" => UserRole::Admin,
            "fulfillment-admin" => UserRole::FulfillmentAdmin,
            "fulfillment-staff" => UserRole::FulfillmentStaff,
            _ => UserRole::ReadOnly,
        }
    }

    pub fn view_role(&self) -> ViewRole {
        match self {
            UserRole::FulfillmentStaff => ViewRole::Staff,
            _ => ViewRole::Admin,
        }
    }

    /// Роли, которым доступны действия администратора
    pub fn is_fulfillment_admin(&self) -> bool {
        matches!(
            self,
            UserRole::SuperAdmin | UserRole::Admin | UserRole::FulfillmentAdmin
        )
    }

    pub fn is_fulfillment_staff(&self) -> bool {
        matches!(self, UserRole::FulfillmentStaff)
    }

    /// Упаковка в обход предусловий на стороне сервиса (`forcePacking`)
    pub fn forces_packing(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::FulfillmentAdmin)
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        UserRole::from_code(&value)
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        value.code().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
