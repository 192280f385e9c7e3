use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Employee,
    Admin,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Admin => "ADMIN",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "EMPLOYEE" => Some(Role::Employee),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(&code.trim().to_uppercase())
    }

    /// Roles are stored as a comma separated list, e.g. `EMPLOYEE,ADMIN`.
    pub fn join(roles: &[Role]) -> String {
        roles
            .iter()
            .map(Role::to_db_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn split(s: &str) -> Option<Vec<Role>> {
        s.split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(Role::from_db_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_db_column() {
        let roles = vec![Role::Employee, Role::Admin];
        let stored = Role::join(&roles);
        assert_eq!(stored, "EMPLOYEE,ADMIN");
        assert_eq!(Role::split(&stored), Some(roles));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(Role::from_code("manager"), None);
        assert_eq!(Role::split("EMPLOYEE,BOSS"), None);
        assert_eq!(Role::from_code(" admin "), Some(Role::Admin));
    }
}
