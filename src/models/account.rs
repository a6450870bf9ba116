use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub nationality: String,
}

impl Signup {
    /// Mobile numbers are entered on a numeric keypad; anything else is dropped.
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.mobile = self.mobile.chars().filter(|c| c.is_ascii_digit()).collect();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub email: String,
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_digits_only() {
        let signup = Signup {
            name: " Asha ".to_string(),
            email: "asha@example.com ".to_string(),
            mobile: "+91 98-7654 3210".to_string(),
            password: "secret".to_string(),
            nationality: "Indian".to_string(),
        }
        .normalize();

        assert_eq!(signup.mobile, "919876543210");
        assert_eq!(signup.name, "Asha");
        assert_eq!(signup.email, "asha@example.com");
    }
}
