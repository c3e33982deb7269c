//! Screen navigation map of the mobile client

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Splash,
    Login,
    Signup,
    Dashboard,
    Complaint,
    Tracking,
    Helpline,
    Admin,
    Unknown,
}

impl Screen {
    pub fn parse(name: &str) -> Self {
        match name {
            "splash" => Screen::Splash,
            "login" => Screen::Login,
            "signup" => Screen::Signup,
            "dashboard" => Screen::Dashboard,
            "complaint" => Screen::Complaint,
            "tracking" => Screen::Tracking,
            "helpline" => Screen::Helpline,
            "admin" => Screen::Admin,
            _ => Screen::Unknown,
        }
    }
}

/// Where the back action leads from `current`
pub fn next_screen_after_back(current: Screen) -> Screen {
    match current {
        Screen::Complaint | Screen::Tracking | Screen::Helpline | Screen::Signup | Screen::Login => {
            Screen::Dashboard
        }
        _ => Screen::Splash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_goes_to_dashboard_from_feature_screens() {
        for name in ["complaint", "tracking", "helpline", "signup", "login"] {
            assert_eq!(
                next_screen_after_back(Screen::parse(name)),
                Screen::Dashboard,
                "back from {name}"
            );
        }
    }

    #[test]
    fn test_back_goes_to_splash_otherwise() {
        for name in ["admin", "dashboard", "splash", "unknown", "settings"] {
            assert_eq!(
                next_screen_after_back(Screen::parse(name)),
                Screen::Splash,
                "back from {name}"
            );
        }
    }
}
