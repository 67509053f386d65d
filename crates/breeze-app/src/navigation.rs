//! Screen selection as a finite-state machine.

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Weather,
    Login,
    Signup,
}

/// User or flow events that can change the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    LoginTapped,
    SignupTapped,
    Back,
    AuthSucceeded,
    CreateAccountTapped,
    HaveAccountTapped,
}

impl Screen {
    /// Next screen for `event`. Events that don't apply leave the screen
    /// unchanged.
    pub fn transition(self, event: NavEvent) -> Self {
        use NavEvent::*;
        match (self, event) {
            (Screen::Weather, LoginTapped) => Screen::Login,
            (Screen::Weather, SignupTapped) => Screen::Signup,
            (Screen::Login, Back | AuthSucceeded) => Screen::Weather,
            (Screen::Login, CreateAccountTapped) => Screen::Signup,
            (Screen::Signup, Back | AuthSucceeded) => Screen::Weather,
            (Screen::Signup, HaveAccountTapped) => Screen::Login,
            (screen, _) => screen,
        }
    }

    /// True for screens that host a credential form.
    pub fn has_form(self) -> bool {
        matches!(self, Screen::Login | Screen::Signup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EVENTS: [NavEvent; 6] = [
        NavEvent::LoginTapped,
        NavEvent::SignupTapped,
        NavEvent::Back,
        NavEvent::AuthSucceeded,
        NavEvent::CreateAccountTapped,
        NavEvent::HaveAccountTapped,
    ];

    #[test]
    fn test_transition_table() {
        let table = [
            (Screen::Weather, NavEvent::LoginTapped, Screen::Login),
            (Screen::Weather, NavEvent::SignupTapped, Screen::Signup),
            (Screen::Login, NavEvent::Back, Screen::Weather),
            (Screen::Login, NavEvent::AuthSucceeded, Screen::Weather),
            (Screen::Login, NavEvent::CreateAccountTapped, Screen::Signup),
            (Screen::Signup, NavEvent::Back, Screen::Weather),
            (Screen::Signup, NavEvent::AuthSucceeded, Screen::Weather),
            (Screen::Signup, NavEvent::HaveAccountTapped, Screen::Login),
        ];
        for (from, event, to) in table {
            assert_eq!(from.transition(event), to, "{:?} --{:?}-->", from, event);
        }
    }

    #[test]
    fn test_unlisted_events_are_ignored() {
        for event in ALL_EVENTS {
            let next = Screen::Weather.transition(event);
            if !matches!(event, NavEvent::LoginTapped | NavEvent::SignupTapped) {
                assert_eq!(next, Screen::Weather);
            }
        }
        assert_eq!(Screen::Login.transition(NavEvent::LoginTapped), Screen::Login);
        assert_eq!(Screen::Login.transition(NavEvent::HaveAccountTapped), Screen::Login);
        assert_eq!(Screen::Signup.transition(NavEvent::SignupTapped), Screen::Signup);
        assert_eq!(Screen::Signup.transition(NavEvent::CreateAccountTapped), Screen::Signup);
    }

    #[test]
    fn test_has_form() {
        assert!(!Screen::Weather.has_form());
        assert!(Screen::Login.has_form());
        assert!(Screen::Signup.has_form());
    }
}
