use serde::{Deserialize, Serialize};

/// Navigation action reachable by voice
///
/// Variants are declared in priority order: when a transcript contains
/// phrases of several actions, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Home,
    CreateEvent,
    Events,
    VrView,
    AiModel,
    Contact,
    Login,
    Community,
    Leaderboard,
    Resources,
    Courses,
    Jobs,
    Blogs,
    Profile,
    Dashboard,
    Settings,
    Logout,
    Search,
    Register,
    Help,
    JoinTeam,
    CreateTeam,
    SubmitProject,
    ViewSubmissions,
    Judging,
    Notifications,
    Schedule,
}

impl Action {
    /// Every action, in priority order
    pub const ALL: [Action; 27] = [
        Action::Home,
        Action::CreateEvent,
        Action::Events,
        Action::VrView,
        Action::AiModel,
        Action::Contact,
        Action::Login,
        Action::Community,
        Action::Leaderboard,
        Action::Resources,
        Action::Courses,
        Action::Jobs,
        Action::Blogs,
        Action::Profile,
        Action::Dashboard,
        Action::Settings,
        Action::Logout,
        Action::Search,
        Action::Register,
        Action::Help,
        Action::JoinTeam,
        Action::CreateTeam,
        Action::SubmitProject,
        Action::ViewSubmissions,
        Action::Judging,
        Action::Notifications,
        Action::Schedule,
    ];

    /// Stable upper-case name (e.g. "LEADERBOARD")
    pub fn name(&self) -> &'static str {
        match self {
            Action::Home => "HOME",
            Action::CreateEvent => "CREATE_EVENT",
            Action::Events => "EVENTS",
            Action::VrView => "VR_VIEW",
            Action::AiModel => "AI_MODEL",
            Action::Contact => "CONTACT",
            Action::Login => "LOGIN",
            Action::Community => "COMMUNITY",
            Action::Leaderboard => "LEADERBOARD",
            Action::Resources => "RESOURCES",
            Action::Courses => "COURSES",
            Action::Jobs => "JOBS",
            Action::Blogs => "BLOGS",
            Action::Profile => "PROFILE",
            Action::Dashboard => "DASHBOARD",
            Action::Settings => "SETTINGS",
            Action::Logout => "LOGOUT",
            Action::Search => "SEARCH",
            Action::Register => "REGISTER",
            Action::Help => "HELP",
            Action::JoinTeam => "JOIN_TEAM",
            Action::CreateTeam => "CREATE_TEAM",
            Action::SubmitProject => "SUBMIT_PROJECT",
            Action::ViewSubmissions => "VIEW_SUBMISSIONS",
            Action::Judging => "JUDGING",
            Action::Notifications => "NOTIFICATIONS",
            Action::Schedule => "SCHEDULE",
        }
    }

    /// Client-side route the action navigates to
    pub fn route(&self) -> &'static str {
        match self {
            Action::Home => "/",
            Action::CreateEvent => "/create-event",
            Action::Events => "/events",
            Action::VrView => "/vr-view",
            Action::AiModel => "/ai-model",
            Action::Contact => "/contact",
            Action::Login => "/login",
            Action::Community => "/community",
            Action::Leaderboard => "/leaderboard",
            Action::Resources => "/resources",
            Action::Courses => "/courses",
            Action::Jobs => "/jobs",
            Action::Blogs => "/blogs",
            Action::Profile => "/profile",
            Action::Dashboard => "/dashboard",
            Action::Settings => "/settings",
            Action::Logout => "/logout",
            Action::Search => "/search",
            Action::Register => "/register",
            Action::Help => "/help",
            Action::JoinTeam => "/join-team",
            Action::CreateTeam => "/create-team",
            Action::SubmitProject => "/submit-project",
            Action::ViewSubmissions => "/view-submissions",
            Action::Judging => "/judging",
            Action::Notifications => "/notifications",
            Action::Schedule => "/schedule",
        }
    }

    /// Human-readable destination used in spoken and visual feedback
    pub fn label(&self) -> &'static str {
        match self {
            Action::Home => "home page",
            Action::CreateEvent => "create event page",
            Action::Events => "events page",
            Action::VrView => "VR view",
            Action::AiModel => "AI model page",
            Action::Contact => "contact page",
            Action::Login => "login page",
            Action::Community => "community page",
            Action::Leaderboard => "leaderboard",
            Action::Resources => "resources page",
            Action::Courses => "courses page",
            Action::Jobs => "job board",
            Action::Blogs => "blogs page",
            Action::Profile => "your profile",
            Action::Dashboard => "dashboard",
            Action::Settings => "settings",
            Action::Logout => "logout",
            Action::Search => "search page",
            Action::Register => "registration page",
            Action::Help => "help page",
            Action::JoinTeam => "join team page",
            Action::CreateTeam => "create team page",
            Action::SubmitProject => "project submission page",
            Action::ViewSubmissions => "submissions page",
            Action::Judging => "judging page",
            Action::Notifications => "notifications",
            Action::Schedule => "schedule",
        }
    }

    /// Spoken and displayed confirmation, e.g. "Going to events page"
    pub fn confirmation(&self) -> String {
        format!("Going to {}", self.label())
    }

    /// Accepted phrases (lower-case)
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Action::Home => &["go home", "go to home", "home page", "homepage", "take me home", "main page"],
            Action::CreateEvent => &[
                "create event",
                "create an event",
                "new event",
                "host event",
                "host an event",
                "host a hackathon",
                "organize event",
            ],
            Action::Events => &[
                "go to events",
                "open events",
                "show events",
                "view events",
                "events page",
                "navigate to events",
                "hackathons",
                "events",
            ],
            Action::VrView => &["vr view", "v r view", "virtual reality", "vr mode"],
            Action::AiModel => &["ai model", "a i model", "artificial intelligence", "ai assistant"],
            Action::Contact => &["contact", "get in touch", "reach out"],
            Action::Login => &["log in", "login", "sign in"],
            Action::Community => &["community", "forum"],
            Action::Leaderboard => &[
                "navigate to leaderboard",
                "go to leaderboard",
                "show leaderboard",
                "leaderboard",
                "leader board",
                "rankings",
            ],
            Action::Resources => &["resources", "resource page"],
            Action::Courses => &["courses", "tutorials", "learning"],
            Action::Jobs => &["jobs", "job board", "careers"],
            Action::Blogs => &["blogs", "blog", "articles"],
            Action::Profile => &["profile", "my account"],
            Action::Dashboard => &["dashboard"],
            Action::Settings => &["settings", "preferences"],
            Action::Logout => &["log out", "logout", "sign out"],
            Action::Search => &["search", "look for"],
            Action::Register => &["register", "sign up", "registration"],
            Action::Help => &["help", "support", "faq"],
            Action::JoinTeam => &["join team", "join a team", "find a team", "find team"],
            Action::CreateTeam => &["create team", "create a team", "new team", "form a team"],
            Action::SubmitProject => &["submit project", "submit my project", "submit a project"],
            Action::ViewSubmissions => &[
                "view submissions",
                "show submissions",
                "my submissions",
                "see submissions",
            ],
            Action::Judging => &["judging", "judges", "evaluation"],
            Action::Notifications => &["notifications", "alerts", "inbox"],
            Action::Schedule => &["schedule", "timeline", "agenda", "calendar"],
        }
    }
}

/// Serializable view of one table row
#[derive(Debug, Clone, Serialize)]
pub struct CommandEntry {
    pub action: Action,
    pub name: &'static str,
    pub route: &'static str,
    pub phrases: &'static [&'static str],
}

/// The full command table, in priority order
pub fn command_table() -> Vec<CommandEntry> {
    Action::ALL
        .iter()
        .map(|&action| CommandEntry {
            action,
            name: action.name(),
            route: action.route(),
            phrases: action.phrases(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_routes_are_unique() {
        let routes: HashSet<_> = Action::ALL.iter().map(|a| a.route()).collect();
        assert_eq!(routes.len(), Action::ALL.len());
    }

    #[test]
    fn test_phrases_are_lowercase_and_non_empty() {
        for action in Action::ALL {
            assert!(!action.phrases().is_empty(), "{} has no phrases", action.name());
            for phrase in action.phrases() {
                assert!(!phrase.trim().is_empty());
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_confirmation_text() {
        assert_eq!(Action::Events.confirmation(), "Going to events page");
        assert_eq!(Action::Leaderboard.confirmation(), "Going to leaderboard");
    }

    #[test]
    fn test_serialized_name_matches_name() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.name()));
        }
    }

    #[test]
    fn test_command_table_order() {
        let table = command_table();
        assert_eq!(table.len(), 27);
        assert_eq!(table[0].action, Action::Home);
        assert_eq!(table[0].route, "/");
        assert_eq!(table.last().map(|e| e.action), Some(Action::Schedule));
    }
}
