// Tests for transcript matching and command execution
//
// These cover the matching properties over the whole command table and the
// user-visible scenarios of the executor.

mod common;

use common::{FeedbackCall, RecordingFeedback};
use hacknhost_voice::commands::{matches, resolve};
use hacknhost_voice::{Action, CommandExecutor, ExecutionOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn executor(feedback: &RecordingFeedback) -> CommandExecutor {
    CommandExecutor::new(Arc::new(feedback.clone()), Duration::from_secs(1))
}

fn position(action: Action) -> usize {
    Action::ALL.iter().position(|a| *a == action).unwrap()
}

#[test]
fn test_every_phrase_resolves_to_its_action_or_an_earlier_one() {
    for action in Action::ALL {
        for phrase in action.phrases() {
            let resolved = resolve(phrase)
                .unwrap_or_else(|| panic!("phrase {:?} resolved to nothing", phrase));
            assert!(
                position(resolved) <= position(action),
                "{:?} resolved to later action {:?}",
                phrase,
                resolved
            );
        }
    }
}

#[test]
fn test_matches_agrees_with_case_insensitive_substring() {
    let transcripts = [
        "Go To Events Page",
        "please NAVIGATE TO LEADERBOARD now",
        "nothing relevant here",
        "",
    ];

    for transcript in transcripts {
        for action in Action::ALL {
            let expected = action
                .phrases()
                .iter()
                .any(|p| transcript.to_lowercase().contains(&p.to_lowercase()));
            assert_eq!(matches(transcript, action.phrases()), expected);
        }
    }
}

#[test]
fn test_earlier_declared_action_wins() {
    // PROFILE and SETTINGS both match; PROFILE is declared first
    assert!(matches("go to profile settings", Action::Settings.phrases()));
    assert_eq!(resolve("go to profile settings"), Some(Action::Profile));

    assert_eq!(resolve("open the dashboard settings"), Some(Action::Dashboard));
    assert_eq!(resolve("create events for the weekend"), Some(Action::CreateEvent));
}

#[test]
fn test_distinct_login_and_logout() {
    assert_eq!(resolve("log in please"), Some(Action::Login));
    assert_eq!(resolve("log out please"), Some(Action::Logout));
    assert_eq!(resolve("sign out"), Some(Action::Logout));
}

#[test]
fn test_team_and_submission_commands() {
    assert_eq!(resolve("I want to join a team"), Some(Action::JoinTeam));
    assert_eq!(resolve("create a team"), Some(Action::CreateTeam));
    assert_eq!(resolve("submit my project"), Some(Action::SubmitProject));
    assert_eq!(resolve("show submissions"), Some(Action::ViewSubmissions));
}

#[test]
fn test_events_page_scenario() {
    let feedback = RecordingFeedback::new();
    let mut exec = executor(&feedback);

    let outcome = exec.execute_at("go to events page", Instant::now());

    assert_eq!(outcome, ExecutionOutcome::Executed(Action::Events));
    assert_eq!(
        feedback.calls(),
        vec![
            FeedbackCall::Navigate("/events".to_string()),
            FeedbackCall::Speak("Going to events page".to_string()),
            FeedbackCall::Notify(
                "Voice Command".to_string(),
                "Going to events page".to_string()
            ),
        ]
    );
}

#[test]
fn test_leaderboard_scenario() {
    let feedback = RecordingFeedback::new();
    let mut exec = executor(&feedback);

    let outcome = exec.execute_at("please navigate to leaderboard now", Instant::now());

    assert_eq!(outcome, ExecutionOutcome::Executed(Action::Leaderboard));
    assert_eq!(feedback.routes(), vec!["/leaderboard".to_string()]);
}

#[test]
fn test_second_command_inside_window_is_dropped() {
    let feedback = RecordingFeedback::new();
    let mut exec = executor(&feedback);
    let t0 = Instant::now();

    exec.execute_at("go to events", t0);
    let outcome = exec.execute_at("go to courses", t0 + Duration::from_millis(400));

    assert_eq!(outcome, ExecutionOutcome::Debounced);
    assert_eq!(feedback.routes(), vec!["/events".to_string()]);
    assert_eq!(feedback.calls().len(), 3);
}

#[test]
fn test_unmatched_transcript_has_no_side_effects() {
    let feedback = RecordingFeedback::new();
    let mut exec = executor(&feedback);

    let outcome = exec.execute_at("what a lovely day", Instant::now());

    assert_eq!(outcome, ExecutionOutcome::NoMatch);
    assert!(feedback.calls().is_empty());
}

#[test]
fn test_every_route_is_reachable() {
    let feedback = RecordingFeedback::new();
    let mut exec = executor(&feedback);
    let t0 = Instant::now();

    for (i, action) in Action::ALL.iter().enumerate() {
        let at = t0 + Duration::from_secs(2 * i as u64);
        exec.execute_at(action.phrases()[0], at);
    }

    let routes = feedback.routes();
    let expected: Vec<String> = Action::ALL.iter().map(|a| a.route().to_string()).collect();
    assert_eq!(routes, expected);
}
