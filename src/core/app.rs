use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};
use tui_textarea::TextArea;

use crate::core::constants::{CONNECT_WARNING, INPUT_PLACEHOLDER, TYPING_INDICATOR};
use crate::core::conversation::Conversation;
use crate::core::infer::TurnOutcome;
use crate::core::message::Message;
use crate::core::turn::TurnState;
use crate::ui::theme::Theme;

/// All mutable session state, owned by the event loop. The controller
/// methods (`submit`, `settle`, `toggle_theme`) are the only mutators of
/// the conversation and turn state; rendering reads, never writes.
pub struct App {
    pub conversation: Conversation,
    pub turn: TurnState,
    pub input: TextArea<'static>,
    pub theme: Theme,
    pub theme_name: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub status: Option<String>,
    next_turn_id: u64,
}

impl App {
    pub fn new(conversation: Conversation, theme_name: &str) -> Self {
        let mut app = App {
            conversation,
            turn: TurnState::Idle,
            input: TextArea::default(),
            theme: Theme::from_name(theme_name),
            theme_name: theme_name.to_string(),
            scroll_offset: 0,
            auto_scroll: true,
            status: None,
            next_turn_id: 0,
        };
        app.reset_input();
        app
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    fn reset_input(&mut self) {
        self.input = TextArea::default();
        self.input.set_placeholder_text(INPUT_PLACEHOLDER);
        self.apply_input_theme();
    }

    fn apply_input_theme(&mut self) {
        self.input.set_style(self.theme.input_text_style);
        self.input.set_cursor_style(self.theme.input_cursor_style);
        self.input.set_cursor_line_style(self.theme.input_text_style);
        self.input
            .set_placeholder_style(self.theme.placeholder_style);
    }

    /// Submit the current input as a new turn. The user message is
    /// appended before the network call even starts; the input text is
    /// kept visible until the turn settles. Returns the prompt and the
    /// turn id to tag the request with, or None when the input is blank
    /// or a turn is already in flight.
    pub fn submit(&mut self) -> Option<(String, u64)> {
        if !self.turn.is_idle() {
            return None;
        }

        let text = self.input_text();
        if text.trim().is_empty() {
            return None;
        }

        self.next_turn_id += 1;
        let turn_id = self.next_turn_id;
        if !self.turn.begin(turn_id) {
            return None;
        }

        self.conversation.append(Message::user(text.clone()));
        self.auto_scroll = true;
        Some((text, turn_id))
    }

    /// Apply a settled outcome: append exactly one bot message (reply or
    /// warning), clear the input, and return to Idle. Outcomes for any
    /// turn other than the in-flight one are dropped.
    pub fn settle(&mut self, turn_id: u64, outcome: TurnOutcome) -> bool {
        if !self.turn.settle(turn_id) {
            return false;
        }

        let text = match outcome {
            TurnOutcome::Reply(reply) => reply,
            TurnOutcome::Failed => CONNECT_WARNING.to_string(),
        };
        self.conversation.append(Message::bot(text));
        self.reset_input();
        self.auto_scroll = true;
        true
    }

    pub fn toggle_theme(&mut self) {
        let next = Theme::toggled_name(&self.theme_name);
        self.theme_name = next.to_string();
        self.theme = Theme::from_name(next);
        self.apply_input_theme();
    }

    /// Project the conversation into styled lines: user text
    /// right-aligned, bot text left-aligned (always plain text, whatever
    /// the server sent), a blank spacer between messages, and the typing
    /// indicator while a turn is in flight.
    pub fn transcript_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        for message in self.conversation.messages() {
            let (style, alignment) = if message.is_user() {
                (self.theme.user_text_style, Alignment::Right)
            } else {
                (self.theme.bot_text_style, Alignment::Left)
            };

            for text_line in message.text.lines() {
                lines.push(Line::from(Span::styled(text_line, style)).alignment(alignment));
            }
            lines.push(Line::from(""));
        }

        if self.turn.is_sending() {
            lines.push(Line::from(Span::styled(
                TYPING_INDICATOR,
                self.theme.typing_indicator_style,
            )));
        }

        lines
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16, available_height: u16) {
        let max_offset = (self.transcript_lines().len() as u16).saturating_sub(available_height);
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_offset);
        // Reaching the bottom re-engages stick-to-bottom.
        if self.scroll_offset >= max_offset {
            self.auto_scroll = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::NO_REPLY_FALLBACK;
    use crate::core::message::Sender;

    fn app_with_input(text: &str) -> App {
        let mut app = App::new(Conversation::new(), "dark");
        app.input.insert_str(text);
        app
    }

    #[test]
    fn submit_appends_exactly_one_user_message_before_the_reply() {
        let mut app = app_with_input("Hello");

        let (prompt, turn_id) = app.submit().expect("expected a turn to start");
        assert_eq!(prompt, "Hello");
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.conversation.messages()[0].sender, Sender::User);
        assert_eq!(app.conversation.messages()[0].text, "Hello");
        assert_eq!(app.turn, TurnState::Sending { turn_id });
    }

    #[test]
    fn blank_input_never_starts_a_turn() {
        for blank in ["", "   ", "\n", " \t "] {
            let mut app = app_with_input(blank);
            assert!(app.submit().is_none());
            assert!(app.conversation.is_empty());
            assert!(app.turn.is_idle());
        }
    }

    #[test]
    fn submissions_are_refused_while_a_turn_is_in_flight() {
        let mut app = app_with_input("first");
        app.submit().unwrap();

        app.input.insert_str(" and second");
        assert!(app.submit().is_none());
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn a_reply_settles_the_turn_and_clears_the_input() {
        let mut app = app_with_input("Hello");
        let (_, turn_id) = app.submit().unwrap();
        assert_eq!(app.input_text(), "Hello");

        assert!(app.settle(turn_id, TurnOutcome::Reply("Hi".to_string())));
        assert_eq!(app.conversation.len(), 2);
        let bot = &app.conversation.messages()[1];
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.text, "Hi");
        assert!(app.turn.is_idle());
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn a_failure_settles_with_the_fixed_warning() {
        let mut app = app_with_input("Hello");
        let (_, turn_id) = app.submit().unwrap();

        assert!(app.settle(turn_id, TurnOutcome::Failed));
        assert_eq!(app.conversation.messages()[1].text, CONNECT_WARNING);
        assert!(app.turn.is_idle());

        // Submission is re-enabled after a failure.
        app.input.insert_str("again");
        assert!(app.submit().is_some());
    }

    #[test]
    fn fallback_replies_flow_through_like_any_other() {
        let mut app = app_with_input("Hello");
        let (_, turn_id) = app.submit().unwrap();

        assert!(app.settle(turn_id, TurnOutcome::Reply(NO_REPLY_FALLBACK.to_string())));
        assert_eq!(app.conversation.messages()[1].text, NO_REPLY_FALLBACK);
    }

    #[test]
    fn stale_outcomes_never_mutate_state() {
        let mut app = app_with_input("Hello");
        let (_, turn_id) = app.submit().unwrap();

        assert!(!app.settle(turn_id + 1, TurnOutcome::Reply("late".to_string())));
        assert_eq!(app.conversation.len(), 1);
        assert!(app.turn.is_sending());
        assert_eq!(app.input_text(), "Hello");

        // The real outcome still lands.
        assert!(app.settle(turn_id, TurnOutcome::Reply("on time".to_string())));
        assert!(!app.settle(turn_id, TurnOutcome::Reply("duplicate".to_string())));
        assert_eq!(app.conversation.len(), 2);
    }

    #[test]
    fn raw_input_is_preserved_in_the_transcript() {
        let mut app = app_with_input("  padded  ");
        let (prompt, _) = app.submit().unwrap();
        assert_eq!(prompt, "  padded  ");
        assert_eq!(app.conversation.messages()[0].text, "  padded  ");
    }

    #[test]
    fn toggling_the_theme_flips_the_name_and_nothing_else() {
        let mut app = app_with_input("keep me");
        app.submit().unwrap();

        assert_eq!(app.theme_name, "dark");
        app.toggle_theme();
        assert_eq!(app.theme_name, "light");
        app.toggle_theme();
        assert_eq!(app.theme_name, "dark");
        assert_eq!(app.conversation.len(), 1);
        assert!(app.turn.is_sending());
    }

    #[test]
    fn typing_indicator_appears_only_while_sending() {
        let mut app = app_with_input("Hello");
        let before: usize = app.transcript_lines().len();
        let (_, turn_id) = app.submit().unwrap();

        let sending_lines = app.transcript_lines();
        let last = sending_lines.last().expect("expected transcript lines");
        assert_eq!(
            last.spans.first().map(|s| s.content.as_ref()),
            Some(TYPING_INDICATOR)
        );

        app.settle(turn_id, TurnOutcome::Reply("done".to_string()));
        let after = app.transcript_lines();
        assert!(after
            .iter()
            .all(|line| line.spans.iter().all(|s| s.content != TYPING_INDICATOR)));
        assert!(after.len() > before);
    }

    #[test]
    fn transcript_alignment_follows_the_sender() {
        let mut app = app_with_input("question");
        let (_, turn_id) = app.submit().unwrap();
        app.settle(turn_id, TurnOutcome::Reply("answer".to_string()));

        let lines = app.transcript_lines();
        assert_eq!(lines[0].alignment, Some(Alignment::Right));
        assert_eq!(lines[2].alignment, Some(Alignment::Left));
    }

    #[test]
    fn scrolling_up_disengages_stick_to_bottom() {
        let mut app = App::new(
            Conversation::from_messages(
                (0..40)
                    .map(|i| Message::bot(format!("line {i}")))
                    .collect(),
            ),
            "dark",
        );
        app.scroll_offset = 30;

        app.scroll_up(3);
        assert!(!app.auto_scroll);
        assert_eq!(app.scroll_offset, 27);

        // Scrolling back past the bottom clamps and re-engages.
        app.scroll_down(200, 10);
        assert!(app.auto_scroll);
    }
}
