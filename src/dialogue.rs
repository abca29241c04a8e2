//! Typewriter reveal and the dialogue/choice state machine.

use crate::script::{Choice, DialogueEntry};

/// Reveals a string one character at a time.
#[derive(Clone, Debug, Default)]
pub struct Typewriter {
    text: &'static str,
    revealed: usize,
    len: usize,
}

impl Typewriter {
    /// Swap the source text. A different text restarts the reveal from zero;
    /// setting the same text again leaves progress alone.
    pub fn set_text(&mut self, text: &'static str) {
        if text == self.text {
            return;
        }
        self.text = text;
        self.revealed = 0;
        self.len = text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text = "";
        self.revealed = 0;
        self.len = 0;
    }

    /// Reveal one more character. Returns false once nothing is left.
    pub fn advance(&mut self) -> bool {
        if self.revealed < self.len {
            self.revealed += 1;
            true
        } else {
            false
        }
    }

    pub fn is_typing(&self) -> bool {
        self.revealed < self.len
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn source(&self) -> &'static str {
        self.text
    }

    pub fn visible(&self) -> &'static str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => self.text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DialogueState {
    Idle,
    /// Text is being revealed; `choices` is what becomes selectable afterwards.
    Displaying { choices: Option<[Choice; 2]> },
    AwaitingChoice { choices: [Choice; 2] },
    ChoiceMade { reaction: &'static str, reveal_at_ms: f64 },
    AwaitingNext,
}

#[derive(Clone, Debug)]
pub struct DialogueMachine {
    state: DialogueState,
    typewriter: Typewriter,
    last_response: Option<&'static str>,
    choice_delay_ms: f64,
}

impl DialogueMachine {
    pub fn new(choice_delay_ms: f64) -> Self {
        Self {
            state: DialogueState::Idle,
            typewriter: Typewriter::default(),
            last_response: None,
            choice_delay_ms,
        }
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    /// Whether a new entry may replace what is on screen.
    pub fn accepts_next(&self) -> bool {
        matches!(self.state, DialogueState::Idle | DialogueState::AwaitingNext)
    }

    pub fn surface(&mut self, entry: &DialogueEntry) {
        self.typewriter.set_text(entry.text);
        self.last_response = None;
        self.state = DialogueState::Displaying { choices: Some(entry.choices) };
    }

    /// One typewriter tick.
    pub fn type_step(&mut self) {
        let DialogueState::Displaying { choices } = self.state else { return };
        self.typewriter.advance();
        if self.typewriter.is_typing() {
            return;
        }
        self.state = match choices {
            Some(choices) => DialogueState::AwaitingChoice { choices },
            None => DialogueState::AwaitingNext,
        };
    }

    /// Lock in answer `index`. Only valid while choices are on offer; returns
    /// whether the selection was taken.
    pub fn select(&mut self, index: usize, now: f64) -> bool {
        let DialogueState::AwaitingChoice { choices } = self.state else { return false };
        let Some(choice) = choices.get(index) else { return false };
        self.last_response = Some(choice.label);
        self.state = DialogueState::ChoiceMade {
            reaction: choice.reaction,
            reveal_at_ms: now + self.choice_delay_ms,
        };
        true
    }

    /// Start revealing the reaction once the post-choice delay elapsed.
    /// Returns true when new text started.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.state {
            DialogueState::ChoiceMade { reaction, reveal_at_ms } if now >= reveal_at_ms => {
                self.typewriter.set_text(reaction);
                self.state = DialogueState::Displaying { choices: None };
                true
            }
            _ => false,
        }
    }

    /// Choices currently offered to the player (empty unless fully revealed).
    pub fn choices(&self) -> &[Choice] {
        match &self.state {
            DialogueState::AwaitingChoice { choices } => choices.as_slice(),
            _ => &[],
        }
    }

    pub fn visible_text(&self) -> &'static str {
        self.typewriter.visible()
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.state, DialogueState::Displaying { .. }) && self.typewriter.is_typing()
    }

    pub fn last_response(&self) -> Option<&'static str> {
        self.last_response
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn reset(&mut self) {
        self.state = DialogueState::Idle;
        self.typewriter.clear();
        self.last_response = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::DIALOGUE_SEQUENCE;

    fn reveal_all(m: &mut DialogueMachine) {
        for _ in 0..1_000 {
            m.type_step();
        }
    }

    #[test]
    fn typewriter_yields_len_plus_one_states() {
        let mut tw = Typewriter::default();
        tw.set_text("Ты здесь");
        let mut states = vec![tw.visible().to_string()];
        while tw.advance() {
            states.push(tw.visible().to_string());
        }
        assert_eq!(states.len(), "Ты здесь".chars().count() + 1);
        assert_eq!(states[0], "");
        assert_eq!(states[2], "Ты");
        assert_eq!(states.last().unwrap(), "Ты здесь");
        assert!(!tw.is_typing());
    }

    #[test]
    fn typewriter_restarts_on_new_text() {
        let mut tw = Typewriter::default();
        tw.set_text("first line");
        tw.advance();
        tw.advance();
        tw.advance();
        assert_eq!(tw.revealed(), 3);
        tw.set_text("second");
        assert_eq!(tw.revealed(), 0);
        assert_eq!(tw.visible(), "");
        tw.advance();
        tw.set_text("second");
        assert_eq!(tw.revealed(), 1);
    }

    #[test]
    fn full_cycle_through_one_entry() {
        let entry = &DIALOGUE_SEQUENCE[0];
        let mut m = DialogueMachine::new(400.0);
        assert!(m.accepts_next());
        m.surface(entry);
        assert!(m.is_typing());
        assert!(m.choices().is_empty());
        assert!(!m.accepts_next());

        reveal_all(&mut m);
        assert_eq!(m.visible_text(), entry.text);
        assert_eq!(m.choices().len(), 2);

        assert!(m.select(1, 1_000.0));
        assert_eq!(m.last_response(), Some(entry.choices[1].label));
        assert!(m.choices().is_empty());
        assert!(!m.accepts_next());

        assert!(!m.poll(1_399.0));
        assert!(m.poll(1_400.0));
        assert_eq!(m.visible_text(), "");
        reveal_all(&mut m);
        assert_eq!(m.visible_text(), entry.choices[1].reaction);
        assert_eq!(*m.state(), DialogueState::AwaitingNext);
        assert!(m.accepts_next());
    }

    #[test]
    fn choice_is_idempotent() {
        let mut m = DialogueMachine::new(400.0);
        m.surface(&DIALOGUE_SEQUENCE[3]);
        assert!(!m.select(0, 0.0), "no selection while typing");
        reveal_all(&mut m);
        assert!(m.select(0, 0.0));
        assert!(!m.select(1, 0.0));
        assert_eq!(m.last_response(), Some(DIALOGUE_SEQUENCE[3].choices[0].label));
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut m = DialogueMachine::new(400.0);
        m.surface(&DIALOGUE_SEQUENCE[0]);
        reveal_all(&mut m);
        assert!(!m.select(2, 0.0));
        assert_eq!(m.choices().len(), 2);
    }

    #[test]
    fn surfacing_clears_previous_answer() {
        let mut m = DialogueMachine::new(0.0);
        m.surface(&DIALOGUE_SEQUENCE[0]);
        reveal_all(&mut m);
        m.select(0, 0.0);
        m.poll(0.0);
        reveal_all(&mut m);
        m.surface(&DIALOGUE_SEQUENCE[1]);
        assert_eq!(m.last_response(), None);
        assert_eq!(m.typewriter().source(), DIALOGUE_SEQUENCE[1].text);
    }
}
