//! End-to-end behavior of the combobox, driven the way a host application
//! drives it: through messages, with every follow-up message delivered.

use combo_core::testing::{ComponentHarness, TestProgram};
use combo_core::{Command, Component, Model, TerminalEvent};
use combo_widgets::combobox::{self, Combobox, Message};
use combo_widgets::search_field;
use combo_widgets::OptionData;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn press(code: KeyCode) -> Message {
    Message::Key(key(code))
}

fn type_text(harness: &mut ComponentHarness<Combobox<&'static str>>, text: &str) {
    for c in text.chars() {
        harness.send(press(KeyCode::Char(c)));
    }
}

fn erase(harness: &mut ComponentHarness<Combobox<&'static str>>, count: usize) {
    for _ in 0..count {
        harness.send(press(KeyCode::Backspace));
    }
}

fn fruits() -> ComponentHarness<Combobox<&'static str>> {
    ComponentHarness::new(Combobox::new(vec!["Apple", "Banana", "Avocado"]))
}

fn orchard() -> ComponentHarness<Combobox<&'static str>> {
    ComponentHarness::new(Combobox::new(vec![
        "Apple",
        "Apricot",
        "Banana",
        "Blueberry",
        "Cherry",
        "Grape",
        "Papaya",
        "Pear",
    ]))
}

fn highlighted(combo: &Combobox<&'static str>) -> Option<&'static str> {
    combo
        .active_index()
        .and_then(|i| combo.visible_options().get(i).copied())
}

fn is_subsequence(sub: &[&str], full: &[&str]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|wanted| rest.any(|candidate| candidate == wanted))
}

#[test]
fn visible_is_always_a_subsequence_of_the_session_list() {
    let mut harness = orchard();
    harness.send(Message::Focus);
    let session: Vec<&str> = harness.component().options().to_vec();

    let keys = [
        KeyCode::Char('p'),
        KeyCode::Char('e'),
        KeyCode::Backspace,
        KeyCode::Char('r'),
        KeyCode::Char('y'),
    ];
    for code in keys {
        harness.send(press(code));
        let visible = harness.component().visible_options();
        assert!(
            is_subsequence(visible, &session),
            "{visible:?} after {:?}",
            harness.component().search_text()
        );
    }
}

#[test]
fn same_term_twice_gives_same_list() {
    let mut harness = orchard();
    type_text(&mut harness, "ap");
    let once = harness.component().visible_options().to_vec();
    let cmd = harness.component_mut().search_changed("ap");
    assert!(cmd.is_none());
    assert_eq!(harness.component().visible_options(), once.as_slice());
}

#[test]
fn clearing_the_term_restores_the_full_list() {
    let mut harness = orchard();
    type_text(&mut harness, "berr");
    assert_eq!(harness.component().visible_options(), &["Blueberry"]);
    erase(&mut harness, 4);
    assert_eq!(
        harness.component().visible_options(),
        harness.component().options()
    );
}

#[test]
fn single_letter_and_two_letter_terms() {
    let mut harness = fruits();
    type_text(&mut harness, "a");
    assert_eq!(
        harness.component().visible_options(),
        &["Apple", "Banana", "Avocado"]
    );
    type_text(&mut harness, "v");
    assert_eq!(harness.component().visible_options(), &["Avocado"]);
}

#[test]
fn no_match_shows_nothing_highlighted() {
    let mut harness = fruits();
    harness.send(Message::Focus);
    type_text(&mut harness, "xyz");
    let combo = harness.component();
    assert!(combo.visible_options().is_empty());
    assert_eq!(combo.active_index(), None);
    assert!(harness
        .render_string(20, 4, Rect::new(0, 0, 20, 1))
        .contains("No matches"));
}

#[test]
fn pick_survives_a_filter_that_still_matches() {
    let mut combo = Combobox::new(vec!["Apple", "Banana", "Avocado"]);
    let _ = combo.request_focus();
    let _ = combo.pick("Avocado");
    assert_eq!(combo.value(), 2);

    let _ = combo.search_changed("a");
    assert_eq!(highlighted(&combo), Some("Avocado"));
    let _ = combo.search_changed("av");
    assert_eq!(highlighted(&combo), Some("Avocado"));
    assert_eq!(combo.active_index(), Some(0));
}

#[test]
fn pick_comes_back_after_being_filtered_out() {
    let mut combo = Combobox::new(vec!["Apple", "Banana", "Avocado"]);
    let _ = combo.request_focus();
    let _ = combo.pick("banana");

    let _ = combo.search_changed("av");
    assert_eq!(highlighted(&combo), None);
    assert_eq!(combo.value(), 1);

    let _ = combo.search_changed("");
    assert_eq!(highlighted(&combo), Some("Banana"));
}

#[test]
fn reopening_starts_from_the_first_option() {
    let mut harness = fruits();
    harness.send(Message::Focus);
    harness.send(press(KeyCode::Down));
    harness.send(press(KeyCode::Enter));

    assert!(!harness.component().is_open());
    assert_eq!(harness.component().value(), 1);
    assert!(harness
        .log()
        .iter()
        .any(|m| matches!(m, Message::Selected(1, label) if label == "Banana")));

    harness.send(Message::Focus);
    assert!(harness.component().is_open());
    assert_eq!(harness.component().value(), 0);
    assert_eq!(highlighted(harness.component()), Some("Apple"));
}

#[test]
fn pick_reports_then_closes() {
    let mut harness = fruits();
    harness.send(Message::Focus);
    harness.take_log();
    harness.send(press(KeyCode::Enter));

    let reported: Vec<&'static str> = harness
        .log()
        .iter()
        .filter_map(|m| match m {
            Message::Selected(..) => Some("selected"),
            Message::Unfocus => Some("unfocus"),
            Message::Closed => Some("closed"),
            _ => None,
        })
        .collect();
    assert_eq!(reported, vec!["selected", "unfocus", "closed"]);
}

#[test]
fn opening_survives_the_spurious_edit_end() {
    let mut harness = fruits();
    type_text(&mut harness, "b");

    let log = harness.log();
    let edit_end = log
        .iter()
        .position(|m| matches!(m, Message::Search(search_field::Message::EditEnded(_))));
    let changed = log
        .iter()
        .position(|m| matches!(m, Message::Search(search_field::Message::Changed(_))));
    assert!(matches!((edit_end, changed), (Some(e), Some(c)) if e < c));
    assert!(harness.component().is_open());
    assert_eq!(harness.component().visible_options(), &["Banana"]);

    // The guard is one-shot: the next close request goes through.
    harness.send(Message::Unfocus);
    assert!(!harness.component().is_open());
}

#[test]
fn tab_and_outside_click_close() {
    let mut harness = fruits();
    harness.send(Message::Focus);
    harness.send(press(KeyCode::Tab));
    assert!(!harness.component().is_open());

    let _ = harness.render(30, 8, Rect::new(0, 0, 30, 1));
    harness.send(Message::Click(1, 0));
    assert!(harness.component().is_open());
    let _ = harness.render(30, 8, Rect::new(0, 0, 30, 1));
    harness.send(Message::Click(1, 7));
    assert!(!harness.component().is_open());
}

#[test]
fn list_keys_while_filtered() {
    let mut harness = orchard();
    type_text(&mut harness, "p");
    let visible = harness.component().visible_options().to_vec();
    assert_eq!(visible, vec!["Apple", "Apricot", "Grape", "Papaya", "Pear"]);

    harness.send(press(KeyCode::Up));
    harness.send(press(KeyCode::Enter));
    assert_eq!(harness.component().selected_option(), Some(&"Pear"));
    assert_eq!(harness.component().value(), 7);
}

#[test]
fn payload_options_report_their_index() {
    let options = vec![
        OptionData::new("Lemon", 29u32),
        OptionData::new("Lime", 30),
        OptionData::new("Mango", 60),
    ];
    let mut harness = ComponentHarness::new(Combobox::new(options));
    harness.send(press(KeyCode::Char('m')));
    // "Lime" and "Lemon" both contain "m"; so does "Mango".
    assert_eq!(harness.component().visible_options().len(), 3);
    harness.send(press(KeyCode::Char('a')));
    harness.send(press(KeyCode::Enter));

    let selected = harness.component().selected_option().map(|o| o.payload);
    assert_eq!(selected, Some(60));
    assert!(harness
        .log()
        .iter()
        .any(|m| matches!(m, Message::Selected(2, label) if label == "Mango")));
}

// A host model, to check the combobox composes under a parent.

struct Form {
    fruit: Combobox<&'static str>,
    picked: Vec<String>,
}

#[derive(Debug)]
enum FormMsg {
    Fruit(combobox::Message),
    Event(TerminalEvent),
}

impl Model for Form {
    type Message = FormMsg;
    type Flags = Vec<&'static str>;

    fn init(options: Vec<&'static str>) -> (Self, Command<FormMsg>) {
        (
            Form {
                fruit: Combobox::new(options),
                picked: Vec::new(),
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: FormMsg) -> Command<FormMsg> {
        match msg {
            FormMsg::Event(event) => match Message::from_event(&event) {
                Some(m) => Command::message(FormMsg::Fruit(m)),
                None => Command::none(),
            },
            FormMsg::Fruit(Message::Selected(index, label)) => {
                self.picked.push(label.clone());
                self.fruit
                    .update(Message::Selected(index, label))
                    .map(FormMsg::Fruit)
            }
            FormMsg::Fruit(m) => self.fruit.update(m).map(FormMsg::Fruit),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect { height: 1, ..frame.area() };
        self.fruit.view(frame, area);
    }
}

#[test]
fn hosted_in_a_model() {
    let mut prog = TestProgram::<Form>::new(vec!["Apple", "Banana", "Avocado"]);
    for c in "ban".chars() {
        prog.send_and_drain(FormMsg::Event(TerminalEvent::Key(key(KeyCode::Char(c)))));
    }
    assert!(prog.model().fruit.is_open());
    assert!(prog.render_string(20, 4).contains("○ Banana"));

    prog.send_and_drain(FormMsg::Event(TerminalEvent::Key(key(KeyCode::Enter))));
    assert_eq!(prog.model().picked, vec!["Banana"]);
    assert!(!prog.model().fruit.is_open());
    assert!(prog.render_string(20, 4).starts_with("Banana"));
    assert!(!prog.quit_requested());
}
