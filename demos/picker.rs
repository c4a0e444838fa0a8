//! # Fruit Picker
//!
//! Hosts a single `Combobox` over fruits carrying a calorie payload. Type to
//! narrow the list; the highlighted fruit survives filtering.
//!
//! Set `COMBO_LOG=/tmp/combo.log` to write `tracing` output to a file
//! (`RUST_LOG` picks the filter).
//!
//! Run with: `cargo run --example picker`

use combo::crossterm::event::{KeyCode, KeyModifiers};
use combo::ratatui::layout::{Constraint, Layout};
use combo::ratatui::style::{Color, Modifier, Style};
use combo::ratatui::text::{Line, Span};
use combo::ratatui::widgets::{Block, Borders, Paragraph};
use combo::ratatui::Frame;
use combo::widgets::combobox::{self, Combobox};
use combo::widgets::OptionData;
use combo::{terminal_events, Command, Component, Model, ProgramOptions, Subscription};
use std::time::Duration;

const FRUITS: &[(&str, u32)] = &[
    ("Apple", 52),
    ("Apricot", 48),
    ("Avocado", 160),
    ("Banana", 89),
    ("Blackberry", 43),
    ("Blueberry", 57),
    ("Cherry", 50),
    ("Coconut", 354),
    ("Date", 282),
    ("Fig", 74),
    ("Grape", 69),
    ("Kiwi", 61),
    ("Lemon", 29),
    ("Lime", 30),
    ("Mango", 60),
    ("Orange", 47),
    ("Papaya", 43),
    ("Peach", 39),
    ("Pear", 57),
    ("Pineapple", 50),
    ("Plum", 46),
    ("Raspberry", 52),
    ("Strawberry", 32),
    ("Watermelon", 30),
];

type Fruit = OptionData<u32>;

struct PickerApp {
    fruit: Combobox<Fruit>,
    picked: Option<Fruit>,
}

#[derive(Debug)]
enum Msg {
    Fruit(combobox::Message),
    Quit,
}

impl Model for PickerApp {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let options = FRUITS
            .iter()
            .map(|&(label, kcal)| OptionData::new(label, kcal))
            .collect();
        let fruit = Combobox::new(options)
            .with_placeholder("No fruit")
            .with_search_placeholder("Type to filter...")
            .with_max_visible(8)
            .with_fade(Duration::from_millis(120))
            .with_block(Block::default().borders(Borders::ALL));
        (
            PickerApp {
                fruit,
                picked: None,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Fruit(combobox::Message::Selected(index, label)) => {
                self.picked = self.fruit.options().get(index).cloned();
                self.fruit
                    .update(combobox::Message::Selected(index, label))
                    .map(Msg::Fruit)
            }
            Msg::Fruit(combobox::Message::Key(key))
                if key.code == KeyCode::Esc && !self.fruit.is_open() =>
            {
                Command::quit()
            }
            Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, field_area, _list_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let title = Paragraph::new(Line::from(Span::styled(
            "Fruit Picker",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, title_area);

        let status = match self.picked {
            Some(ref fruit) => Line::from(vec![
                Span::raw("Picked: "),
                Span::styled(
                    fruit.label.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" ({} kcal per 100 g)", fruit.payload)),
            ]),
            None => Line::from(Span::styled(
                "Nothing picked yet",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(status), status_area);

        let hint = if self.fruit.is_open() {
            "Type to filter  Up/Down move  Enter pick  Esc close"
        } else {
            "Enter/Space/click open  Esc quit"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
            help_area,
        );

        // Drawn last so the open list overlays the status line.
        self.fruit.view(frame, field_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev.key_press() {
            Some(key)
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Msg::Quit)
            }
            _ => combobox::Message::from_event(&ev).map(Msg::Fruit),
        })];
        subs.extend(
            self.fruit
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Fruit)),
        );
        subs
    }
}

#[combo::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        title: Some("Fruit Picker".into()),
        log_file: std::env::var_os("COMBO_LOG").map(Into::into),
        ..ProgramOptions::default()
    };
    let app = combo::run_with::<PickerApp>((), options).await?;
    if let Some(fruit) = app.picked {
        println!("{} ({} kcal)", fruit.label, fruit.payload);
    }
    Ok(())
}
