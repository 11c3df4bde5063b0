use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crossterm::event::KeyCode;

use crate::expenses::{ExpenseId, ExpenseLedger, Mode, Notice};
use crate::format::format_money;

use super::actions::{key_pressed, widget_action, widget_editing_action, EditingAction, TuiAction};
use super::editor::LineEditor;
use super::period::Period;
use super::theme::Theme;
use super::TuiWidget;

const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Price,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Price,
            Focus::Price => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::List,
            Focus::Price => Focus::Title,
            Focus::List => Focus::Price,
        }
    }
}

/// The single screen of the app: form, total and the list of expenses.
#[derive(Debug)]
pub struct ExpenseScreen {
    ledger: ExpenseLedger,
    theme: Theme,
    period: Period,
    focus: Focus,
    selected: usize,
    title_editor: LineEditor,
    price_editor: LineEditor,
    notice: Option<Notice>,
    currency: char,
}

impl ExpenseScreen {
    pub fn new(ledger: ExpenseLedger, theme: Theme, currency: char) -> Self {
        Self {
            ledger,
            theme,
            period: Period::default(),
            focus: Focus::Title,
            selected: 0,
            title_editor: LineEditor::default(),
            price_editor: LineEditor::default(),
            notice: None,
            currency,
        }
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    #[cfg(test)]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[cfg(test)]
    pub fn period(&self) -> Period {
        self.period
    }

    #[cfg(test)]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn into_ledger(self) -> ExpenseLedger {
        self.ledger
    }

    /// Feeds one key press into the screen.
    ///
    /// While a notice is shown the key only dismisses it.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<TuiAction> {
        if self.notice.take().is_some() {
            return None;
        }
        match self.focus {
            Focus::Title | Focus::Price => {
                let action = widget_editing_action(code)?;
                self.perform_editing_action(action);
                None
            }
            Focus::List => self.perform_tui_action(widget_action(code)?),
        }
    }

    fn perform_tui_action(&mut self, action: TuiAction) -> Option<TuiAction> {
        match action {
            TuiAction::MoveUp => self.selected = self.selected.saturating_sub(1),
            TuiAction::MoveDown => {
                if self.selected + 1 < self.ledger.records().len() {
                    self.selected += 1;
                }
            }
            TuiAction::PressRowControl => self.press_row_control(),
            TuiAction::Delete => self.delete_selected(),
            TuiAction::ToggleTheme => self.theme = self.theme.toggled(),
            TuiAction::PrevMonth => self.period.prev_month(),
            TuiAction::NextMonth => self.period.next_month(),
            TuiAction::PrevYear => self.period.prev_year(),
            TuiAction::NextYear => self.period.next_year(),
            TuiAction::FocusNext => self.focus = self.focus.next(),
            TuiAction::FocusPrev => self.focus = self.focus.prev(),
            TuiAction::Exit => return Some(TuiAction::Exit),
        }
        None
    }

    fn perform_editing_action(&mut self, action: EditingAction) {
        match action {
            EditingAction::Submit => self.submit(),
            EditingAction::Leave => self.focus = Focus::List,
            EditingAction::FocusNext => self.focus = self.focus.next(),
            EditingAction::FocusPrev => self.focus = self.focus.prev(),
            edit => self.edit_draft(edit),
        }
    }

    fn edit_draft(&mut self, action: EditingAction) {
        let (mut text, editor) = match self.focus {
            Focus::Title => (self.ledger.draft_title().to_string(), &mut self.title_editor),
            Focus::Price => (self.ledger.draft_price().to_string(), &mut self.price_editor),
            Focus::List => return,
        };
        editor.clamp(&text);
        match action {
            EditingAction::InsertChar(c) => editor.insert_char(&mut text, c),
            EditingAction::DeleteLeft => editor.delete_left(&mut text),
            EditingAction::DeleteRight => editor.delete_right(&mut text),
            EditingAction::MoveLeft => editor.move_left(),
            EditingAction::MoveRight => editor.move_right(&text),
            _ => return,
        }
        match self.focus {
            Focus::Title => self.ledger.set_draft_title(text),
            Focus::Price => self.ledger.set_draft_price(text),
            Focus::List => {}
        }
    }

    fn submit(&mut self) {
        if let Err(err) = self.ledger.submit() {
            self.notice = Some(err.into());
        }
        self.sync_editors();
    }

    fn selected_id(&self) -> Option<ExpenseId> {
        self.ledger.records().get(self.selected).map(|record| record.id)
    }

    fn press_row_control(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.ledger.is_editing(id) {
            if let Err(err) = self.ledger.commit_edit(id) {
                self.notice = Some(err.into());
            }
        } else if self.ledger.begin_edit(id) {
            self.focus = Focus::Title;
        }
        self.sync_editors();
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.notice = self.ledger.delete(id);
        let len = self.ledger.records().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.sync_editors();
    }

    fn sync_editors(&mut self) {
        self.title_editor.move_to_end(self.ledger.draft_title());
        self.price_editor.move_to_end(self.ledger.draft_price());
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, label: &str, field: Focus) {
        let (value, editor) = match field {
            Focus::Price => (self.ledger.draft_price(), &self.price_editor),
            _ => (self.ledger.draft_title(), &self.title_editor),
        };
        let focused = self.focus == field;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.input_border(focused))
            .title(label);
        frame.render_widget(
            Paragraph::new(value).style(self.theme.base()).block(block),
            area,
        );
        if focused && self.notice.is_none() {
            let cursor = editor
                .cursor_position()
                .min(value.chars().count())
                .min(area.width.saturating_sub(1) as usize) as u16;
            frame.set_cursor(area.x + cursor, area.y + 1);
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .ledger
            .rows()
            .map(|row| {
                let record = row.record;
                let control = if row.is_editing { "[Save]" } else { "[Edit]" };
                let text = Text::from(vec![
                    Line::from(vec![
                        Span::raw(format!("{}:  {}", record.id, record.title)),
                        Span::raw("    "),
                        Span::raw(format_money(record.price, self.currency)),
                        Span::raw("    "),
                        Span::raw(control),
                        Span::raw(" [Delete]"),
                    ]),
                    Line::from(record.created_at().format(DATE_FORMAT).to_string()),
                ]);
                let style = if row.is_editing {
                    self.theme.editing_row()
                } else {
                    self.theme.base()
                };
                ListItem::new(text).style(style)
            })
            .collect();

        let mut state = ListState::default();
        if self.focus == Focus::List && !self.ledger.records().is_empty() {
            state.select(Some(self.selected));
        }
        let list = List::new(items)
            .style(self.theme.base())
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_notice(&self, frame: &mut Frame, notice: &Notice) {
        let area = centered(frame.size(), 44, 5);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Notice")
            .style(self.theme.base());
        let body = Text::from(vec![
            Line::from(notice.to_string()),
            Line::from(Span::styled(
                "press any key",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ]);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(body)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl TuiWidget for ExpenseScreen {
    fn handle_events(&mut self) -> Option<TuiAction> {
        let code = key_pressed()?;
        self.handle_key(code)
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.size();
        frame.render_widget(Block::default().style(self.theme.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from("Expenses Log"))
                .style(self.theme.base().add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            chunks[0],
        );

        let switch = if self.theme.is_dark() { "[on]" } else { "[off]" };
        frame.render_widget(
            Paragraph::new(format!("Dark Mode {switch}"))
                .style(self.theme.base())
                .alignment(Alignment::Center),
            chunks[1],
        );

        let pickers = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        frame.render_widget(
            Paragraph::new(format!("< {} >", self.period.month.name()))
                .style(self.theme.picker())
                .alignment(Alignment::Center),
            pickers[0],
        );
        frame.render_widget(
            Paragraph::new(format!("< {} >", self.period.year))
                .style(self.theme.picker())
                .alignment(Alignment::Center),
            pickers[1],
        );

        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[3]);
        self.render_input(frame, inputs[0], "Item", Focus::Title);
        self.render_input(frame, inputs[1], "Price", Focus::Price);

        let label = match self.ledger.mode() {
            Mode::Idle => "[ Add Expense ]",
            Mode::Editing(_) => "[ Update Expense ]",
        };
        let button_style = if self.ledger.can_submit() {
            self.theme.base().add_modifier(Modifier::BOLD)
        } else {
            self.theme.base().add_modifier(Modifier::DIM)
        };
        frame.render_widget(
            Paragraph::new(label)
                .style(button_style)
                .alignment(Alignment::Center),
            chunks[4],
        );

        frame.render_widget(
            Paragraph::new(format!(
                "Total Expenditure: {}",
                format_money(self.ledger.total(), self.currency)
            ))
            .style(self.theme.base()),
            chunks[5],
        );

        self.render_list(frame, chunks[6]);

        if let Some(notice) = &self.notice {
            self.render_notice(frame, notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rust_decimal::Decimal;

    use super::*;

    fn screen() -> ExpenseScreen {
        ExpenseScreen::new(ExpenseLedger::new(), Theme::Light, '$')
    }

    fn type_text(screen: &mut ExpenseScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c));
        }
    }

    fn add(screen: &mut ExpenseScreen, title: &str, price: &str) {
        type_text(screen, title);
        screen.handle_key(KeyCode::Tab);
        type_text(screen, price);
        screen.handle_key(KeyCode::Enter);
        screen.handle_key(KeyCode::BackTab);
    }

    fn rendered(screen: &mut ExpenseScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| screen.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn cursor_stays_inside_a_narrow_input() {
        let mut screen = screen();
        type_text(&mut screen, &"a".repeat(300));

        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| screen.render(frame)).unwrap();
        let (x, _) = terminal.get_cursor().unwrap();

        assert!(x < 70);
        assert_eq!(screen.ledger().draft_title().len(), 300);
    }

    #[test]
    fn typing_and_enter_adds_an_expense() {
        let mut screen = screen();

        add(&mut screen, "Coffee", "3.50");

        let ledger = screen.ledger();
        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.records()[0].title, "Coffee");
        assert_eq!(ledger.total(), Decimal::new(350, 2));
        assert_eq!(ledger.draft_title(), "");
        assert_eq!(screen.focus(), Focus::Title);
    }

    #[test]
    fn invalid_price_shows_notice_until_dismissed() {
        let mut screen = screen();
        add(&mut screen, "Book", "x");

        // the BackTab in `add` only dismissed the notice
        assert!(screen.ledger().records().is_empty());
        assert_eq!(screen.focus(), Focus::Price);

        screen.handle_key(KeyCode::Enter);
        assert_eq!(screen.notice(), Some(&Notice::InvalidPrice));
        screen.handle_key(KeyCode::Char('a'));
        assert_eq!(screen.notice(), None);
        assert_eq!(screen.ledger().draft_price(), "x");
    }

    #[test]
    fn edit_and_save_from_the_list() {
        let mut screen = screen();
        add(&mut screen, "Book", "10");
        screen.handle_key(KeyCode::Esc);
        assert_eq!(screen.focus(), Focus::List);

        screen.handle_key(KeyCode::Char('e'));
        assert_eq!(screen.ledger().mode(), Mode::Editing(ExpenseId(1)));
        assert_eq!(screen.focus(), Focus::Title);

        screen.handle_key(KeyCode::Tab);
        screen.handle_key(KeyCode::Backspace);
        screen.handle_key(KeyCode::Backspace);
        type_text(&mut screen, "15");
        screen.handle_key(KeyCode::Enter);

        let ledger = screen.ledger();
        assert_eq!(ledger.mode(), Mode::Idle);
        assert_eq!(ledger.records()[0].price, Decimal::new(15, 0));
        assert_eq!(ledger.total(), Decimal::new(15, 0));
    }

    #[test]
    fn delete_from_the_list_confirms_by_title() {
        let mut screen = screen();
        add(&mut screen, "Coffee", "3.50");
        add(&mut screen, "Tea", "2.00");
        screen.handle_key(KeyCode::Esc);

        screen.handle_key(KeyCode::Char('d'));

        assert_eq!(
            screen.notice(),
            Some(&Notice::Deleted {
                title: "Coffee".to_string()
            })
        );
        assert_eq!(screen.ledger().records()[0].id, ExpenseId(2));
        assert_eq!(screen.ledger().total(), Decimal::new(2, 0));
    }

    #[test]
    fn list_keys_toggle_theme_and_period() {
        let mut screen = screen();
        screen.handle_key(KeyCode::Esc);
        let month = screen.period().month;

        screen.handle_key(KeyCode::Char('t'));
        screen.handle_key(KeyCode::Char(']'));

        assert!(screen.theme().is_dark());
        assert_eq!(screen.period().month, month.succ());
        assert_eq!(screen.handle_key(KeyCode::Char('q')), Some(TuiAction::Exit));
    }

    #[test]
    fn renders_total_and_edit_controls() {
        let mut screen = screen();
        add(&mut screen, "Coffee", "3.50");
        add(&mut screen, "Tea", "2");
        screen.handle_key(KeyCode::Esc);
        screen.handle_key(KeyCode::Enter);

        let output = rendered(&mut screen);

        assert!(output.contains("Expenses Log"));
        assert!(output.contains("Total Expenditure: $5.50"));
        assert!(output.contains("[ Update Expense ]"));
        assert!(output.contains("[Save]"));
        assert!(output.contains("[Edit]"));
        assert!(output.contains("2:  Tea"));
    }
}
