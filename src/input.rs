use crossterm::event::{KeyCode, KeyEvent};

// ── Canonical actions ─────────────────────────────────────────────────────────

/// Every key a handset exposes, normalized from both input sources (physical
/// keyboard, virtual keypad) before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Select,
    SoftLeft,
    SoftRight,
    Back,
    Call,
    End,
    /// 0..=9 only; both producers construct digits from literal keys.
    Digit(u8),
    Star,
    Hash,
}

// ── Physical keyboard ─────────────────────────────────────────────────────────

/// Map a terminal key event to an action. Unmapped keys yield `None` and are
/// never dispatched.
pub fn map_key(key: &KeyEvent) -> Option<Action> {
    Some(match key.code {
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::Back,
        KeyCode::Char(c) => match c {
            'q' | 'Q' | 'a' | 'A' => Action::SoftLeft,
            'e' | 'E' | 'd' | 'D' => Action::SoftRight,
            '*' => Action::Star,
            '#' => Action::Hash,
            '0'..='9' => Action::Digit(c as u8 - b'0'),
            _ => return None,
        },
        _ => return None,
    })
}

// ── Virtual keypad ────────────────────────────────────────────────────────────

/// One clickable button on the rendered keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadButton {
    SoftLeft,
    SoftRight,
    Up,
    Down,
    Left,
    Right,
    Select,
    Call,
    End,
    Digit(u8),
    Star,
    Hash,
}

impl KeypadButton {
    pub fn action(self) -> Action {
        match self {
            KeypadButton::SoftLeft => Action::SoftLeft,
            KeypadButton::SoftRight => Action::SoftRight,
            KeypadButton::Up => Action::Up,
            KeypadButton::Down => Action::Down,
            KeypadButton::Left => Action::Left,
            KeypadButton::Right => Action::Right,
            KeypadButton::Select => Action::Select,
            KeypadButton::Call => Action::Call,
            KeypadButton::End => Action::End,
            KeypadButton::Digit(n) => Action::Digit(n),
            KeypadButton::Star => Action::Star,
            KeypadButton::Hash => Action::Hash,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeypadButton::SoftLeft => "[—]",
            KeypadButton::SoftRight => "[—]",
            KeypadButton::Up => "▲",
            KeypadButton::Down => "▼",
            KeypadButton::Left => "◀",
            KeypadButton::Right => "▶",
            KeypadButton::Select => "●",
            KeypadButton::Call => "CALL",
            KeypadButton::End => "END",
            KeypadButton::Digit(0) => "0",
            KeypadButton::Digit(1) => "1",
            KeypadButton::Digit(2) => "2",
            KeypadButton::Digit(3) => "3",
            KeypadButton::Digit(4) => "4",
            KeypadButton::Digit(5) => "5",
            KeypadButton::Digit(6) => "6",
            KeypadButton::Digit(7) => "7",
            KeypadButton::Digit(8) => "8",
            KeypadButton::Digit(9) => "9",
            KeypadButton::Digit(_) => "?",
            KeypadButton::Star => "*",
            KeypadButton::Hash => "#",
        }
    }
}

/// Keypad layout, top to bottom. Softkeys are drawn in the softkey bar, not
/// here, so the grid starts at the call row.
pub const KEYPAD_ROWS: &[&[KeypadButton]] = &[
    &[KeypadButton::Call, KeypadButton::Up, KeypadButton::End],
    &[KeypadButton::Left, KeypadButton::Select, KeypadButton::Right],
    &[KeypadButton::Down],
    &[
        KeypadButton::Digit(1),
        KeypadButton::Digit(2),
        KeypadButton::Digit(3),
    ],
    &[
        KeypadButton::Digit(4),
        KeypadButton::Digit(5),
        KeypadButton::Digit(6),
    ],
    &[
        KeypadButton::Digit(7),
        KeypadButton::Digit(8),
        KeypadButton::Digit(9),
    ],
    &[
        KeypadButton::Star,
        KeypadButton::Digit(0),
        KeypadButton::Hash,
    ],
];
