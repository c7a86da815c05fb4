//! Numbered menu entries

/// One entry of the numbered menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Search,
    Update,
    Delete,
    Sorted,
    Statistics,
    Exit,
}

impl MenuChoice {
    /// Display order, numbered from 1
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Add,
        MenuChoice::View,
        MenuChoice::Search,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Sorted,
        MenuChoice::Statistics,
        MenuChoice::Exit,
    ];

    /// Parse the number typed at the menu prompt
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Student",
            MenuChoice::View => "View Students",
            MenuChoice::Search => "Search Student",
            MenuChoice::Update => "Update Student",
            MenuChoice::Delete => "Delete Student",
            MenuChoice::Sorted => "View Students Sorted",
            MenuChoice::Statistics => "Statistics",
            MenuChoice::Exit => "Exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 7 "), Some(MenuChoice::Statistics));
        assert_eq!(MenuChoice::parse("8"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("9"), None);
        assert_eq!(MenuChoice::parse("add"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_numbers_follow_display_order() {
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(choice.number(), i + 1);
            assert_eq!(MenuChoice::parse(&(i + 1).to_string()), Some(*choice));
        }
    }
}
