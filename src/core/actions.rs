//! 액션 레지스트리
//!
//! 키 바인딩, 커맨드바 항목, 도움말 내용이 모두 이 모듈의 표를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToParent,
    EnterSelected,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    // File Operations
    MakeDirectory,
    NewTextFile,
    Rename,
    Copy,
    Delete,
    // System
    Refresh,
    ShowHelp,
    Quit,
}

impl Action {
    /// 파일 시스템을 바꾸는 액션인지
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::MakeDirectory
                | Action::NewTextFile
                | Action::Rename
                | Action::Copy
                | Action::Delete
        )
    }
}

/// 도움말 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    FileOperation,
    System,
}

impl ActionCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ActionCategory::Navigation => "Navigation",
            ActionCategory::FileOperation => "File",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        label: "Move up / down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("k / j"),
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveDown,
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::EnterSelected,
        label: "Open folder or file",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Enter / l"),
        command_bar: Some(CommandBarEntry {
            key: "Enter",
            label: "Open",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::GoToParent,
        label: "Parent folder",
        category: ActionCategory::Navigation,
        shortcut_display: Some("h / Bksp"),
        command_bar: Some(CommandBarEntry {
            key: "h",
            label: "Up",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::GoToTop,
        label: "First / last entry",
        category: ActionCategory::Navigation,
        shortcut_display: Some("gg / G"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        label: "Last entry",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        label: "Page up / down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("PgUp / PgDn"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        label: "Page down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    // File Operations
    ActionDef {
        action: Action::MakeDirectory,
        label: "New folder",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("a"),
        command_bar: Some(CommandBarEntry {
            key: "a",
            label: "Folder",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::NewTextFile,
        label: "New text file",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("n"),
        command_bar: Some(CommandBarEntry {
            key: "n",
            label: "File",
            priority: 21,
        }),
    },
    ActionDef {
        action: Action::Rename,
        label: "Rename",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("r"),
        command_bar: Some(CommandBarEntry {
            key: "r",
            label: "Rename",
            priority: 22,
        }),
    },
    ActionDef {
        action: Action::Copy,
        label: "Copy (name or dir/name)",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("y"),
        command_bar: Some(CommandBarEntry {
            key: "y",
            label: "Copy",
            priority: 23,
        }),
    },
    ActionDef {
        action: Action::Delete,
        label: "Delete",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("d"),
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "Del",
            priority: 24,
        }),
    },
    // System
    ActionDef {
        action: Action::Refresh,
        label: "Refresh",
        category: ActionCategory::System,
        shortcut_display: Some("^R"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ShowHelp,
        label: "Help",
        category: ActionCategory::System,
        shortcut_display: Some("?"),
        command_bar: Some(CommandBarEntry {
            key: "?",
            label: "Help",
            priority: 90,
        }),
    },
    ActionDef {
        action: Action::Quit,
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q / ^C"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 99,
        }),
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    let plain = Some(KeyModifiers::NONE);
    let ctrl = Some(KeyModifiers::CONTROL);
    let bind = |code, modifiers, action| KeyBinding {
        code,
        modifiers,
        action,
    };

    vec![
        // 종료
        bind(KeyCode::Char('q'), plain, Action::Quit),
        bind(KeyCode::Char('c'), ctrl, Action::Quit),
        // 탐색: Vim
        bind(KeyCode::Char('j'), plain, Action::MoveDown),
        bind(KeyCode::Char('k'), plain, Action::MoveUp),
        bind(KeyCode::Char('h'), plain, Action::GoToParent),
        bind(KeyCode::Char('l'), plain, Action::EnterSelected),
        bind(KeyCode::Char('G'), None, Action::GoToBottom),
        // 탐색: 화살표 등
        bind(KeyCode::Down, None, Action::MoveDown),
        bind(KeyCode::Up, None, Action::MoveUp),
        bind(KeyCode::Left, None, Action::GoToParent),
        bind(KeyCode::Right, None, Action::EnterSelected),
        bind(KeyCode::Backspace, None, Action::GoToParent),
        bind(KeyCode::Enter, None, Action::EnterSelected),
        bind(KeyCode::Home, None, Action::GoToTop),
        bind(KeyCode::End, None, Action::GoToBottom),
        bind(KeyCode::PageUp, None, Action::PageUp),
        bind(KeyCode::PageDown, None, Action::PageDown),
        // 파일 작업
        bind(KeyCode::Char('a'), plain, Action::MakeDirectory),
        bind(KeyCode::Char('n'), plain, Action::NewTextFile),
        bind(KeyCode::Char('r'), plain, Action::Rename),
        bind(KeyCode::Char('y'), plain, Action::Copy),
        bind(KeyCode::Char('d'), plain, Action::Delete),
        // 시스템
        bind(KeyCode::Char('r'), ctrl, Action::Refresh),
        bind(KeyCode::Char('?'), None, Action::ShowHelp),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && binding
                    .modifiers
                    .map_or(true, |required| modifiers == required)
        })
        .map(|binding| binding.action)
}

/// `g` + `g` 시퀀스의 시작 키인지
pub fn is_sequence_prefix(c: char) -> bool {
    c == 'g'
}

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    match (prefix, key) {
        ('g', 'g') => Some(Action::GoToTop),
        _ => None,
    }
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
///
/// `enabled`가 false를 돌려주는 액션은 흐리게 표시됩니다.
pub fn generate_command_bar_items(enabled: impl Fn(Action) -> bool) -> Vec<CommandItem> {
    let mut entries: Vec<(Action, &CommandBarEntry)> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref().map(|cb| (def.action, cb)))
        .collect();
    entries.sort_by_key(|(_, cb)| cb.priority);

    entries
        .into_iter()
        .map(|(action, cb)| CommandItem::new(cb.key, cb.label).enabled(enabled(action)))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    [
        ActionCategory::Navigation,
        ActionCategory::FileOperation,
        ActionCategory::System,
    ]
    .iter()
    .map(|category| {
        let items = ACTION_DEFS
            .iter()
            .filter(|d| d.category == *category)
            .filter_map(|d| d.shortcut_display.map(|key| (key, d.label)))
            .collect::<Vec<_>>();
        (category.title(), items)
    })
    .filter(|(_, items)| !items.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_action_vim_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(find_action(none, KeyCode::Char('j')), Some(Action::MoveDown));
        assert_eq!(find_action(none, KeyCode::Char('k')), Some(Action::MoveUp));
        assert_eq!(find_action(none, KeyCode::Char('h')), Some(Action::GoToParent));
        assert_eq!(
            find_action(none, KeyCode::Char('l')),
            Some(Action::EnterSelected)
        );
        assert_eq!(
            find_action(KeyModifiers::SHIFT, KeyCode::Char('G')),
            Some(Action::GoToBottom)
        );
    }

    #[test]
    fn test_find_action_arrow_keys() {
        assert_eq!(find_action(KeyModifiers::NONE, KeyCode::Up), Some(Action::MoveUp));
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Backspace),
            Some(Action::GoToParent)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Enter),
            Some(Action::EnterSelected)
        );
    }

    #[test]
    fn test_find_action_ctrl_keys() {
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('r')),
            Some(Action::Refresh)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Char('r')),
            Some(Action::Rename)
        );
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(Action::Quit)
        );
        assert_eq!(find_action(KeyModifiers::CONTROL, KeyCode::Char('j')), None);
    }

    #[test]
    fn test_help_key_with_shift() {
        assert_eq!(
            find_action(KeyModifiers::SHIFT, KeyCode::Char('?')),
            Some(Action::ShowHelp)
        );
    }

    #[test]
    fn test_sequence() {
        assert!(is_sequence_prefix('g'));
        assert!(!is_sequence_prefix('x'));
        assert_eq!(find_sequence_action('g', 'g'), Some(Action::GoToTop));
        assert_eq!(find_sequence_action('g', 'x'), None);
    }

    #[test]
    fn test_generate_command_bar_items() {
        let items = generate_command_bar_items(|_| true);
        assert_eq!(items.first().map(|i| i.key.as_str()), Some("Enter"));
        assert_eq!(items.last().map(|i| i.key.as_str()), Some("q"));
        assert_eq!(items.len(), 9);
        assert!(items.iter().all(|i| i.enabled));

        let items = generate_command_bar_items(|action| !action.is_mutation());
        let disabled: Vec<&str> = items
            .iter()
            .filter(|i| !i.enabled)
            .map(|i| i.key.as_str())
            .collect();
        assert_eq!(disabled.len(), 5);
        assert!(disabled.contains(&"d"));
        assert!(!disabled.contains(&"Enter"));
    }

    #[test]
    fn test_generate_help_entries() {
        let entries = generate_help_entries();
        assert_eq!(entries.len(), 3);
        let (title, items) = &entries[1];
        assert_eq!(*title, "File");
        assert!(items.iter().any(|(key, _)| *key == "d"));
    }

    #[test]
    fn test_every_action_has_definition() {
        for binding in key_bindings() {
            assert!(
                ACTION_DEFS.iter().any(|d| d.action == binding.action),
                "{:?} has no definition",
                binding.action
            );
        }
    }
}
