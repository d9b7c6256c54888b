/// 한 줄 텍스트 입력 버퍼
///
/// `cursor`는 바이트 오프셋이며 항상 char 경계에 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// 초기값을 넣고 커서를 끝에 둠
    pub fn new(initial: impl Into<String>) -> Self {
        let value = initial.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 이름 변경 시 확장자 앞까지만 커서 이동 (`notes|.txt`)
    pub fn with_cursor_before_extension(mut self) -> Self {
        if let Some(dot) = self.value.rfind('.').filter(|&i| i > 0) {
            self.cursor = dot;
        }
        self
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary(self.cursor);
        self.value.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_boundary(self.cursor);
    }

    pub fn right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// 커서 앞 단어 삭제 (Ctrl+W)
    pub fn delete_prev_word(&mut self) {
        let before = &self.value[..self.cursor];
        let trimmed = before.trim_end_matches(is_word_delimiter);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| is_word_delimiter(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// 전체 지우기 (Ctrl+U)
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

fn is_word_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '\\' | '.' | '-' | '_')
}
