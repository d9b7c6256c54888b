use super::*;

impl App {
    // === 커서 이동 ===

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.adjust_scroll();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
            self.adjust_scroll();
        }
    }

    pub fn go_to_top(&mut self) {
        self.selected_index = 0;
        self.adjust_scroll();
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_index = self.entries.len().saturating_sub(1);
        self.adjust_scroll();
    }

    pub fn move_selection_page_up(&mut self) {
        let page = self.layout.visible_rows();
        self.selected_index = self.selected_index.saturating_sub(page);
        self.adjust_scroll();
    }

    pub fn move_selection_page_down(&mut self) {
        let page = self.layout.visible_rows();
        let last = self.entries.len().saturating_sub(1);
        self.selected_index = (self.selected_index + page).min(last);
        self.adjust_scroll();
    }

    /// 커서가 보이도록 스크롤 조정
    pub fn adjust_scroll(&mut self) {
        let rows = self.layout.visible_rows();
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + rows {
            self.scroll_offset = self.selected_index + 1 - rows;
        }

        let max_offset = self.entries.len().saturating_sub(rows);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// 이름으로 커서 이동 (없으면 범위 안으로만 보정)
    pub(super) fn focus_name(&mut self, name: Option<&str>) {
        match name.and_then(|name| self.entries.position(name)) {
            Some(index) => self.selected_index = index,
            None => {
                self.selected_index = self
                    .selected_index
                    .min(self.entries.len().saturating_sub(1))
            }
        }
        self.adjust_scroll();
    }

    // === 디렉토리 이동 ===

    /// 선택 항목으로 들어가기 (파일이면 열기)
    pub fn enter_selected(&mut self) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };

        if entry.is_directory() {
            self.submit_listing(Job::NavigateInto {
                state: self.state.clone(),
                entry,
            });
        } else {
            self.submit(Job::Open(entry));
        }
    }

    /// 상위 디렉토리로 (Root에서는 고정)
    pub fn go_to_parent(&mut self) {
        self.submit_listing(Job::NavigateUp(self.state.clone()));
    }
}
