use super::*;
use crate::models::{JobKind, JobOutput, JobResult, Listing, ListingNotice, Mutation};
use crate::utils::error::PocketDirError;
use tracing::info;

impl App {
    // === 작업 제출 ===

    /// 워커에 작업 제출 (실패하면 에러 다이얼로그)
    pub(super) fn submit(&mut self, job: Job) -> Option<u64> {
        match self.worker.submit(job) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                self.show_error("Background task", &e);
                None
            }
        }
    }

    /// 목록을 돌려주는 작업 제출 (이전 목록 작업 결과는 무시됨)
    pub(super) fn submit_listing(&mut self, job: Job) {
        if let Some(ticket) = self.submit(job) {
            self.latest_listing_ticket = ticket;
        }
    }

    /// 변경 작업 제출 (한 번에 하나)
    pub(super) fn submit_mutation(&mut self, mutation: Mutation, subject: String) {
        if self.is_mutation_pending() {
            self.set_toast("Please wait for the current change to finish");
            return;
        }

        info!(action = ?mutation.action(), subject = %subject, "submitting change");
        let job = Job::Mutate {
            state: self.state.clone(),
            mutation,
        };
        if let Some(ticket) = self.submit(job) {
            self.latest_listing_ticket = ticket;
            self.pending_mutation = Some(PendingMutation { ticket, subject });
        }
    }

    // === 결과 적용 ===

    pub(super) fn apply_result(&mut self, result: JobResult) {
        let JobResult {
            ticket,
            kind,
            outcome,
        } = result;

        let subject = match &self.pending_mutation {
            Some(pending) if pending.ticket == ticket => {
                self.pending_mutation.take().map(|p| p.subject)
            }
            _ => None,
        };

        match outcome {
            Ok(JobOutput::Listing(listing)) => {
                let focus = match &kind {
                    // 떠나온 디렉토리에 커서
                    JobKind::NavigateUp { from } => from
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned()),
                    JobKind::NavigateInto => None,
                    _ => self.selected_entry().map(|e| e.name.clone()),
                };
                let reset = kind == JobKind::NavigateInto;
                self.apply_listing(ticket, listing, focus, reset);
            }
            Ok(JobOutput::Mutated { listing, affected }) => {
                if let JobKind::Mutate(action) = &kind {
                    let name = affected.clone().or(subject).unwrap_or_default();
                    self.set_toast(format!("{} {}", action.past_tense(), name));
                }
                let focus = affected.or_else(|| self.selected_entry().map(|e| e.name.clone()));
                self.apply_listing(ticket, listing, focus, false);
            }
            Ok(JobOutput::Opened(request)) => {
                let name = request
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.set_toast(format!("Opened {} ({})", name, request.mime()));
            }
            Err(e) => {
                let title = match &kind {
                    JobKind::NavigateInto => "Cannot open folder".to_string(),
                    JobKind::Open => "Cannot open file".to_string(),
                    JobKind::Mutate(action) => format!("{} failed", action.name()),
                    JobKind::Refresh | JobKind::NavigateUp { .. } => "Error".to_string(),
                };
                self.show_error(&title, &e);
            }
        }
    }

    /// 새 목록 적용 (더 최근에 제출한 목록 작업이 있으면 버림)
    fn apply_listing(&mut self, ticket: u64, listing: Listing, focus: Option<String>, reset: bool) {
        if ticket < self.latest_listing_ticket {
            debug!(ticket, latest = self.latest_listing_ticket, "stale listing dropped");
            return;
        }

        let Listing {
            state,
            entries,
            notice,
        } = listing;

        match notice {
            Some(ListingNotice::AtRoot) => self.set_toast("Already at the root folder"),
            Some(ListingNotice::Recovered { from }) => {
                let name = from
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| from.display().to_string());
                self.set_toast(format!("'{}' is unavailable, moved up", name));
            }
            None => {}
        }

        self.state = state;
        self.entries = entries;
        if reset {
            self.selected_index = 0;
            self.scroll_offset = 0;
        }
        self.focus_name(focus.as_deref());
    }

    pub(super) fn show_error(&mut self, title: &str, error: &PocketDirError) {
        warn!(title, error = %error, category = ?error.category(), "operation failed");
        self.dialog = Some(DialogKind::error(
            title,
            error.to_string(),
            Some(error.category().hint().to_string()),
        ));
    }
}
