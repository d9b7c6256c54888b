//! 백그라운드 작업 워커
//!
//! 작업은 제출 순서대로 하나씩 실행됩니다. 파일 시스템 호출은 blocking 풀에서 돌고,
//! 다음 작업은 앞 작업이 끝난 뒤에야 시작합니다. 결과는 std 채널로 돌아가며
//! UI 루프가 `try_recv`로 가져갑니다.

use super::browser::Browser;
use crate::models::{Job, JobResult};
use crate::utils::error::{PocketDirError, Result};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{debug, warn};

pub struct Worker {
    runtime: Option<Runtime>,
    job_tx: UnboundedSender<(u64, Job)>,
    result_rx: Receiver<JobResult>,
    next_ticket: u64,
    in_flight: usize,
}

impl Worker {
    /// 런타임과 소비 태스크 시작
    pub fn spawn(browser: Browser) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("pocketdir-worker")
            .enable_all()
            .build()
            .map_err(|e| PocketDirError::Worker(format!("failed to start runtime: {}", e)))?;

        let (job_tx, mut job_rx) = unbounded_channel::<(u64, Job)>();
        let (result_tx, result_rx) = mpsc::channel::<JobResult>();
        let browser = Arc::new(browser);

        runtime.spawn(async move {
            while let Some((ticket, job)) = job_rx.recv().await {
                let kind = job.kind();
                debug!(ticket, kind = ?kind, "job started");

                let browser = Arc::clone(&browser);
                let outcome = match tokio::task::spawn_blocking(move || browser.execute(job)).await
                {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!(ticket, error = %e, "job panicked");
                        Err(PocketDirError::Worker(e.to_string()))
                    }
                };

                if result_tx
                    .send(JobResult {
                        ticket,
                        kind,
                        outcome,
                    })
                    .is_err()
                {
                    // UI가 종료됨
                    break;
                }
            }
        });

        Ok(Self {
            runtime: Some(runtime),
            job_tx,
            result_rx,
            next_ticket: 0,
            in_flight: 0,
        })
    }

    /// 작업 제출, 발급된 번호 반환
    pub fn submit(&mut self, job: Job) -> Result<u64> {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.job_tx
            .send((ticket, job))
            .map_err(|_| PocketDirError::Worker("worker has stopped".to_string()))?;
        self.in_flight += 1;
        Ok(ticket)
    }

    /// 완료된 결과 하나 (없으면 None, 블로킹하지 않음)
    pub fn try_recv(&mut self) -> Option<JobResult> {
        match self.result_rx.try_recv() {
            Ok(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// 결과를 최대 `timeout`까지 기다림
    #[cfg(test)]
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<JobResult> {
        let result = self.result_rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(result)
    }

    /// 아직 결과가 오지 않은 작업이 있는지
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // 멈춘 파일 시스템 호출을 기다리지 않음
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
