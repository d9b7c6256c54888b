// Core: 액션 표, 디렉토리 브라우저, 백그라운드 워커
pub mod actions;
pub mod browser;
pub mod worker;

pub use browser::Browser;
pub use worker::Worker;
