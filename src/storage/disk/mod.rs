pub mod disk_scheduler;
pub mod request;
pub mod schedule;

#[cfg(test)]
mod disk_scheduler_test;
