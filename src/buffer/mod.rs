pub mod fifo_replacer;
pub mod lru_replacer;
pub mod page_replacement_engine;
pub mod replace;

#[cfg(test)]
mod fifo_replacer_test;
