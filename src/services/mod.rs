pub mod database;
pub mod slots;

#[cfg(test)]
mod slots_test;
